use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::VoiceLine;
use crate::{RandomiserError, Result};

/// Gives every destination line the name of one source line.
///
/// `destination` and `source` index into `lines`. The source pool is copied,
/// padded with draws from the original source until it covers the
/// destination, shuffled, then read off in order. When the source is larger
/// than the destination the shuffled tail is dropped. Every source line is
/// therefore used at least once whenever `destination.len() >= source.len()`.
pub fn match_pool<R: Rng + ?Sized>(
    lines: &mut [VoiceLine],
    destination: &[usize],
    source: &[usize],
    rng: &mut R,
) -> Result<()> {
    if destination.is_empty() {
        return Ok(());
    }
    if source.is_empty() {
        return Err(RandomiserError::EmptySourcePool {
            destination: destination.len(),
        });
    }

    let mut pool = source.to_vec();
    while pool.len() < destination.len() {
        pool.push(source[rng.gen_range(0..source.len())]);
    }
    pool.shuffle(rng);

    for (&dst, &src) in destination.iter().zip(&pool) {
        let replacement = lines[src].name().to_string();
        lines[dst].replacement = Some(replacement);
    }

    Ok(())
}
