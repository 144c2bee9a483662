use indexmap::IndexMap;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::VoiceLine;
use crate::matcher::match_pool;
use crate::settings::Mode;
use crate::Result;

/// A destination pool and the source pool it draws replacements from.
/// Both hold indices into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolPair {
    pub destination: Vec<usize>,
    pub source: Vec<usize>,
}

/// Groups `indices` by `key`, keeping first-appearance order of the keys.
fn group_by_key(
    lines: &[VoiceLine],
    indices: &[usize],
    key: fn(&VoiceLine) -> &str,
) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for &idx in indices {
        groups
            .entry(key(&lines[idx]).to_string())
            .or_default()
            .push(idx);
    }
    groups
}

/// World-level pairing over the whole catalog.
pub fn pair_worlds<R: Rng + ?Sized>(lines: &[VoiceLine], mode: Mode, rng: &mut R) -> Vec<PoolPair> {
    let all: Vec<usize> = (0..lines.len()).collect();

    match mode {
        Mode::Mix => vec![PoolPair {
            destination: all.clone(),
            source: all,
        }],
        Mode::Separate => group_by_key(lines, &all, VoiceLine::world)
            .into_values()
            .map(|world| PoolPair {
                destination: world.clone(),
                source: world,
            })
            .collect(),
        Mode::Swap => {
            let worlds: Vec<Vec<usize>> = group_by_key(lines, &all, VoiceLine::world)
                .into_values()
                .collect();
            let mut ids: Vec<usize> = (0..worlds.len()).collect();
            ids.shuffle(rng);

            worlds
                .iter()
                .zip(&ids)
                .map(|(world, &src)| PoolPair {
                    destination: world.clone(),
                    source: worlds[src].clone(),
                })
                .collect()
        }
    }
}

/// Character-level pairing inside one world pair, assigning replacements.
///
/// Under `Separate`, characters present on both sides are matched directly.
/// Destination characters missing from the source are matched against the
/// source-only characters, padded with the whole source world when there are
/// too few, shuffled and cut to length. `Swap` does the same positionally for
/// every character, ignoring keys.
pub fn pair_characters<R: Rng + ?Sized>(
    lines: &mut [VoiceLine],
    pair: &PoolPair,
    mode: Mode,
    rng: &mut R,
) -> Result<()> {
    match mode {
        Mode::Mix => match_pool(lines, &pair.destination, &pair.source, rng),
        Mode::Separate => {
            let dst_chars = group_by_key(lines, &pair.destination, VoiceLine::character);
            let src_chars = group_by_key(lines, &pair.source, VoiceLine::character);

            for (name, dst) in &dst_chars {
                if let Some(src) = src_chars.get(name) {
                    match_pool(lines, dst, src, rng)?;
                }
            }

            let dst_unique: Vec<&[usize]> = dst_chars
                .iter()
                .filter(|(name, _)| !src_chars.contains_key(*name))
                .map(|(_, pool)| pool.as_slice())
                .collect();
            let mut src_unique: Vec<&[usize]> = src_chars
                .iter()
                .filter(|(name, _)| !dst_chars.contains_key(*name))
                .map(|(_, pool)| pool.as_slice())
                .collect();

            if !dst_unique.is_empty() {
                tracing::trace!(
                    unmatched = dst_unique.len(),
                    candidates = src_unique.len(),
                    "pairing unmatched characters"
                );
            }

            while src_unique.len() < dst_unique.len() {
                src_unique.push(&pair.source);
            }
            src_unique.shuffle(rng);

            for (dst, src) in dst_unique.iter().zip(&src_unique) {
                match_pool(lines, dst, src, rng)?;
            }
            Ok(())
        }
        Mode::Swap => {
            let dst_chars: Vec<Vec<usize>> =
                group_by_key(lines, &pair.destination, VoiceLine::character)
                    .into_values()
                    .collect();
            let src_groups = group_by_key(lines, &pair.source, VoiceLine::character);
            let mut src_chars: Vec<&[usize]> = src_groups.values().map(Vec::as_slice).collect();

            while src_chars.len() < dst_chars.len() {
                src_chars.push(&pair.source);
            }
            src_chars.shuffle(rng);

            for (dst, src) in dst_chars.iter().zip(&src_chars) {
                match_pool(lines, dst, src, rng)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::catalog::build_catalog;

    fn catalog() -> Vec<VoiceLine> {
        build_catalog([
            "aaX_1", "aaX_2", "aaY_1", "bbX_1", "bbZ_1", "bbZ_2", "ccQ_1",
        ])
        .unwrap()
    }

    fn replacement(lines: &[VoiceLine], idx: usize) -> &str {
        lines[idx].replacement.as_deref().expect("assigned")
    }

    #[test]
    fn mix_worlds_is_one_full_pair() {
        let lines = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let pairs = pair_worlds(&lines, Mode::Mix, &mut rng);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].destination, (0..lines.len()).collect::<Vec<_>>());
        assert_eq!(pairs[0].destination, pairs[0].source);
    }

    #[test]
    fn separate_worlds_pair_with_themselves() {
        let lines = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        let pairs = pair_worlds(&lines, Mode::Separate, &mut rng);
        assert_eq!(
            pairs,
            vec![
                PoolPair { destination: vec![0, 1, 2], source: vec![0, 1, 2] },
                PoolPair { destination: vec![3, 4, 5], source: vec![3, 4, 5] },
                PoolPair { destination: vec![6], source: vec![6] },
            ]
        );
    }

    #[test]
    fn swap_worlds_is_a_permutation() {
        let lines = catalog();
        let worlds = [vec![0, 1, 2], vec![3, 4, 5], vec![6]];

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pairs = pair_worlds(&lines, Mode::Swap, &mut rng);
            assert_eq!(pairs.len(), worlds.len());

            let destinations: Vec<&Vec<usize>> = pairs.iter().map(|p| &p.destination).collect();
            assert_eq!(destinations, worlds.iter().collect::<Vec<_>>());

            let mut sources: Vec<Vec<usize>> = pairs.iter().map(|p| p.source.clone()).collect();
            sources.sort();
            assert_eq!(sources, worlds.to_vec());
        }
    }

    #[test]
    fn separate_characters_stay_within_character() {
        let mut lines = catalog();
        let pair = PoolPair { destination: vec![0, 1, 2], source: vec![0, 1, 2] };
        let mut rng = StdRng::seed_from_u64(5);
        pair_characters(&mut lines, &pair, Mode::Separate, &mut rng).unwrap();

        for idx in [0, 1] {
            assert!(["aaX_1", "aaX_2"].contains(&replacement(&lines, idx)));
        }
        assert_eq!(replacement(&lines, 2), "aaY_1");
    }

    #[test]
    fn separate_unmatched_characters_use_source_only_groups() {
        let mut lines = catalog();
        // aa (aX, aY) drawing from cc (cQ): nothing in common, one candidate
        // group padded with the whole source world.
        let pair = PoolPair { destination: vec![0, 1, 2], source: vec![6] };
        let mut rng = StdRng::seed_from_u64(3);
        pair_characters(&mut lines, &pair, Mode::Separate, &mut rng).unwrap();

        for idx in 0..3 {
            assert_eq!(replacement(&lines, idx), "ccQ_1");
        }
    }

    #[test]
    fn separate_unmatched_characters_are_cut_after_shuffle() {
        let mut lines = catalog();
        // ccQ is unmatched against bb, which offers bX and bZ.
        let pair = PoolPair { destination: vec![6], source: vec![3, 4, 5] };
        let mut rng = StdRng::seed_from_u64(11);
        pair_characters(&mut lines, &pair, Mode::Separate, &mut rng).unwrap();

        assert!(["bbX_1", "bbZ_1", "bbZ_2"].contains(&replacement(&lines, 6)));
        assert!(lines[3..6].iter().all(|line| line.replacement.is_none()));
    }

    #[test]
    fn swap_characters_keep_groups_together() {
        let mut lines = catalog();
        let pair = PoolPair { destination: vec![3, 4, 5], source: vec![0, 1, 2] };

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            pair_characters(&mut lines, &pair, Mode::Swap, &mut rng).unwrap();

            let source_names: HashSet<&str> = ["aaX_1", "aaX_2", "aaY_1"].into();
            for idx in 3..6 {
                assert!(source_names.contains(replacement(&lines, idx)));
            }

            // Two destination characters against two source characters: no
            // padding, so each destination character draws from one source
            // character only.
            let mut by_char: HashMap<&str, HashSet<&str>> = HashMap::new();
            for idx in 3..6 {
                let src_char = &replacement(&lines, idx)[1..3];
                by_char.entry(lines[idx].character()).or_default().insert(src_char);
            }
            for chars in by_char.values() {
                assert_eq!(chars.len(), 1);
            }
            let used: HashSet<&str> = by_char.values().flatten().copied().collect();
            assert_eq!(used.len(), 2);
        }
    }

    #[test]
    fn swap_characters_pad_with_whole_world() {
        let mut lines = catalog();
        // bb has two characters, cc only one.
        let pair = PoolPair { destination: vec![3, 4, 5], source: vec![6] };
        let mut rng = StdRng::seed_from_u64(2);
        pair_characters(&mut lines, &pair, Mode::Swap, &mut rng).unwrap();
        for idx in 3..6 {
            assert_eq!(replacement(&lines, idx), "ccQ_1");
        }
    }

    #[test]
    fn empty_source_world_fails_loudly() {
        let mut lines = catalog();
        let pair = PoolPair { destination: vec![0], source: vec![] };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pair_characters(&mut lines, &pair, Mode::Swap, &mut rng).is_err());
    }
}
