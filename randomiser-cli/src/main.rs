use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

use event_voice_core::{run, RandomiserSettings, Result, SettingsFile};

#[derive(Debug, Parser)]
#[command(
    name = "kh2-event-voice-randomiser",
    version,
    about = "Randomises cutscene voice lines and writes a mod manifest"
)]
struct Args {
    /// Settings document; missing means defaults.
    #[arg(long, default_value = "settings.yml")]
    settings: PathBuf,

    /// Voice identifier list, one per line.
    #[arg(long, default_value = "eventvoice.txt")]
    voices: PathBuf,

    #[arg(long, default_value = "mod.yml")]
    output: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    /// Mix, Separate or Swap.
    #[arg(long)]
    world_mode: Option<String>,

    /// Mix, Separate or Swap.
    #[arg(long)]
    character_mode: Option<String>,

    /// PC or PS2.
    #[arg(long)]
    platform: Option<String>,

    #[arg(long)]
    language: Option<String>,

    /// Verbose logging and a spoiler log next to the manifest.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Print the resolved settings as JSON and exit.
    #[arg(long, default_value_t = false)]
    dump_settings: bool,
}

/// Settings file first, then command-line overrides, then validation.
fn resolve_settings(args: &Args) -> Result<RandomiserSettings> {
    let mut file = SettingsFile::load(&args.settings)?;

    if let Some(mode) = &args.world_mode {
        file.world_mode = Some(mode.clone());
    }
    if let Some(mode) = &args.character_mode {
        file.character_mode = Some(mode.clone());
    }
    if let Some(platform) = &args.platform {
        file.platform = Some(platform.clone());
    }
    if let Some(language) = &args.language {
        file.language = Some(language.clone());
    }
    if args.seed.is_some() {
        file.seed = args.seed;
    }

    let mut settings = file.validate(args.voices.clone(), args.output.clone())?;
    settings.debug = args.debug;
    Ok(settings)
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let settings = match resolve_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if args.dump_settings {
        match serde_json::to_string_pretty(&settings) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    match run(settings) {
        Ok(summary) => {
            println!(
                "Randomised {} voice lines (seed {}) -> {}",
                summary.lines,
                summary.seed,
                summary.manifest_path.display()
            );
            if let Some(path) = summary.spoiler_path {
                println!("Spoiler log: {}", path.display());
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
