//! saavy - console rhythm machine
//!
//! Run with: cargo run -- [bank.json] [--bounce out.wav] [--bars N] [--config engine.json]
//!
//! Without `--bounce` the machine plays through the default output device
//! and reads commands from stdin (type `help`). With `--bounce` the current
//! pattern is rendered offline to a WAV file instead.

mod app;
mod console;

use std::{fs, path::PathBuf};

use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use log::info;

use app::Rhythm;
use saavy_rhythm::{
    engine::offline::{self, DEFAULT_TAIL},
    sequencing::PatternBank,
    voices::{SharedVoiceParams, VoiceParams},
    EngineConfig,
};

#[derive(Debug, Default)]
struct Args {
    bank: Option<PathBuf>,
    config: Option<PathBuf>,
    bounce: Option<PathBuf>,
    bars: usize,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        bars: 1,
        ..Args::default()
    };
    let mut it = std::env::args().skip(1);

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--bounce" => {
                args.bounce = Some(it.next().ok_or_else(|| eyre!("--bounce needs a path"))?.into())
            }
            "--config" => {
                args.config = Some(it.next().ok_or_else(|| eyre!("--config needs a path"))?.into())
            }
            "--bars" => {
                let bars = it.next().ok_or_else(|| eyre!("--bars needs a number"))?;
                args.bars = bars.parse().wrap_err_with(|| format!("bad bar count {bars:?}"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path if args.bank.is_none() => args.bank = Some(path.into()),
            extra => bail!("unexpected argument {extra}"),
        }
    }
    Ok(args)
}

fn load_bank(path: Option<&PathBuf>) -> Result<PatternBank> {
    let Some(path) = path else {
        return Ok(PatternBank::new());
    };
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read bank {}", path.display()))?;
    let bank = PatternBank::from_json(&json)
        .wrap_err_with(|| format!("invalid bank {}", path.display()))?;
    info!("loaded bank from {}", path.display());
    Ok(bank)
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&json)
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = parse_args()?;
    let bank = load_bank(args.bank.as_ref())?;
    let config = load_config(args.config.as_ref())?;

    if let Some(path) = args.bounce {
        let pattern = bank.current();
        let params = SharedVoiceParams::new(VoiceParams::new());
        let samples = offline::bounce(pattern, params, &config, args.bars, DEFAULT_TAIL)?;
        offline::write_wav(&path, &samples, config.sample_rate as u32)?;

        println!(
            "Bounced {} ({} bar(s) at {} BPM) to {}",
            pattern.name,
            args.bars,
            pattern.bpm,
            path.display()
        );
        return Ok(());
    }

    Rhythm::new(config).bank(bank).run()
}
