// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command definitions and their execution.
//!
//! Nothing here ever prints a pairing. `draw` reports counts and paths,
//! `reveal` shows the one pairing encoded in the link it is given.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::{DrawConfig, DEFAULT_CONFIG_FILE};
use crate::error::CliError;
use crate::generator::Generator;
use crate::reveal::{self, RevealPayload};

/// Secret Santa draw with private reveal links.
#[derive(Debug, Parser)]
#[command(name = "santa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw assignments and write the reveal links
    Draw(DrawArgs),

    /// Validate the config and check that a draw is possible
    Check(CheckArgs),

    /// Show what a reveal link decodes to
    Reveal(RevealArgs),
}

/// Arguments for the draw command. Flags override the config file.
#[derive(Debug, Args)]
pub struct DrawArgs {
    /// Configuration file path
    #[arg(short, long, env = "SANTA_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bound on randomized attempts
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Manifest path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write one link file per giver into this directory
    #[arg(long)]
    pub links_dir: Option<PathBuf>,

    /// Also write one QR code image per giver into this directory
    #[arg(long)]
    pub qr_dir: Option<PathBuf>,

    /// Skip the perfect-matching check and go straight to attempts
    #[arg(long)]
    pub no_precheck: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Configuration file path
    #[arg(short, long, env = "SANTA_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Args)]
pub struct RevealArgs {
    /// A link from the manifest
    pub link: String,
}

/// What a draw wrote, for the summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawReport {
    pub participants: usize,
    pub attempts: u32,
    pub manifest: PathBuf,
    pub link_files: Vec<PathBuf>,
    pub qr_files: Vec<PathBuf>,
}

/// Run a parsed command, printing its summary to stdout.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Draw(args) => {
            let report = execute_draw(&args)?;
            println!(
                "Wrote {} reveal links to {}",
                report.participants,
                report.manifest.display()
            );
            if let Some(dir) = report.link_files.first().and_then(|p| p.parent()) {
                println!("Wrote {} link files to {}", report.link_files.len(), dir.display());
            }
            if let Some(dir) = report.qr_files.first().and_then(|p| p.parent()) {
                println!("Wrote {} QR codes to {}", report.qr_files.len(), dir.display());
            }
        }
        Command::Check(args) => {
            let participants = execute_check(&args.config)?;
            println!(
                "{}: {} participants, draw is possible",
                args.config.display(),
                participants
            );
        }
        Command::Reveal(args) => {
            let payload = execute_reveal(&args.link)?;
            println!("{} gives to {}", payload.giver, payload.recipient);
        }
    }
    Ok(())
}

/// Load the config, apply overrides, draw, verify and write the outputs.
pub fn execute_draw(args: &DrawArgs) -> Result<DrawReport, CliError> {
    let mut config = DrawConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(dir) = &args.links_dir {
        config.links_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.qr_dir {
        config.qr_dir = Some(dir.clone());
    }
    config.validate()?;

    let options = config.draw_options().with_precheck(!args.no_precheck);
    let generator = Generator::new(
        config.participants.iter().cloned(),
        &config.forbidden_set(),
        options,
    )?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let outcome = generator.generate_detailed(&mut rng)?;
    reveal::verify_assignment(&outcome.assignment, &config.participants)?;

    let base_url = config.base_url()?;
    let file =
        File::create(&config.output).map_err(|source| write_error(&config.output, source))?;
    reveal::write_manifest(BufWriter::new(file), &outcome.assignment, &base_url)
        .map_err(|source| write_error(&config.output, source))?;
    info!(path = %config.output.display(), "wrote manifest");

    let link_files = match &config.links_dir {
        Some(dir) => reveal::write_link_files(dir, &outcome.assignment, &base_url)
            .map_err(|source| write_error(dir, source))?,
        None => Vec::new(),
    };
    let qr_files = match &config.qr_dir {
        Some(dir) => reveal::write_qr_codes(dir, &outcome.assignment, &base_url)
            .map_err(|source| write_error(dir, source))?,
        None => Vec::new(),
    };

    Ok(DrawReport {
        participants: outcome.assignment.len(),
        attempts: outcome.attempts,
        manifest: config.output,
        link_files,
        qr_files,
    })
}

/// Validate the config and run the feasibility checks without drawing.
///
/// Returns the number of participants.
pub fn execute_check(path: &Path) -> Result<usize, CliError> {
    let config = DrawConfig::load(path)?;
    let generator = Generator::new(
        config.participants.iter().cloned(),
        &config.forbidden_set(),
        config.draw_options(),
    )?;
    generator.check_feasible()?;
    Ok(config.participants.len())
}

pub fn execute_reveal(link: &str) -> Result<RevealPayload, CliError> {
    Ok(reveal::decode_reveal_link(link)?)
}

fn write_error(path: &Path, source: std::io::Error) -> CliError {
    CliError::Write {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, DrawError};
    use std::fs;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("santa.toml");
        fs::write(&path, body).unwrap();
        path
    }

    fn draw_args(config: PathBuf, output: PathBuf) -> DrawArgs {
        DrawArgs {
            config,
            seed: Some(7),
            max_attempts: None,
            output: Some(output),
            links_dir: None,
            qr_dir: None,
            no_precheck: false,
        }
    }

    const GROUP: &str = r#"
        participants = ["Caleb", "Chuck", "Laura", "Rakan", "Leah"]
        forbidden_pairs = [["Chuck", "Laura"], ["Rakan", "Leah"]]
        base_url = "https://example.com/reveal"
    "#;

    #[test]
    fn test_parse_draw_flags() {
        let cli = Cli::try_parse_from([
            "santa",
            "draw",
            "--config",
            "x.toml",
            "--seed",
            "3",
            "--max-attempts",
            "9",
            "--qr-dir",
            "qr",
            "--no-precheck",
        ])
        .unwrap();
        match cli.command {
            Command::Draw(args) => {
                assert_eq!(args.config, PathBuf::from("x.toml"));
                assert_eq!(args.seed, Some(3));
                assert_eq!(args.max_attempts, Some(9));
                assert!(args.no_precheck);
                assert_eq!(args.qr_dir, Some(PathBuf::from("qr")));
                assert_eq!(args.output, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_draw_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let output = dir.path().join("out.csv");

        let report = execute_draw(&draw_args(config, output.clone())).unwrap();
        assert_eq!(report.participants, 5);
        assert_eq!(report.manifest, output);
        assert!(report.link_files.is_empty());
        assert!(report.qr_files.is_empty());

        let text = fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("giver,url"));
        assert_eq!(lines.count(), 5);
    }

    #[test]
    fn test_draw_is_reproducible_with_seed() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");

        execute_draw(&draw_args(config.clone(), first.clone())).unwrap();
        execute_draw(&draw_args(config, second.clone())).unwrap();
        assert_eq!(fs::read_to_string(first).unwrap(), fs::read_to_string(second).unwrap());
    }

    #[test]
    fn test_draw_with_link_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let mut args = draw_args(config, dir.path().join("out.csv"));
        args.links_dir = Some(dir.path().join("links"));

        let report = execute_draw(&args).unwrap();
        assert_eq!(report.link_files.len(), 5);
        assert!(dir.path().join("links").join("Caleb.txt").exists());
    }

    #[test]
    fn test_draw_with_qr_codes() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let mut args = draw_args(config, dir.path().join("out.csv"));
        args.qr_dir = Some(dir.path().join("qr"));

        let report = execute_draw(&args).unwrap();
        assert_eq!(report.qr_files.len(), 5);
        for path in &report.qr_files {
            assert_eq!(path.extension().unwrap(), "png");
            assert!(fs::metadata(path).unwrap().len() > 0);
        }
        assert!(dir.path().join("qr").join("Leah.png").exists());
    }

    #[test]
    fn test_qr_dir_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!("{}\nqr_dir = {:?}\n", GROUP, dir.path().join("codes"));
        let config = write_config(dir.path(), &body);

        let report = execute_draw(&draw_args(config, dir.path().join("out.csv"))).unwrap();
        assert_eq!(report.qr_files.len(), 5);
        assert!(dir.path().join("codes").join("Caleb.png").exists());
    }

    #[test]
    fn test_draw_infeasible_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(
            dir.path(),
            r#"
            participants = ["A", "B"]
            forbidden_pairs = [["A", "B"]]
            base_url = "https://example.com/reveal"
            "#,
        );
        let output = dir.path().join("out.csv");

        let err = execute_draw(&draw_args(config, output.clone())).unwrap_err();
        assert!(matches!(err, CliError::Draw(ref e) if e.is_infeasible()));
        assert!(!output.exists());
    }

    #[test]
    fn test_zero_attempts_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let mut args = draw_args(config, dir.path().join("out.csv"));
        args.max_attempts = Some(0);

        let err = execute_draw(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::ZeroAttempts)));
    }

    #[test]
    fn test_check() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        assert_eq!(execute_check(&config).unwrap(), 5);

        let impossible = write_config(
            dir.path(),
            r#"
            participants = ["Solo"]
            base_url = "https://example.com/reveal"
            "#,
        );
        let err = execute_check(&impossible).unwrap_err();
        assert!(matches!(err, CliError::Draw(DrawError::Infeasible { .. })));
    }

    #[test]
    fn test_reveal_round_trip_through_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), GROUP);
        let output = dir.path().join("out.csv");
        execute_draw(&draw_args(config, output.clone())).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        for row in text.lines().skip(1) {
            let (giver, link) = row.split_once(',').unwrap();
            let payload = execute_reveal(link).unwrap();
            assert_eq!(payload.giver, giver);
            assert_ne!(payload.recipient, giver);
        }
    }
}
