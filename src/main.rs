// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `santa`: run a Secret Santa draw and write private reveal links.

use clap::Parser;
use santa_draw::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout carries only the summary
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = cli::run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
