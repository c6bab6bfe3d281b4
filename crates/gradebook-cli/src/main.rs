//! gradebook CLI — runs the student demo against a subjects file.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use gradebook_core::journal::{FileLog, OperationLog};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Track a student's grades and test scores in a CSV file"
)]
struct Cli {
    /// CSV file with subjects (e.g. subjects.csv)
    subjects_file: PathBuf,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Operation log file (overrides the config)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradebook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = gradebook_core::load_config_from(cli.config.as_deref())?;
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }

    tracing::debug!(
        subjects_file = %cli.subjects_file.display(),
        log_file = %config.log_file.display(),
        "starting demo run"
    );

    let log = Arc::new(FileLog::open(&config.log_file)?);
    log.info("Program start");

    match commands::demo::execute(&cli.subjects_file, &config.student_name, log.clone()) {
        Ok(()) => {
            log.info("Program stop");
            Ok(())
        }
        Err(e) => {
            log.error(&format!("Program failed: {e:#}"));
            Err(e)
        }
    }
}
