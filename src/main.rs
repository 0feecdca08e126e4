use std::path::PathBuf;

use clap::Parser;
use easel::config::EditorConfig;
use easel::replay::{self, ReplayError};

#[derive(Parser, Debug)]
#[command(name = "easel", about = "Replay an editor event script and print the export snapshot")]
struct Cli {
    /// JSON event script to replay.
    script: PathBuf,

    /// Pretty-print the snapshot.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), ReplayError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env()?;
    let script = replay::load(&cli.script)?;

    tracing::info!(script = %cli.script.display(), events = script.events.len(), "replaying");
    let outcome = replay::run(&script, config);

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&outcome.snapshot)?
    } else {
        serde_json::to_string(&outcome.snapshot)?
    };
    println!("{rendered}");
    Ok(())
}
