use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use zebrafish_lib::app::{init_logging, App};

#[derive(Parser, Debug)]
#[command(author, version, about = "Boid-style zebrafish flocking simulation", long_about = None)]
struct Args {
    /// Config file path; written with defaults if missing
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Override the RNG seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Write final agent states to this JSON file
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut app = App::new(&args.config, args.seed)?;
    app.run(args.ticks)?;

    if let Some(path) = &args.snapshot {
        app.write_snapshot(path)?;
    }
    Ok(())
}
