use std::io::prelude::*;
use std::path::PathBuf;

use clap::Parser;
use ethash::{Params, SizeTable, Sizes};

/// Prints seed, sizes and cache digest for a range of epochs.
#[derive(Parser, Debug)]
#[command(name = "epoch")]
struct Args {
    from: u64,
    to: u64,
    /// JSON file overriding the mainnet parameters.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Append results to this file as well.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also generate the full dataset and print its digest. Slow.
    #[arg(long)]
    dataset: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let sizes = match &args.params {
        Some(path) => {
            let params: Params = serde_json::from_slice(&std::fs::read(path)?)?;
            Sizes::new(params, SizeTable::empty())?
        }
        None => Sizes::mainnet(),
    };

    println!(
        "Calculating caches from {} to {} (i.e {} epochs)",
        args.from,
        args.to,
        args.to.saturating_sub(args.from)
    );

    let mut out = match &args.out {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    for epoch in args.from..args.to {
        let dag = ethash::LightDAG::from_epoch(epoch, &sizes)?;
        let mut line = format!(
            "{}:seed={:?} cache={} dataset={} cache_digest=0x{}",
            epoch,
            dag.seed(),
            dag.cache_size(),
            dag.full_size(),
            hex::encode(ethash::keccak_256(dag.cache()))
        );
        if args.dataset {
            let dataset = dag.dataset()?;
            line.push_str(&format!(
                " dataset_digest=0x{}",
                hex::encode(ethash::keccak_256(&dataset))
            ));
        }
        println!("{}", line);
        if let Some(out) = out.as_mut() {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
