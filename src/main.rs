//! Assemble the credit-worthiness network and print joint samples drawn from it.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::{Builder, Env};
use log::info;

use std::io::{self, Write};

use creditnet::{credit, render, ForwardSampler, Sampler};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    /// `name=state` pairs separated by spaces
    Text,

    /// One JSON object per sample
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of joint samples to draw, printed one per line
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    samples: u64,

    /// Seed the sampler for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output format of the samples
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the attached CPDs before sampling
    #[arg(long)]
    show_cpds: bool,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

/// Assemble the network and write the requested output to `out`
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let net = credit::network().context("failed to assemble the credit-worthiness network")?;

    if args.show_cpds {
        for cpd in net.model.cpds() {
            writeln!(out, "{}\n", render::cpd_table(&net.model, cpd)?)?;
        }
    }

    let n = args.samples as usize;
    let samples = match args.seed {
        Some(seed) => ForwardSampler::with_seed(&net.model, seed)?.sample_n(n)?,
        None => ForwardSampler::new(&net.model)?.sample_n(n)?,
    };
    info!("drew {} samples", samples.len());

    for sample in samples.iter() {
        let line = match args.format {
            Format::Text => render::text_line(&net.model, sample)?,
            Format::Json => render::json_line(&net.model, sample)?,
        };
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
