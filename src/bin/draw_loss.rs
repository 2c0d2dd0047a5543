//! CLI entry point for the training-loss plotter

use clap::Parser;
use urbaneval::io::cli::{LossCli, run_draw_loss};

fn main() -> urbaneval::Result<()> {
    let cli = LossCli::parse();
    run_draw_loss(&cli)
}
