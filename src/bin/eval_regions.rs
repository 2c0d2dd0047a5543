//! CLI entry point for the relaxed precision-recall evaluator

use clap::Parser;
use urbaneval::io::cli::{EvalCli, RegionEvaluator};

fn main() -> urbaneval::Result<()> {
    let cli = EvalCli::parse();
    let mut evaluator = RegionEvaluator::new(cli);
    evaluator.process()
}
