//! Command-line interfaces for the loss plotter and the region evaluator

use crate::analysis::curve::{breakeven, precision_recall};
use crate::analysis::evaluator::{TALLY_WIDTH, evaluate_image};
use crate::analysis::loss_log;
use crate::analysis::relax::DiskRelaxation;
use crate::io::chart::{ChartFormat, render_loss_chart, render_pre_rec_chart};
use crate::io::configuration::{
    DEFAULT_LOGFILE, DEFAULT_OFFSET, DEFAULT_OUTFILE, DEFAULT_PAD, DEFAULT_STEPS, NUM_RATIO,
    RELAX_RADIUS,
};
use crate::io::error::{EvalError, Result, invalid_source};
use crate::io::labels::{collect_labels, crop_to_prediction, load_label};
use crate::io::predictions::PredictionIndex;
use crate::io::progress::EvalProgress;
use clap::Parser;
use ndarray::{Array3, s};
use std::path::PathBuf;

/// Command-line arguments for the training-loss plotter
#[derive(Parser)]
#[command(name = "draw-loss")]
#[command(version, about = "Plot per-epoch training loss from a text log")]
pub struct LossCli {
    /// Training log to scan
    #[arg(long, default_value = DEFAULT_LOGFILE)]
    pub logfile: PathBuf,

    /// Chart file to write
    #[arg(long, default_value = DEFAULT_OUTFILE)]
    pub outfile: PathBuf,

    /// Chart output format
    #[arg(long, value_enum, default_value = "png")]
    pub format: ChartFormat,
}

/// Run the loss plotter end to end
///
/// # Errors
///
/// Returns an error if the log cannot be read, a matching line is malformed,
/// no epoch/loss pairs are found, or the chart cannot be written.
pub fn run_draw_loss(cli: &LossCli) -> Result<()> {
    let samples = loss_log::parse_log_file(&cli.logfile)?;
    if samples.is_empty() {
        return Err(EvalError::EmptyLog {
            path: cli.logfile.clone(),
        });
    }
    render_loss_chart(&samples, &cli.outfile, cli.format)
}

/// Command-line arguments for the relaxed precision-recall evaluator
#[derive(Parser)]
#[command(name = "eval-regions")]
#[command(
    version,
    about = "Patch-based relaxed precision-recall evaluation of segmentation maps"
)]
pub struct EvalCli {
    /// Directory of .npy prediction maps; charts land in a subdirectory of it
    #[arg(long = "result_dir", value_name = "DIR")]
    pub result_dir: PathBuf,

    /// Directory of .tif ground-truth label rasters
    #[arg(long = "test_map_dir", value_name = "DIR")]
    pub test_map_dir: PathBuf,

    /// Border padding applied during inference
    #[arg(long, default_value_t = DEFAULT_PAD)]
    pub pad: usize,

    /// Patchwise prediction offset
    #[arg(long, default_value_t = DEFAULT_OFFSET)]
    pub offset: usize,

    /// Number of binarization thresholds
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Chart output format
    #[arg(long, value_enum, default_value = "png")]
    pub format: ChartFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Orchestrates the label sweep, aggregation, and chart output
pub struct RegionEvaluator {
    cli: EvalCli,
    progress: Option<EvalProgress>,
}

impl RegionEvaluator {
    /// Create an evaluator from CLI arguments
    pub const fn new(cli: EvalCli) -> Self {
        Self {
            cli,
            progress: None,
        }
    }

    /// Run the evaluation end to end
    ///
    /// Aggregates relaxed tallies over every label raster, then writes one
    /// precision-recall chart per class channel under
    /// `<result_dir>/ratio-<NUM_RATIO>/`.
    ///
    /// # Errors
    ///
    /// Returns an error at the first failing record: an unreadable prediction
    /// or label, a label without a matching prediction, a crop overrun, a
    /// channel-count mismatch, a channel with no breakeven candidate, or an
    /// unwritable chart.
    pub fn process(&mut self) -> Result<()> {
        let predictions = PredictionIndex::from_dir(&self.cli.result_dir)?;
        let channels = predictions.channels()?;

        let labels = collect_labels(&self.cli.test_map_dir)?;
        if labels.is_empty() {
            return Err(invalid_source(format!(
                "no .tif label rasters found in '{}'",
                self.cli.test_map_dir.display()
            )));
        }

        if !self.cli.quiet {
            self.progress = Some(EvalProgress::new(labels.len()));
        }

        let matcher = DiskRelaxation::new(RELAX_RADIUS);
        let mut evals = Array3::<f64>::zeros((self.cli.steps, channels, TALLY_WIDTH));
        for label_path in &labels {
            if let Some(ref progress) = self.progress {
                progress.start_label(label_path);
            }

            let pred = predictions.load_for_label(label_path)?;
            let (rows, cols, pred_channels) = pred.dim();
            if pred_channels != channels {
                return Err(invalid_source(format!(
                    "prediction for '{}' has {pred_channels} channels, expected {channels}",
                    label_path.display()
                )));
            }

            let label = load_label(label_path)?;
            let label = crop_to_prediction(
                &label,
                label_path,
                self.cli.pad,
                self.cli.offset,
                (rows, cols),
            )?;

            evals += &evaluate_image(&pred, &label, self.cli.steps, &matcher)?;

            if let Some(ref progress) = self.progress {
                progress.complete_label();
            }
        }
        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        let out_dir = self.cli.result_dir.join(format!("ratio-{NUM_RATIO:.2}"));
        for channel in 0..channels {
            let points = precision_recall(evals.slice(s![.., channel, ..]));
            let point = breakeven(&points, channel)?;
            let file = out_dir.join(format!(
                "pre_rec_{channel}.{}",
                self.cli.format.extension()
            ));
            render_pre_rec_chart(&points, point, channel, &file, self.cli.format)?;
        }

        Ok(())
    }
}
