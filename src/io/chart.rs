//! Chart rendering for loss curves and precision-recall curves

use crate::analysis::curve::PrPoint;
use crate::analysis::loss_log::EpochLoss;
use crate::io::configuration::{CHART_HEIGHT, CHART_WIDTH};
use crate::io::error::{EvalError, Result, chart_error};
use plotters::coord::Shift;
use plotters::prelude::{
    BLACK, BLUE, BitMapBackend, ChartBuilder, Color, Cross, DrawingArea, DrawingBackend,
    IntoDrawingArea, LineSeries, PathElement, RED, SVGBackend, SeriesLabelPosition, WHITE,
};
use std::path::Path;

/// Output format for rendered charts
///
/// An explicit flag replaces platform-sniffing backend selection; both
/// backends render headlessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartFormat {
    /// Rasterized PNG output
    Png,
    /// Vector SVG output
    Svg,
}

impl ChartFormat {
    /// File extension for the format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Render the training-loss curve
///
/// # Errors
///
/// Returns a `FileSystem` error if the parent directory cannot be created and
/// a `ChartRender` error if drawing or saving fails.
pub fn render_loss_chart(samples: &[EpochLoss], path: &Path, format: ChartFormat) -> Result<()> {
    ensure_parent(path)?;
    match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            draw_loss(&root, samples).map_err(|reason| chart_error(path, &reason))
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            draw_loss(&root, samples).map_err(|reason| chart_error(path, &reason))
        }
    }
}

/// Render one channel's precision-recall curve with its breakeven marker
///
/// # Errors
///
/// Returns a `FileSystem` error if the parent directory cannot be created and
/// a `ChartRender` error if drawing or saving fails.
pub fn render_pre_rec_chart(
    points: &[PrPoint],
    breakeven: PrPoint,
    channel: usize,
    path: &Path,
    format: ChartFormat,
) -> Result<()> {
    ensure_parent(path)?;
    match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            draw_pre_rec(&root, points, breakeven, channel)
                .map_err(|reason| chart_error(path, &reason))
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
            draw_pre_rec(&root, points, breakeven, channel)
                .map_err(|reason| chart_error(path, &reason))
        }
    }
}

fn draw_loss<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    samples: &[EpochLoss],
) -> std::result::Result<(), String> {
    root.fill(&WHITE).map_err(|err| err.to_string())?;

    let x_max = samples.iter().map(|s| s.epoch).max().unwrap_or(1).max(1);
    let y_max = samples.iter().map(|s| s.loss).fold(f64::EPSILON, f64::max);

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption("Training loss", ("sans-serif", 22))
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0u32..x_max, 0f64..y_max * 1.05)
        .map_err(|err| err.to_string())?;

    chart
        .configure_mesh()
        .x_desc("epoch")
        .y_desc("loss")
        .draw()
        .map_err(|err| err.to_string())?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.epoch, s.loss)),
            &BLUE,
        ))
        .map_err(|err| err.to_string())?
        .label("training loss")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.filled()));

    chart
        .draw_series(
            samples
                .iter()
                .map(|s| Cross::new((s.epoch, s.loss), 4, BLUE.filled())),
        )
        .map_err(|err| err.to_string())?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|err| err.to_string())?;

    root.present().map_err(|err| err.to_string())
}

fn draw_pre_rec<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[PrPoint],
    breakeven: PrPoint,
    channel: usize,
) -> std::result::Result<(), String> {
    root.fill(&WHITE).map_err(|err| err.to_string())?;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(
            format!("Precision-recall, channel {channel}"),
            ("sans-serif", 22),
        )
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..1.05f64, 0f64..1.05f64)
        .map_err(|err| err.to_string())?;

    chart
        .configure_mesh()
        .x_desc("precision")
        .y_desc("recall")
        .draw()
        .map_err(|err| err.to_string())?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.precision, p.recall)),
            &BLUE,
        ))
        .map_err(|err| err.to_string())?;

    chart
        .draw_series(std::iter::once(Cross::new(
            (breakeven.precision, breakeven.recall),
            6,
            RED.filled(),
        )))
        .map_err(|err| err.to_string())?
        .label(format!("breakeven recall: {:.6}", breakeven.recall))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|err| err.to_string())?;

    root.present().map_err(|err| err.to_string())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| EvalError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create chart directory",
                source,
            })?;
        }
    }
    Ok(())
}
