//! Formatted terminal output.

use crate::app::pipeline::{GridOutput, RenderedGrid};
use crate::domain::{GridDescriptor, Quantity};
use crate::grid::TargetGrid;

/// Outcome of one grid in a batch.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub name: String,
    /// `None` on success, otherwise the error message.
    pub error: Option<String>,
}

/// Descriptor header followed by both labelled literal arrays.
///
/// The literal arrays themselves carry no header; labels sit on their own lines.
pub fn format_literal_sections(descriptor: Option<&GridDescriptor>, rendered: &RenderedGrid) -> String {
    let mut out = String::new();

    if let Some(d) = descriptor {
        out.push_str(&format!("{d}\n"));
    }
    for quantity in Quantity::ALL {
        let literal = match quantity {
            Quantity::Luminosity => &rendered.luminosity,
            Quantity::Temperature => &rendered.temperature,
        };
        out.push_str(&format!("\n{}\n\n", quantity.label()));
        out.push_str(literal);
        out.push('\n');
    }

    out
}

/// Format the per-grid summary (ingest counts + per-mass coverage).
pub fn format_grid_summary(output: &GridOutput) -> String {
    let mut out = String::new();
    let stats = &output.stats;
    let (rows, cols) = output.target.shape();

    out.push_str(&format!("=== {} ===\n", output.descriptor));
    out.push_str(&format!(
        "Tables: {} | rows read: {} | dropped (zero/invalid age): {}\n",
        stats.files.len(),
        stats.rows_read,
        stats.rows_dropped
    ));
    out.push_str(&format!("Grid: {rows} masses x {cols} ages\n"));
    out.push_str(&format!("Mass axis: {}\n", fmt_vec(output.target.mass_axis(), 2)));

    out.push_str(
        format!(
            "{:>6} {:>8} {:>10} {:>10} {:>10}\n",
            "mass", "samples", "log(t)min", "log(t)max", "available"
        )
        .as_str(),
    );
    out.push_str(format!("{:-<6} {:-<8} {:-<10} {:-<10} {:-<10}\n", "", "", "", "", "").as_str());
    for c in &stats.coverage {
        out.push_str(&format!(
            "{:>6.2} {:>8} {:>10.4} {:>10.4} {:>10}\n",
            c.mass, c.samples, c.log_age_min, c.log_age_max, c.available
        ));
    }

    // Boundary rows are extrapolated, not resampled.
    for (row, label) in [(0, "low"), (rows - 1, "high")] {
        let available = (0..cols).filter(|&col| output.luminosity.get(row, col).is_some()).count();
        out.push_str(&format!(
            "{label} boundary {:.2}: {available}/{cols} available\n",
            output.target.mass_axis()[row]
        ));
    }

    out
}

/// Describe the target axes for one recognized real-mass count.
pub fn format_target(target: &TargetGrid) -> String {
    let log_ages = target.log_age_axis();
    let ages = target.ages_gyr();
    let mut out = String::new();

    out.push_str(&format!("Mass axis ({}): {}\n", target.mass_axis().len(), fmt_vec(target.mass_axis(), 2)));
    out.push_str(&format!(
        "  synthetic boundaries: {:.2}, {:.2}\n",
        target.low_boundary(),
        target.high_boundary()
    ));
    out.push_str(&format!(
        "Age axis ({}): log10(t/yr) {:.2}..{:.2} ({:.6}..{:.6} Gyr)\n",
        log_ages.len(),
        log_ages[0],
        log_ages[log_ages.len() - 1],
        ages[0],
        ages[ages.len() - 1]
    ));

    out
}

/// Format the batch tally, listing failed grids.
pub fn format_batch_summary(outcomes: &[BatchOutcome]) -> String {
    let failed: Vec<&BatchOutcome> = outcomes.iter().filter(|o| o.error.is_some()).collect();
    let mut out = format!(
        "Batch: {} grids, {} built, {} failed\n",
        outcomes.len(),
        outcomes.len() - failed.len(),
        failed.len()
    );
    for o in failed {
        out.push_str(&format!("  {}: {}\n", o.name, o.error.as_deref().unwrap_or("")));
    }
    out
}

fn fmt_vec(v: &[f64], precision: usize) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.precision$}")).collect();
    format!("[{}]", parts.join(", "))
}
