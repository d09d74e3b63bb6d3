//! Weights command implementation

use crate::cli::output::{format_weight_report, format_weight_report_json, WeightReport};
use crate::cli::{WeightsCheckArgs, WeightsFillArgs};
use crate::routing::{fill_remaining, validate_weights};

/// Handle `reviewgate weights check`.
///
/// Returns the rendered report and whether the list is valid.
pub fn handle_weights_check(args: &WeightsCheckArgs) -> (String, bool) {
    let report = WeightReport::new(args.weights.clone(), validate_weights(&args.weights));
    let valid = report.valid;
    (render(&report, args.json), valid)
}

/// Handle `reviewgate weights fill`.
pub fn handle_weights_fill(
    args: &WeightsFillArgs,
) -> Result<(String, bool), Box<dyn std::error::Error>> {
    let mut weights = args.weights.clone();
    let filled = fill_remaining(&mut weights, args.slot).ok_or_else(|| {
        format!(
            "Slot {} is out of range for {} weight(s)",
            args.slot,
            weights.len()
        )
    })?;
    tracing::debug!(slot = args.slot, filled, "Auto-filled weight slot");

    let result = validate_weights(&weights);
    let report = WeightReport::new(weights, result);
    let valid = report.valid;
    Ok((render(&report, args.json), valid))
}

fn render(report: &WeightReport, json: bool) -> String {
    if json {
        format_weight_report_json(report)
    } else {
        format_weight_report(report)
    }
}
