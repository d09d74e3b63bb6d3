//! Output formatting helpers for CLI commands

use crate::routing::{selection_mode, WeightError};
use crate::store::{Business, ReviewPlatform};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

/// View model for one platform row
#[derive(Debug, Clone, Serialize)]
pub struct PlatformView {
    pub name: String,
    pub url: String,
    pub weight: u32,
    pub order: u32,
}

impl From<&ReviewPlatform> for PlatformView {
    fn from(platform: &ReviewPlatform) -> Self {
        Self {
            name: platform.name.clone(),
            url: platform.url.clone(),
            weight: platform.weight,
            order: platform.order,
        }
    }
}

/// View model for business display
#[derive(Debug, Clone, Serialize)]
pub struct BusinessView {
    pub name: String,
    pub slug: String,
    pub email: String,
    /// `single`, `round_robin`, `weighted_random`, or `none`
    pub mode: String,
    pub platforms: Vec<PlatformView>,
}

impl From<&Business> for BusinessView {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            slug: business.slug.clone(),
            email: business.email.clone(),
            mode: selection_mode(&business.platforms)
                .map(|m| m.as_str())
                .unwrap_or("none")
                .to_string(),
            platforms: business.platforms.iter().map(PlatformView::from).collect(),
        }
    }
}

/// Result of checking a weight list
#[derive(Debug, Clone, Serialize)]
pub struct WeightReport {
    pub weights: Vec<u32>,
    pub total: u64,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WeightReport {
    pub fn new(weights: Vec<u32>, result: Result<(), WeightError>) -> Self {
        let total = weights.iter().map(|&w| u64::from(w)).sum();
        Self {
            weights,
            total,
            valid: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        }
    }
}

/// Format businesses as a table, one row per platform
pub fn format_businesses_table(businesses: &[BusinessView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Business", "Slug", "Mode", "Platform", "Weight", "URL"]);

    for b in businesses {
        if b.platforms.is_empty() {
            table.add_row(vec![
                Cell::new(&b.name),
                Cell::new(&b.slug),
                Cell::new(mode_label(&b.mode)),
                Cell::new("-"),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }

        for (i, p) in b.platforms.iter().enumerate() {
            let (name, slug, mode) = if i == 0 {
                (b.name.as_str(), b.slug.as_str(), mode_label(&b.mode))
            } else {
                ("", "", String::new())
            };
            table.add_row(vec![
                Cell::new(name),
                Cell::new(slug),
                Cell::new(mode),
                Cell::new(&p.name),
                Cell::new(weight_label(p.weight)),
                Cell::new(if p.url.is_empty() { "(not set)" } else { p.url.as_str() }),
            ]);
        }
    }

    table.to_string()
}

/// Format businesses as JSON
pub fn format_businesses_json(businesses: &[BusinessView]) -> String {
    serde_json::to_string_pretty(&json!({
        "businesses": businesses
    }))
    .unwrap_or_default()
}

/// Format a weight check for humans
pub fn format_weight_report(report: &WeightReport) -> String {
    let list = report
        .weights
        .iter()
        .map(|w| format!("{}%", w))
        .collect::<Vec<_>>()
        .join(" + ");

    match report.error {
        None => format!("{} {} = {}%", "✓".green(), list, report.total),
        Some(ref e) => format!("{} {} = {}%\n  {}", "✗".red(), list, report.total, e),
    }
}

/// Format a weight check as JSON
pub fn format_weight_report_json(report: &WeightReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_default()
}

fn mode_label(mode: &str) -> String {
    match mode {
        "round_robin" => "round robin".green().to_string(),
        "weighted_random" => "weighted".yellow().to_string(),
        "single" => "single".cyan().to_string(),
        _ => "disabled".red().to_string(),
    }
}

fn weight_label(weight: u32) -> String {
    if weight == 0 {
        "off".dimmed().to_string()
    } else {
        format!("{}%", weight)
    }
}
