//! Rendering of comparison results
//!
//! Tables are built with `comfy-table`: UTF-8 borders for the terminal,
//! pipe tables for markdown. JSON output serializes the same views.
//! Money is rounded to cents here and nowhere else.

use crate::compare::{Comparison, EngineView};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::types::{CostRecord, Engine, OfferingClass, PaymentOption, TermLabel};
use chrono::{DateTime, Utc};
use comfy_table::{presets, Cell, CellAlignment, Table};
use console::style;
use serde::Serialize;
use std::collections::HashSet;

/// Column headers, in display order
pub const COLUMNS: [&str; 16] = [
    "Region",
    "Instance Type",
    "Amortized Monthly Cost/instance ($)",
    "Number of Instances",
    "Term",
    "Offering Class",
    "Payment Option",
    "Upfront Cost / instance ($)",
    "Monthly Cost / instance ($)",
    "Total Cost for Term / instance ($)",
    "Savings ($)",
    "Savings (%)",
    "Total Upfront Cost ($)",
    "Total Monthly Cost ($)",
    "Total Amortized Monthly Cost ($)",
    "Total Cost for Term ($)",
];

/// A titled group of records rendered as one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub records: Vec<CostRecord>,
}

pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Cell values of one record, matching [`COLUMNS`]
pub fn record_row(record: &CostRecord) -> Vec<String> {
    vec![
        record.region.clone(),
        record.instance_type.clone(),
        format_money(record.amortized_monthly_cost),
        record.count.to_string(),
        record.term.to_string(),
        record.offering_label(),
        record.payment_label(),
        format_money(record.upfront_cost),
        format_money(record.monthly_cost),
        format_money(record.cost_for_term),
        format_money(record.savings),
        format_money(record.savings_percent),
        format_money(record.total_upfront_cost),
        format_money(record.total_monthly_cost),
        format_money(record.total_amortized_monthly_cost),
        format_money(record.total_cost_for_term),
    ]
}

/// One table per engine and term
pub fn engine_tables(comparison: &Comparison) -> Vec<ReportTable> {
    comparison
        .all_views()
        .into_iter()
        .map(|view| ReportTable {
            title: format!("{} Term Costs for {}", view.term, view.engine),
            records: view.records,
        })
        .collect()
}

/// One single-row table per (instance type, term, offering, payment option)
///
/// On-Demand baselines appear in both terms' views; only the first is kept.
pub fn offer_tables(comparison: &Comparison) -> Vec<ReportTable> {
    let mut seen: HashSet<(String, Engine, TermLabel, Option<OfferingClass>, Option<PaymentOption>)> =
        HashSet::new();
    let mut tables = Vec::new();

    for view in comparison.all_views() {
        for record in view.records {
            let key = (
                record.instance_type.clone(),
                record.engine,
                record.term,
                record.offering,
                record.payment_option,
            );
            if !seen.insert(key) {
                continue;
            }
            let title = match record.offering {
                Some(offering) => format!(
                    "Costs for {} {} {} {} ({})",
                    record.instance_type,
                    record.term,
                    offering,
                    record.payment_label(),
                    record.engine
                ),
                None => format!(
                    "Costs for {} {} ({})",
                    record.instance_type, record.term, record.engine
                ),
            };
            tables.push(ReportTable {
                title,
                records: vec![record],
            });
        }
    }
    tables
}

/// Render tables as text in the requested format
///
/// `OutputFormat::Json` is handled by [`render_json`]; here it falls back to
/// markdown so the function is total.
pub fn render_tables(tables: &[ReportTable], format: OutputFormat) -> String {
    let mut out = String::new();
    for table in tables {
        let title = match format {
            OutputFormat::Table => style(&table.title).bold().to_string(),
            OutputFormat::Markdown | OutputFormat::Json => format!("## {}", table.title),
        };
        out.push('\n');
        out.push_str(&title);
        out.push('\n');
        out.push_str(&build_table(&table.records, format).to_string());
        out.push('\n');
    }
    out
}

fn build_table(records: &[CostRecord], format: OutputFormat) -> Table {
    let mut table = Table::new();
    match format {
        OutputFormat::Table => table.load_preset(presets::UTF8_FULL),
        OutputFormat::Markdown | OutputFormat::Json => table.load_preset(presets::ASCII_MARKDOWN),
    };
    table.set_header(COLUMNS.to_vec());

    for record in records {
        table.add_row(record_row(record).into_iter().enumerate().map(|(i, value)| {
            // Region, type, term, offering and payment are text
            if matches!(i, 0 | 1 | 4 | 5 | 6) {
                Cell::new(value)
            } else {
                Cell::new(value).set_alignment(CellAlignment::Right)
            }
        }));
    }
    table
}

#[derive(Serialize)]
struct InventoryEntry<'a> {
    instance_type: &'a str,
    engine: Engine,
    count: u32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    region: &'a str,
    generated_at: DateTime<Utc>,
    inventory: Vec<InventoryEntry<'a>>,
    views: Vec<EngineView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offers: Option<Vec<ReportTable>>,
}

/// Whole comparison as pretty-printed JSON
pub fn render_json(comparison: &Comparison, group_by_offer: bool) -> Result<String> {
    let report = JsonReport {
        region: &comparison.region,
        generated_at: comparison.generated_at,
        inventory: comparison
            .inventory
            .iter()
            .map(|(key, count)| InventoryEntry {
                instance_type: &key.instance_type,
                engine: key.engine,
                count,
            })
            .collect(),
        views: comparison.all_views(),
        offers: group_by_offer.then(|| offer_tables(comparison)),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Full text output for a comparison
pub fn render(comparison: &Comparison, format: OutputFormat, group_by_offer: bool) -> Result<String> {
    if format == OutputFormat::Json {
        return render_json(comparison, group_by_offer);
    }
    if comparison.inventory.is_empty() {
        return Ok(format!("No available RDS instances in {}\n", comparison.region));
    }
    if comparison.all_views().is_empty() {
        return Ok(format!(
            "No priceable RDS instances in {} ({} running with unsupported engines)\n",
            comparison.region,
            comparison.inventory.total()
        ));
    }

    let mut out = render_tables(&engine_tables(comparison), format);
    if group_by_offer {
        out.push_str(&render_tables(&offer_tables(comparison), format));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_two_decimals() {
        assert_eq!(format_money(175.2), "175.20");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(37.5123), "37.51");
        assert_eq!(format_money(-500.0), "-500.00");
    }

    #[test]
    fn test_columns_match_row_width() {
        let record = crate::pricing::normalizer::on_demand_record(
            &crate::types::RawPricePoint::new("db.r5.large", "us-east-1", Engine::MySQL, 0.24),
            crate::types::TermLength::OneYear,
            1,
        );
        let row = record_row(&record);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[2], "175.20");
        assert_eq!(row[4], "On-Demand");
        assert_eq!(row[6], "N/A");
    }
}
