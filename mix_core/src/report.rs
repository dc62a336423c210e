//! # Report Output
//!
//! Renders the entry table and the order summary as plain text or JSON.
//! All rounding to two decimals for display happens here.

use serde::{Deserialize, Serialize};

use crate::accumulator::LineItem;
use crate::aggregate::AggregateResult;
use crate::errors::CalcResult;
use crate::session::Session;

/// One row of the entry table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub label: String,
    pub kind: String,
    pub volume_m3: f64,
    /// `"d1xd2xd3"`
    pub spec: String,
}

impl From<&LineItem> for ItemRow {
    fn from(item: &LineItem) -> Self {
        ItemRow {
            label: item.label.clone(),
            kind: item.kind.display_name().to_string(),
            volume_m3: item.volume_m3,
            spec: item.dimensions.spec_string(),
        }
    }
}

/// Entry table plus summary, as handed to a front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub items: Vec<ItemRow>,
    pub summary: AggregateResult,
}

impl Report {
    /// Build a report from the current session state.
    pub fn from_session(session: &Session) -> CalcResult<Self> {
        Ok(Report {
            items: session.entries.items().iter().map(ItemRow::from).collect(),
            summary: session.summary()?,
        })
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

const TABLE_HEADERS: [&str; 4] = ["Label", "Type", "Volume (m³)", "Dimensions"];

/// Fixed-width text table of the entries.
pub fn format_items_table(items: &[LineItem]) -> String {
    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|item| {
            [
                item.label.clone(),
                item.kind.display_name().to_string(),
                format!("{:.2}", item.volume_m3),
                item.dimensions.spec_string(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&TABLE_HEADERS.map(String::from), &widths));
    out.push_str(&format!(
        "{}\n",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    ));
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = width.saturating_sub(cell.chars().count());
            // volume column is right-aligned
            if i == 2 {
                format!("{}{}", " ".repeat(pad), cell)
            } else {
                format!("{}{}", cell, " ".repeat(pad))
            }
        })
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

/// Text block summarizing the order.
pub fn format_summary(result: &AggregateResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Total pour volume (loss {}%): {:.2} m³\n",
        result.loss_rate_percent, result.final_volume_m3
    ));
    out.push_str(&format!("  Theoretical:  {:.2} m³\n", result.total_theoretical_m3));
    out.push_str(&format!("  Allowance:    {:.2} m³\n", result.loss_allowance_m3()));
    out.push_str(&format!("  Trucks:       {}\n", result.trucks_needed));
    out.push_str(&format!(
        "  Last truck:   {:.2} m³ (of {:?} m³ per truck)\n",
        result.last_truck_volume_m3, result.truck_capacity_m3
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::StructureKind;

    fn sample_session() -> Session {
        let mut session = Session::new();
        session.add_item(StructureKind::Slab, "1F slab", 10.0, 5.0, 0.2).unwrap();
        session.add_item(StructureKind::Wall, "", 10.0, 2.5, 0.2).unwrap();
        session
    }

    #[test]
    fn test_item_row_from_line_item() {
        let session = sample_session();
        let row = ItemRow::from(&session.entries.items()[1]);
        assert_eq!(row.label, "Wall-2");
        assert_eq!(row.kind, "Wall");
        assert_eq!(row.volume_m3, 5.0);
        assert_eq!(row.spec, "10.0x2.5x0.2");
    }

    #[test]
    fn test_items_table() {
        let session = sample_session();
        let table = format_items_table(session.entries.items());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Label"));
        assert!(lines[1].contains("-+-"));
        assert!(lines[2].contains("1F slab"));
        assert!(lines[2].contains("10.00"));
        assert!(lines[2].ends_with("10.0x5.0x0.2"));
        assert!(lines[3].contains("Wall-2"));
        assert!(lines[3].contains(" 5.00"));
    }

    #[test]
    fn test_summary_text() {
        let session = sample_session();
        let text = format_summary(&session.summary().unwrap());
        assert!(text.contains("(loss 3%): 15.45 m³"));
        assert!(text.contains("Trucks:       3"));
        assert!(text.contains("Allowance:    0.45 m³"));
        assert!(text.contains("Last truck:   3.45 m³ (of 6.0 m³ per truck)"));
    }

    #[test]
    fn test_report_json() {
        let session = sample_session();
        let report = Report::from_session(&session).unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["items"][0]["spec"], "10.0x5.0x0.2");
        assert_eq!(value["summary"]["trucks_needed"], 3);
    }

    #[test]
    fn test_empty_report() {
        let report = Report::from_session(&Session::new()).unwrap();
        assert!(report.items.is_empty());
        assert_eq!(report.summary.trucks_needed, 0);
    }
}
