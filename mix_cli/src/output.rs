//! Output formatting module

use std::io::Write;

use mix_core::report::{format_items_table, format_summary, ItemRow, Report};
use mix_core::session::{Session, MAX_LOSS_RATE_PERCENT};

use crate::cli::OutputFormat;
use crate::commands::{CliError, Result};

pub fn write_banner(session: &Session, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Readymix - Concrete Quantity Estimator")?;
    writeln!(out, "======================================")?;
    writeln!(
        out,
        "Loss rate {}%, truck capacity {:?} m³. Type 'help' for commands.",
        session.settings.loss_rate_percent, session.settings.truck_capacity_m3
    )?;
    writeln!(out)?;
    Ok(())
}

/// Rejected command: a plain line for tables, one JSON object per line otherwise.
pub fn write_error(error: &CliError, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "code": error.error_code(),
                "message": error.to_string(),
            });
            writeln!(out, "{value}")?;
        }
        OutputFormat::Table => writeln!(out, "Error: {error}")?,
    }
    Ok(())
}

pub fn write_help(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  add slab <length> <width> <thickness> [label]   add a slab (metres)")?;
    writeln!(out, "  add wall <length> <height> <thickness> [label]  add a wall (metres)")?;
    writeln!(out, "  list                                            show entries")?;
    writeln!(out, "  summary                                         show volume and trucks")?;
    writeln!(out, "  loss <0-{MAX_LOSS_RATE_PERCENT}>                                      set loss rate (%)")?;
    writeln!(out, "  truck <m3>                                      set truck capacity")?;
    writeln!(out, "  reset                                           clear all entries")?;
    writeln!(out, "  quit                                            exit")?;
    Ok(())
}

/// Entry table followed by the summary, or a hint when nothing has been added.
pub fn write_state(session: &Session, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    if format == OutputFormat::Json {
        writeln!(out, "{}", Report::from_session(session)?.to_json()?)?;
        return Ok(());
    }

    if session.entries.is_empty() {
        writeln!(out, "No entries yet. Add a slab or wall with 'add'.")?;
        return Ok(());
    }

    writeln!(out)?;
    write!(out, "{}", format_items_table(session.entries.items()))?;
    writeln!(out)?;
    write!(out, "{}", format_summary(&session.summary()?))?;
    Ok(())
}

pub fn write_items(session: &Session, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<ItemRow> = session.entries.items().iter().map(ItemRow::from).collect();
            let json = serde_json::to_string_pretty(&rows).map_err(mix_core::CalcError::from)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Table if session.entries.is_empty() => {
            writeln!(out, "No entries yet. Add a slab or wall with 'add'.")?;
        }
        OutputFormat::Table => write!(out, "{}", format_items_table(session.entries.items()))?,
    }
    Ok(())
}

pub fn write_summary(session: &Session, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let summary = session.summary()?;
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).map_err(mix_core::CalcError::from)?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Table => write!(out, "{}", format_summary(&summary))?,
    }
    Ok(())
}
