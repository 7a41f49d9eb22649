//! Rendering of records, skip lists and monthly totals.

use comfy_table::{Attribute, Cell, CellAlignment, Table};

use gstscan_core::{InvoiceRecord, MonthlyAggregate, SkippedInvoice};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table for the terminal
    Table,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

const RECORD_HEADERS: [&str; 5] = ["Invoice Name", "Date", "SGST Payable", "CGST Payable", "Total"];

/// Render records in the requested format.
pub fn format_records(records: &[InvoiceRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(records_table(records).to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => records_csv(records),
    }
}

fn opt(value: Option<&str>) -> Cell {
    match value {
        Some(v) => Cell::new(v),
        None => Cell::new("-"),
    }
}

pub fn records_table(records: &[InvoiceRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(RECORD_HEADERS.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));

    for record in records {
        let total = record.total.map(|t| t.to_string());
        table.add_row(vec![
            Cell::new(&record.name),
            opt(record.date.as_deref()),
            opt(record.sgst.as_deref()).set_alignment(CellAlignment::Right),
            opt(record.cgst.as_deref()).set_alignment(CellAlignment::Right),
            opt(total.as_deref()).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn records_csv(records: &[InvoiceRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(vec![]);
    wtr.write_record(RECORD_HEADERS)?;

    for record in records {
        wtr.write_record([
            record.name.clone(),
            record.date.clone().unwrap_or_default(),
            record.sgst.clone().unwrap_or_default(),
            record.cgst.clone().unwrap_or_default(),
            record.total.map(|t| t.to_string()).unwrap_or_default(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

pub fn skipped_table(skipped: &[SkippedInvoice]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Invoice Name").add_attribute(Attribute::Bold),
        Cell::new("Reason").add_attribute(Attribute::Bold),
    ]);

    for item in skipped {
        table.add_row(vec![Cell::new(&item.name), Cell::new(item.reason.to_string())]);
    }

    table
}

pub fn monthly_table(aggregate: &MonthlyAggregate) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Month").add_attribute(Attribute::Bold),
        Cell::new("Invoices").add_attribute(Attribute::Bold),
        Cell::new("SGST").add_attribute(Attribute::Bold),
        Cell::new("CGST").add_attribute(Attribute::Bold),
        Cell::new("Total").add_attribute(Attribute::Bold),
    ]);

    for (month, totals) in aggregate.iter() {
        table.add_row(vec![
            Cell::new(month.to_string()),
            Cell::new(totals.invoices).set_alignment(CellAlignment::Right),
            Cell::new(totals.sgst).set_alignment(CellAlignment::Right),
            Cell::new(totals.cgst).set_alignment(CellAlignment::Right),
            Cell::new(totals.total).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(aggregate.grand_total())
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    table
}
