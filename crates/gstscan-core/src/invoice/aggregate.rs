//! Monthly sales aggregation over validated records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::invoice::{InvoiceRecord, Month};

/// Totals for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    /// Sum of invoice totals.
    pub total: u64,
    /// Number of invoices contributing to `total`.
    pub invoices: usize,
    /// Sum of SGST amounts that parsed as decimals.
    pub sgst: Decimal,
    /// Sum of CGST amounts that parsed as decimals.
    pub cgst: Decimal,
}

/// Month-keyed totals in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyAggregate {
    months: BTreeMap<Month, MonthTotals>,
}

impl MonthlyAggregate {
    /// Totals for one month.
    pub fn get(&self, month: &Month) -> Option<&MonthTotals> {
        self.months.get(month)
    }

    /// Iterate months in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&Month, &MonthTotals)> {
        self.months.iter()
    }

    /// `(YYYY-MM, total)` pairs in chronological order.
    pub fn series(&self) -> Vec<(String, u64)> {
        self.months
            .iter()
            .map(|(month, totals)| (month.to_string(), totals.total))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Sum across every month.
    pub fn grand_total(&self) -> u64 {
        self.months.values().map(|t| t.total).sum()
    }
}

/// Group records by month and sum their totals.
///
/// Records without a valid calendar date or without a total are left out.
/// Returns `None` when nothing survives, so callers can report "no data"
/// instead of drawing an empty chart.
pub fn aggregate_monthly<'a, I>(records: I) -> Option<MonthlyAggregate>
where
    I: IntoIterator<Item = &'a InvoiceRecord>,
{
    let mut months: BTreeMap<Month, MonthTotals> = BTreeMap::new();

    for record in records {
        let (Some(month), Some(total)) = (record.month(), record.total) else {
            continue;
        };

        let entry = months.entry(month).or_default();
        entry.total = entry.total.saturating_add(total);
        entry.invoices += 1;
        if let Some(sgst) = record.sgst_amount() {
            entry.sgst += sgst;
        }
        if let Some(cgst) = record.cgst_amount() {
            entry.cgst += cgst;
        }
    }

    if months.is_empty() {
        None
    } else {
        Some(MonthlyAggregate { months })
    }
}
