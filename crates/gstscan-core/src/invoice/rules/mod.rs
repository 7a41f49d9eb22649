//! Rule-based field extractors for the GST invoice template.
//!
//! Every field is found by exactly one named [`ExtractionRule`]. Rules are
//! independent of each other, so when the printed template drifts the rule
//! that stopped matching can be identified on its own.

pub mod dates;
pub mod patterns;
pub mod tax;
pub mod total;

pub use dates::{extract_invoice_date, parse_invoice_date, InvoiceDateExtractor};
pub use tax::{extract_taxes, InvoiceTaxes, TaxComponent, TaxExtractor};
pub use total::{extract_total_words, TotalWordsExtractor};

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use patterns::{CGST_PAYABLE, INVOICE_DATE, SGST_PAYABLE, TOTAL_IN_WORDS};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Semantic fields the template exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Sgst,
    Cgst,
    TotalWords,
    InvoiceDate,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Sgst, Field::Cgst, Field::TotalWords, Field::InvoiceDate];

    /// Template anchor the field is found by.
    pub fn anchor(&self) -> &'static str {
        match self {
            Field::Sgst => "SGST PAYBLE",
            Field::Cgst => "CGST PAYBLE",
            Field::TotalWords => "Rs. ... Only",
            Field::InvoiceDate => "Invoice Date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Sgst => "sgst",
            Field::Cgst => "cgst",
            Field::TotalWords => "total_words",
            Field::InvoiceDate => "invoice_date",
        };
        f.write_str(name)
    }
}

/// A named regex bound to one field.
pub struct ExtractionRule {
    /// Field this rule produces.
    pub field: Field,
    /// Stable rule name used in logs and diagnostics.
    pub name: &'static str,
    pattern: &'static Regex,
    group: usize,
}

impl ExtractionRule {
    /// First match of the rule in `text`.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = self.pattern.captures(text)?;
        self.to_match(&caps)
    }

    /// Every non-overlapping match of the rule in `text`.
    pub fn apply_all(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| self.to_match(&caps))
            .collect()
    }

    fn to_match(&self, caps: &regex::Captures<'_>) -> Option<ExtractionMatch<String>> {
        let value = caps.get(self.group)?;
        let full_match = caps.get(0)?;
        Some(
            ExtractionMatch::new(value.as_str().to_string(), full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

impl fmt::Debug for ExtractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionRule")
            .field("field", &self.field)
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

lazy_static! {
    static ref RULES: [ExtractionRule; 4] = [
        ExtractionRule {
            field: Field::Sgst,
            name: "sgst_payable",
            pattern: &SGST_PAYABLE,
            group: 1,
        },
        ExtractionRule {
            field: Field::Cgst,
            name: "cgst_payable",
            pattern: &CGST_PAYABLE,
            group: 1,
        },
        ExtractionRule {
            field: Field::TotalWords,
            name: "total_in_words",
            pattern: &TOTAL_IN_WORDS,
            group: 1,
        },
        ExtractionRule {
            field: Field::InvoiceDate,
            name: "invoice_date",
            pattern: &INVOICE_DATE,
            group: 1,
        },
    ];
}

/// All template rules, one per field.
pub fn rules() -> &'static [ExtractionRule] {
    RULES.as_slice()
}

/// The rule that produces `field`.
pub fn rule_for(field: Field) -> &'static ExtractionRule {
    let idx = match field {
        Field::Sgst => 0,
        Field::Cgst => 1,
        Field::TotalWords => 2,
        Field::InvoiceDate => 3,
    };
    &RULES[idx]
}

/// Outcome of one rule against one text.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub field: Field,
    pub rule: &'static str,
    pub matched: Option<String>,
}

/// Evaluate every rule and report which ones matched.
pub fn diagnose(text: &str) -> Vec<RuleOutcome> {
    rules()
        .iter()
        .map(|rule| RuleOutcome {
            field: rule.field,
            rule: rule.name,
            matched: rule.apply(text).map(|m| m.value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rule_catalog_covers_every_field() {
        for field in Field::ALL {
            assert_eq!(rule_for(field).field, field);
        }
        assert_eq!(rules().len(), Field::ALL.len());
    }

    #[test]
    fn test_apply_records_position() {
        let text = "xx SGST PAYBLE 10.50";
        let m = rule_for(Field::Sgst).apply(text).unwrap();

        assert_eq!(m.value, "10.50");
        assert_eq!(m.source, "SGST PAYBLE 10.50");
        assert_eq!(m.position, Some((3, text.len())));
    }

    #[test]
    fn test_diagnose_reports_each_rule() {
        let text = "SGST PAYBLE 10.50\nInvoice Date: 05-03-2024";
        let outcomes = diagnose(text);

        let matched: Vec<(Field, Option<&str>)> = outcomes
            .iter()
            .map(|o| (o.field, o.matched.as_deref()))
            .collect();
        assert_eq!(
            matched,
            vec![
                (Field::Sgst, Some("10.50")),
                (Field::Cgst, None),
                (Field::TotalWords, None),
                (Field::InvoiceDate, Some("05-03-2024")),
            ]
        );
    }

    #[test]
    fn test_template_literals_round_trip() {
        let text = "TAX INVOICE\n\
                    Invoice Date: 05-03-2024\n\
                    SGST PAYBLE 225.00\n\
                    CGST PAYBLE 225.00\n\
                    Rs. Five Thousand Only";

        let values: Vec<Option<String>> = diagnose(text).into_iter().map(|o| o.matched).collect();
        assert_eq!(
            values,
            vec![
                Some("225.00".to_string()),
                Some("225.00".to_string()),
                Some("Five Thousand".to_string()),
                Some("05-03-2024".to_string()),
            ]
        );
    }
}
