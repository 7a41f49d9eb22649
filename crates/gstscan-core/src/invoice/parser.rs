//! Template parser running every field rule over OCR text.

use tracing::debug;

use super::rules::{
    dates::InvoiceDateExtractor,
    tax::TaxExtractor,
    total::TotalWordsExtractor,
    ExtractionMatch, Field, FieldExtractor,
};

/// Raw field values found in one text, each optional.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub sgst: Option<ExtractionMatch<String>>,
    pub cgst: Option<ExtractionMatch<String>>,
    pub total_words: Option<ExtractionMatch<String>>,
    pub date: Option<ExtractionMatch<String>>,
}

impl ExtractedFields {
    /// Raw value of a field, if its rule matched.
    pub fn value(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::Sgst => &self.sgst,
            Field::Cgst => &self.cgst,
            Field::TotalWords => &self.total_words,
            Field::InvoiceDate => &self.date,
        };
        slot.as_ref().map(|m| m.value.as_str())
    }

    /// Fields whose rule found nothing.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.value(*f).is_none())
            .collect()
    }
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse raw fields from text. Absent fields are not errors.
    fn parse(&self, text: &str) -> ExtractedFields;
}

/// Parser for the fixed GST invoice template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateParser;

impl TemplateParser {
    pub fn new() -> Self {
        Self
    }
}

impl InvoiceParser for TemplateParser {
    fn parse(&self, text: &str) -> ExtractedFields {
        let fields = ExtractedFields {
            sgst: TaxExtractor::sgst().extract(text),
            cgst: TaxExtractor::cgst().extract(text),
            total_words: TotalWordsExtractor::new().extract(text),
            date: InvoiceDateExtractor::new().extract(text),
        };

        for field in Field::ALL {
            match fields.value(field) {
                Some(value) => debug!("Rule {} matched {:?}", field, value),
                None => debug!("Rule {} found no {:?} anchor", field, field.anchor()),
            }
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_template() {
        let text = r#"
            TAX INVOICE
            Invoice No: 118          Invoice Date : 10-01-2024
            Taxable Value           4000.00
            SGST PAYBLE   360.00
            CGST PAYBLE   360.00
            Amount Chargeable (in words)
            Rs. Four Thousand Seven Hundred Twenty Only
        "#;

        let fields = TemplateParser::new().parse(text);

        assert_eq!(fields.value(Field::Sgst), Some("360.00"));
        assert_eq!(fields.value(Field::Cgst), Some("360.00"));
        assert_eq!(fields.value(Field::TotalWords), Some("Four Thousand Seven Hundred Twenty"));
        assert_eq!(fields.value(Field::InvoiceDate), Some("10-01-2024"));
        assert!(fields.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_reported() {
        let fields = TemplateParser::new().parse("SGST PAYBLE 1.00");
        assert_eq!(
            fields.missing_fields(),
            vec![Field::Cgst, Field::TotalWords, Field::InvoiceDate]
        );
    }

    #[test]
    fn test_empty_text() {
        let fields = TemplateParser::new().parse("");
        assert_eq!(fields.missing_fields(), Field::ALL.to_vec());
    }
}
