//! SGST / CGST payable extraction.

use super::{rule_for, ExtractionMatch, Field, FieldExtractor};

/// Which GST component a tax line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxComponent {
    /// State GST.
    Sgst,
    /// Central GST.
    Cgst,
}

impl TaxComponent {
    fn field(self) -> Field {
        match self {
            TaxComponent::Sgst => Field::Sgst,
            TaxComponent::Cgst => Field::Cgst,
        }
    }
}

/// Extractor for one `<component> PAYBLE <amount>` line.
pub struct TaxExtractor {
    component: TaxComponent,
}

impl TaxExtractor {
    pub fn new(component: TaxComponent) -> Self {
        Self { component }
    }

    pub fn sgst() -> Self {
        Self::new(TaxComponent::Sgst)
    }

    pub fn cgst() -> Self {
        Self::new(TaxComponent::Cgst)
    }
}

impl FieldExtractor for TaxExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        rule_for(self.component.field()).apply(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        rule_for(self.component.field()).apply_all(text)
    }
}

/// Tax amounts found on an invoice, kept as printed.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTaxes {
    pub sgst: Option<ExtractionMatch<String>>,
    pub cgst: Option<ExtractionMatch<String>>,
}

/// Extract both tax components. Each is looked up independently.
pub fn extract_taxes(text: &str) -> InvoiceTaxes {
    InvoiceTaxes {
        sgst: TaxExtractor::sgst().extract(text),
        cgst: TaxExtractor::cgst().extract(text),
    }
}
