//! Written-out invoice total ("Rs. Five Thousand Only").

use super::{rule_for, ExtractionMatch, Field, FieldExtractor};

/// Extractor for the rupee total in words.
pub struct TotalWordsExtractor;

impl TotalWordsExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalWordsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalWordsExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        rule_for(Field::TotalWords).apply(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        rule_for(Field::TotalWords).apply_all(text)
    }
}

/// Extract the word sequence between `Rs. ` and `Only`.
pub fn extract_total_words(text: &str) -> Option<ExtractionMatch<String>> {
    TotalWordsExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_total_words() {
        let result = extract_total_words("Amount: Rs. Five Thousand Only");
        assert_eq!(result.unwrap().value, "Five Thousand");
    }

    #[test]
    fn test_case_insensitive_template() {
        let result = extract_total_words("RS. FIVE THOUSAND TWO HUNDRED ONLY");
        assert_eq!(result.unwrap().value, "FIVE THOUSAND TWO HUNDRED");
    }

    #[test]
    fn test_template_deviation_is_absent() {
        // No trailing "Only"
        assert!(extract_total_words("Rs. Five Thousand").is_none());
        // Digits are not words
        assert!(extract_total_words("Rs. 5000 Only").is_none());
        // Missing the dot after Rs
        assert!(extract_total_words("Rs Five Thousand Only").is_none());
    }

    #[test]
    fn test_hyphenated_words_do_not_match() {
        assert!(extract_total_words("Rs. Twenty-Five Only").is_none());
    }
}
