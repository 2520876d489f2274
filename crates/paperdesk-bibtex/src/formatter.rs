//! BibTeX formatting
//!
//! Renders [`BibTeXEntry`] structures to BibTeX string form.

use super::entry::BibTeXEntry;

/// Format a single entry to string
pub fn format_entry(entry: &BibTeXEntry) -> String {
    let mut result = String::new();

    result.push('@');
    result.push_str(entry.entry_type.as_str());
    result.push('{');
    result.push_str(&entry.cite_key);
    result.push_str(",\n");

    for field in &entry.fields {
        result.push_str("    ");
        result.push_str(&field.key);
        result.push_str(" = ");
        result.push_str(&format_field_value(&field.value));
        result.push_str(",\n");
    }

    result.push('}');
    result
}

/// Format multiple entries to a single BibTeX string, blank line between them
pub fn format_entries(entries: &[BibTeXEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Choose delimiters for a field value
///
/// Numeric values stay bare; everything else is brace-delimited, which
/// preserves LaTeX commands and case protection.
fn format_field_value(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }

    let mut result = String::with_capacity(value.len() + 2);
    result.push('{');
    result.push_str(value);
    result.push('}');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::BibTeXEntryType;

    #[test]
    fn test_format_simple_entry() {
        let mut entry = BibTeXEntry::new("2301.00001", BibTeXEntryType::Article);
        entry.add_field("author", "John Smith and Jane Doe");
        entry.add_field("title", "A Great Paper");
        entry.add_field("year", "2024");

        let formatted = format_entry(&entry);
        assert!(formatted.starts_with("@article{2301.00001,"));
        assert!(formatted.contains("author = {John Smith and Jane Doe}"));
        assert!(formatted.contains("title = {A Great Paper}"));
        // Year is numeric, so no braces
        assert!(formatted.contains("year = 2024,"));
        assert!(formatted.ends_with('}'));
    }

    #[test]
    fn test_format_entries_separated_by_blank_line() {
        let a = BibTeXEntry::new("first", BibTeXEntryType::Article);
        let b = BibTeXEntry::new("second", BibTeXEntryType::Misc);

        let formatted = format_entries(&[a, b]);
        assert!(formatted.contains("@article{first,"));
        assert!(formatted.contains("\n\n@misc{second,"));
    }

    #[test]
    fn test_format_entries_empty() {
        assert_eq!(format_entries(&[]), "");
    }

    #[test]
    fn test_braces_for_non_numeric() {
        let mut entry = BibTeXEntry::new("k", BibTeXEntryType::Article);
        entry.add_field("pages", "12--34");

        let formatted = format_entry(&entry);
        assert!(formatted.contains("pages = {12--34}"));
    }
}
