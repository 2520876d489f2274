//! BibTeX entry data structures

/// BibTeX entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BibTeXEntryType {
    Article,
    Misc,
    Unpublished,
}

impl BibTeXEntryType {
    /// Canonical lowercase name as it appears after '@'
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Misc => "misc",
            Self::Unpublished => "unpublished",
        }
    }
}

/// A single BibTeX field (key-value pair)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXField {
    pub key: String,
    pub value: String,
}

/// A BibTeX entry ready for formatting
///
/// Fields keep their insertion order; exporters decide the order they want by
/// the order they call [`BibTeXEntry::add_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXEntry {
    pub cite_key: String,
    pub entry_type: BibTeXEntryType,
    pub fields: Vec<BibTeXField>,
}

impl BibTeXEntry {
    pub fn new(cite_key: impl Into<String>, entry_type: BibTeXEntryType) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type,
            fields: Vec::new(),
        }
    }

    /// Append a field to the entry
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTeXField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Append a field only when the value is present
    pub fn add_optional_field(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.add_field(key, value);
        }
    }

    /// Get a field value by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.key.to_lowercase() == key_lower)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_as_str() {
        assert_eq!(BibTeXEntryType::Article.as_str(), "article");
        assert_eq!(BibTeXEntryType::Misc.as_str(), "misc");
    }

    #[test]
    fn test_field_access() {
        let mut entry = BibTeXEntry::new("2301.00001", BibTeXEntryType::Article);
        entry.add_field("title", "A Great Paper");
        entry.add_field("Author", "John Smith");

        assert_eq!(entry.get_field("title"), Some("A Great Paper"));
        assert_eq!(entry.get_field("author"), Some("John Smith"));
        assert_eq!(entry.get_field("year"), None);
    }

    #[test]
    fn test_add_optional_field() {
        let mut entry = BibTeXEntry::new("key", BibTeXEntryType::Article);
        entry.add_optional_field("doi", Some("10.1/x"));
        entry.add_optional_field("url", None);

        assert_eq!(entry.fields.len(), 1);
        assert_eq!(entry.get_field("doi"), Some("10.1/x"));
    }
}
