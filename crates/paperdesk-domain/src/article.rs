//! Article domain model

use serde::{Deserialize, Serialize};

/// One ArXiv paper tracked by the library.
///
/// The ArXiv identifier is the primary key: a library store never holds two
/// articles with the same `arxiv_id`. Descriptive metadata (`title`,
/// `authors`, `abstract_text`) is immutable once fetched; `summary` is
/// AI-generated and overwritten on regeneration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// ArXiv identifier, e.g. "2301.00001" or "hep-th/9901001"
    pub arxiv_id: String,
    pub title: String,
    /// Author names in publication order
    pub authors: Vec<String>,
    pub abstract_text: String,
    /// AI-generated summary, absent until requested
    pub summary: Option<String>,
    /// Filesystem location of a cached PDF or text copy
    pub local_path: Option<String>,

    pub year: Option<i32>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub categories: Vec<String>,

    /// Publication date, RFC 3339
    pub published: Option<String>,
    /// When the article was first added to the library, RFC 3339
    pub added_at: Option<String>,
    /// Where the metadata came from
    pub source: String,
}

impl Article {
    /// Create an article with the required descriptive fields
    pub fn new(
        arxiv_id: impl Into<String>,
        title: impl Into<String>,
        authors: Vec<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            arxiv_id: arxiv_id.into(),
            title: title.into(),
            authors,
            abstract_text: abstract_text.into(),
            summary: None,
            local_path: None,
            year: None,
            doi: None,
            url: None,
            categories: Vec::new(),
            published: None,
            added_at: None,
            source: "arxiv".to_string(),
        }
    }

    /// Builder method to set the publication year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Builder method to set the DOI
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Builder method to set the web URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method to set subject categories
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Primary author shortened for display: "Smith" or "Smith et al."
    pub fn primary_author(&self) -> String {
        match self.authors.len() {
            0 => "Unknown".to_string(),
            1 => self.authors[0].clone(),
            _ => format!("{} et al.", self.authors[0]),
        }
    }

    /// One-line formatted citation
    pub fn citation(&self) -> String {
        let mut out = self.authors.join(", ");
        if let Some(year) = self.year {
            out.push_str(&format!(" ({})", year));
        }
        out.push_str(". ");
        out.push_str(&self.title);
        if let Some(ref doi) = self.doi {
            out.push_str(&format!(". DOI: {}", doi));
        }
        out
    }

    /// List-view line: "Title (year, First Author et al.) [source]"
    pub fn display_line(&self) -> String {
        let year = self
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "n.d.".to_string());
        format!(
            "{} ({}, {}) [{}]",
            self.title,
            year,
            self.primary_author(),
            self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            "2301.00001",
            "A Study",
            vec!["A. Smith".to_string(), "B. Jones".to_string()],
            "We study a thing.",
        )
        .with_year(2023)
    }

    #[test]
    fn test_article_new() {
        let article = sample();
        assert_eq!(article.arxiv_id, "2301.00001");
        assert_eq!(article.source, "arxiv");
        assert!(article.summary.is_none());
        assert!(article.added_at.is_none());
    }

    #[test]
    fn test_primary_author() {
        let article = sample();
        assert_eq!(article.primary_author(), "A. Smith et al.");

        let solo = Article::new("1", "T", vec!["X. Yu".to_string()], "");
        assert_eq!(solo.primary_author(), "X. Yu");

        let anon = Article::new("2", "T", vec![], "");
        assert_eq!(anon.primary_author(), "Unknown");
    }

    #[test]
    fn test_citation() {
        let article = sample().with_doi("10.1234/xyz");
        let citation = article.citation();
        assert!(citation.starts_with("A. Smith, B. Jones (2023). A Study"));
        assert!(citation.ends_with("DOI: 10.1234/xyz"));
    }

    #[test]
    fn test_display_line() {
        assert_eq!(
            sample().display_line(),
            "A Study (2023, A. Smith et al.) [arxiv]"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let article = sample().with_doi("10.1234/xyz");
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(article, back);
    }
}
