//! Export pipelines for article collections
//!
//! Both exporters are pure: the output is a deterministic function of the
//! input sequence, and nothing is retained between calls. BibTeX entries are
//! keyed by ArXiv identifier.

use paperdesk_bibtex::{format_entries, BibTeXEntry, BibTeXEntryType};
use paperdesk_domain::Article;

use crate::error::ExportError;

/// Render articles as BibTeX, one `@article` entry per record.
///
/// Fails when a record has an empty title or no authors, naming the article
/// and the offending field. Empty input produces empty output.
pub fn to_bibtex(articles: &[Article]) -> Result<String, ExportError> {
    let entries = articles
        .iter()
        .map(article_to_entry)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format_entries(&entries))
}

/// Render articles as a human-readable text listing, one block per record in
/// input order. Empty input produces empty output.
pub fn to_text(articles: &[Article]) -> String {
    articles
        .iter()
        .map(article_text_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn article_to_entry(article: &Article) -> Result<BibTeXEntry, ExportError> {
    if article.title.is_empty() {
        return Err(ExportError::MissingField {
            arxiv_id: article.arxiv_id.clone(),
            field: "title",
        });
    }
    if article.authors.is_empty() {
        return Err(ExportError::MissingField {
            arxiv_id: article.arxiv_id.clone(),
            field: "authors",
        });
    }

    let mut entry = BibTeXEntry::new(article.arxiv_id.clone(), BibTeXEntryType::Article);
    entry.add_field("title", &article.title);
    entry.add_field("author", article.authors.join(" and "));
    if let Some(year) = article.year {
        entry.add_field("year", year.to_string());
    }
    if !article.abstract_text.is_empty() {
        entry.add_field("abstract", &article.abstract_text);
    }
    entry.add_field("eprint", &article.arxiv_id);
    entry.add_field("archiveprefix", "arXiv");
    entry.add_optional_field("primaryclass", article.categories.first().map(|s| s.as_str()));
    entry.add_optional_field("doi", article.doi.as_deref());
    entry.add_optional_field("url", article.url.as_deref());
    entry.add_optional_field("note", article.summary.as_deref());
    Ok(entry)
}

fn article_text_block(article: &Article) -> String {
    let mut block = format!("[{}] {}\n", article.arxiv_id, article.title);
    block.push_str(&format!("Authors: {}\n", article.authors.join(", ")));
    if let Some(year) = article.year {
        block.push_str(&format!("Year: {}\n", year));
    }
    if !article.categories.is_empty() {
        block.push_str(&format!("Categories: {}\n", article.categories.join(", ")));
    }
    if let Some(ref url) = article.url {
        block.push_str(&format!("URL: {}\n", url));
    }
    block.push_str(&format!("Abstract: {}", article.abstract_text));
    if let Some(ref summary) = article.summary {
        block.push_str(&format!("\nSummary: {}", summary));
    }
    block
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
        .with_categories(vec!["cs.LG".to_string()])
    }

    #[test]
    fn test_to_bibtex() {
        let output = to_bibtex(&[sample()]).unwrap();
        assert!(output.contains("@article{2301.00001,"));
        assert!(output.contains("title = {A Study}"));
        assert!(output.contains("author = {A. Smith and B. Jones}"));
        assert!(output.contains("archiveprefix = {arXiv}"));
        assert!(output.contains("primaryclass = {cs.LG}"));
    }

    #[test]
    fn test_to_bibtex_missing_title() {
        let mut article = sample();
        article.title.clear();

        let err = to_bibtex(&[article]).unwrap_err();
        assert_eq!(
            err,
            ExportError::MissingField {
                arxiv_id: "2301.00001".to_string(),
                field: "title",
            }
        );
    }

    #[test]
    fn test_to_bibtex_missing_authors() {
        let mut article = sample();
        article.authors.clear();

        let err = to_bibtex(&[article]).unwrap_err();
        assert!(matches!(err, ExportError::MissingField { field: "authors", .. }));
    }

    #[test]
    fn test_to_bibtex_includes_summary_as_note() {
        let mut article = sample();
        article.summary = Some("Key findings in brief.".to_string());

        let output = to_bibtex(&[article]).unwrap();
        assert!(output.contains("note = {Key findings in brief.}"));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(to_bibtex(&[]).unwrap(), "");
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn test_to_text() {
        let mut article = sample();
        article.summary = Some("Short summary.".to_string());

        let output = to_text(&[article]);
        assert!(output.contains("2301.00001"));
        assert!(output.contains("A Study"));
        assert!(output.contains("Authors: A. Smith, B. Jones"));
        assert!(output.contains("Summary: Short summary."));
    }

    #[test]
    fn test_to_text_preserves_order() {
        let first = sample();
        let mut second = sample();
        second.arxiv_id = "2302.99999".to_string();
        second.title = "Another Study".to_string();

        let output = to_text(&[first, second]);
        let first_pos = output.find("2301.00001").unwrap();
        let second_pos = output.find("2302.99999").unwrap();
        assert!(first_pos < second_pos);
    }
}
