//! ArXiv search client with Atom feed parsing
//!
//! API docs: https://arxiv.org/help/api/user-manual
//! Rate limit: 1 request per 3 seconds; throttling is the caller's concern.

use lazy_static::lazy_static;
use paperdesk_domain::Article;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::info;

use super::traits::{SourceError, SourceMetadata};
use crate::http::{runtime, HttpClient, HttpError};

lazy_static! {
    static ref ARXIV_NEW_ID: Regex = Regex::new(r"(\d{4}\.\d{4,5})(v\d+)?").unwrap();
    static ref ARXIV_OLD_ID: Regex = Regex::new(r"([a-z-]+/\d{7})").unwrap();
}

pub struct ArxivClient {
    client: HttpClient,
    base_url: String,
}

impl ArxivClient {
    pub fn new() -> Self {
        Self {
            client: HttpClient::new("paperdesk/0.1"),
            base_url: "http://export.arxiv.org/api/query".to_string(),
        }
    }

    pub fn metadata() -> SourceMetadata {
        SourceMetadata {
            id: "arxiv",
            name: "arXiv",
            base_url: "https://arxiv.org",
            rate_limit_per_second: 0.33, // 1 per 3 seconds
            requires_api_key: false,
        }
    }

    /// Search the export API, relevance-sorted descending
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<Article>, SourceError> {
        let api_query = build_api_query(query);
        info!(query = %api_query, max_results, "searching arXiv");

        let params = [
            ("search_query", api_query),
            ("max_results", max_results.to_string()),
            ("sortBy", "relevance".to_string()),
            ("sortOrder", "descending".to_string()),
        ];
        let url = format!(
            "{}?{}",
            self.base_url,
            params
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        );

        let response = self.client.get(&url).await?;
        if response.status != 200 {
            return Err(SourceError::Http(HttpError::RequestFailed {
                message: format!("status {}", response.status),
            }));
        }

        parse_atom_feed(&response.body)
    }

    /// Fetch a single article by its ArXiv identifier
    pub async fn fetch_by_id(&self, arxiv_id: &str) -> Result<Article, SourceError> {
        let clean_id = arxiv_id
            .trim_start_matches("arXiv:")
            .trim_start_matches("arxiv:");

        let url = format!("{}?id_list={}", self.base_url, clean_id);
        let response = self.client.get(&url).await?;

        let articles = parse_atom_feed(&response.body)?;
        articles.into_iter().next().ok_or(SourceError::NotFound)
    }

    /// Blocking wrapper for callers without a tokio runtime
    pub fn search_blocking(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<Article>, SourceError> {
        runtime().block_on(self.search(query, max_results))
    }

    /// Blocking wrapper for callers without a tokio runtime
    pub fn fetch_by_id_blocking(&self, arxiv_id: &str) -> Result<Article, SourceError> {
        runtime().block_on(self.fetch_by_id(arxiv_id))
    }
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a user query into ArXiv API query syntax
///
/// Recognized field prefixes:
/// - author: / au:
/// - title: / ti:
/// - abstract: / abs:
/// - category: / cat:
/// - arxiv: / id:
///
/// `AND`/`OR` combinations recurse into both sides; anything without a
/// prefix searches all fields.
pub fn build_api_query(user_query: &str) -> String {
    let query = user_query.trim();

    // Split on combinators first so each side gets its own prefix mapping
    for separator in [" AND ", " OR "] {
        if query.contains(separator) {
            return query
                .split(separator)
                .map(|part| build_api_query(part.trim()))
                .collect::<Vec<_>>()
                .join(separator);
        }
    }

    let mappings = [
        ("category:", "cat:"),
        ("author:", "au:"),
        ("title:", "ti:"),
        ("abstract:", "abs:"),
        ("arxiv:", "id:"),
        ("cat:", "cat:"),
        ("au:", "au:"),
        ("ti:", "ti:"),
        ("abs:", "abs:"),
        ("id:", "id:"),
        ("all:", "all:"),
    ];
    for (user_prefix, api_prefix) in mappings {
        if query.to_lowercase().starts_with(user_prefix) {
            let value = query[user_prefix.len()..].trim();
            return format_field_value(api_prefix, value);
        }
    }

    format!("all:{}", query)
}

fn format_field_value(prefix: &str, value: &str) -> String {
    let clean = value.trim_matches('"');
    // Never quote across a combinator that slipped through
    if clean.contains(' ') && !clean.contains(" AND ") && !clean.contains(" OR ") {
        format!("{}\"{}\"", prefix, clean)
    } else {
        format!("{}{}", prefix, clean)
    }
}

/// Partially parsed `<entry>` element
#[derive(Default)]
struct EntryDraft {
    id: String,
    title: String,
    summary: String,
    published: String,
    doi: Option<String>,
    authors: Vec<String>,
    pdf_url: Option<String>,
    web_url: Option<String>,
    categories: Vec<String>,
}

impl EntryDraft {
    fn into_article(self) -> Option<Article> {
        if self.title.is_empty() {
            return None;
        }

        let arxiv_id = extract_arxiv_id(&self.id).unwrap_or(self.id);
        // Published is YYYY-MM-DDTHH:MM:SSZ
        let year = self.published.get(..4).and_then(|y| y.parse().ok());

        let mut article = Article::new(arxiv_id, self.title, self.authors, self.summary)
            .with_categories(self.categories);
        article.year = year;
        article.doi = self.doi;
        article.url = self.web_url.or(self.pdf_url);
        article.published = if self.published.is_empty() {
            None
        } else {
            Some(self.published)
        };
        Some(article)
    }
}

/// Parse an ArXiv Atom feed into candidate articles
pub fn parse_atom_feed(xml: &str) -> Result<Vec<Article>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut articles = Vec::new();
    let mut buf = Vec::new();

    let mut draft: Option<EntryDraft> = None;
    let mut current_element = String::new();
    let mut in_author = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                current_element = name.clone();

                match name.as_str() {
                    "entry" => draft = Some(EntryDraft::default()),
                    "author" => in_author = true,
                    "link" => {
                        if let Some(draft) = draft.as_mut() {
                            read_link(e, draft);
                        }
                    }
                    "category" | "arxiv:primary_category" => {
                        if let Some(draft) = draft.as_mut() {
                            read_category(e, draft);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "link" => {
                        if let Some(draft) = draft.as_mut() {
                            read_link(e, draft);
                        }
                    }
                    "category" | "arxiv:primary_category" => {
                        if let Some(draft) = draft.as_mut() {
                            read_category(e, draft);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "entry" => {
                        if let Some(article) = draft.take().and_then(EntryDraft::into_article) {
                            articles.push(article);
                        }
                    }
                    "author" => in_author = false,
                    _ => {}
                }
                current_element.clear();
            }
            Ok(Event::Text(e)) => {
                if let Some(draft) = draft.as_mut() {
                    let text = e.unescape().unwrap_or_default().to_string();
                    match current_element.as_str() {
                        "id" => draft.id = text,
                        "title" => draft.title = normalize_whitespace(&text),
                        "summary" => draft.summary = normalize_whitespace(&text),
                        "published" => draft.published = text,
                        "name" if in_author => draft.authors.push(text),
                        "arxiv:doi" => draft.doi = Some(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Parse(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

fn read_link(e: &quick_xml::events::BytesStart<'_>, draft: &mut EntryDraft) {
    let mut href = None;
    let mut rel = None;
    let mut link_type = None;

    for attr in e.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"href" => href = Some(value),
            b"rel" => rel = Some(value),
            b"type" => link_type = Some(value),
            _ => {}
        }
    }

    if let Some(href) = href {
        if rel.as_deref() == Some("alternate") {
            draft.web_url = Some(href);
        } else if link_type.as_deref() == Some("application/pdf") {
            draft.pdf_url = Some(href);
        }
    }
}

fn read_category(e: &quick_xml::events::BytesStart<'_>, draft: &mut EntryDraft) {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"term" {
            let cat = String::from_utf8_lossy(&attr.value).to_string();
            if !draft.categories.contains(&cat) {
                draft.categories.push(cat);
            }
        }
    }
}

/// Feed titles and abstracts can wrap; collapse runs of whitespace
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the ArXiv identifier from an entry URL or bare id string
fn extract_arxiv_id(id: &str) -> Option<String> {
    // New format: 2301.12345
    if let Some(cap) = ARXIV_NEW_ID.captures(id) {
        return cap.get(1).map(|m| m.as_str().to_string());
    }
    // Old format: hep-th/9901001
    if let Some(cap) = ARXIV_OLD_ID.captures(id) {
        return cap.get(1).map(|m| m.as_str().to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_api_query() {
        assert_eq!(build_api_query("machine learning"), "all:machine learning");
        assert_eq!(build_api_query("cat:cs.LG"), "cat:cs.LG");
        assert_eq!(build_api_query("author:Einstein"), "au:Einstein");
        assert_eq!(build_api_query("ti:quantum"), "ti:quantum");
    }

    #[test]
    fn test_build_api_query_quotes_multiword_values() {
        assert_eq!(
            build_api_query("title:dark matter"),
            "ti:\"dark matter\""
        );
    }

    #[test]
    fn test_build_api_query_combinations() {
        assert_eq!(
            build_api_query("author:Smith AND cat:cs.LG"),
            "au:Smith AND cat:cs.LG"
        );
        assert_eq!(
            build_api_query("quantum OR gravity"),
            "all:quantum OR all:gravity"
        );
        // The prefix must bind to its own side only, and a multiword side
        // still gets quoted
        assert_eq!(
            build_api_query("title:dark matter AND au:Garcia"),
            "ti:\"dark matter\" AND au:Garcia"
        );
    }

    #[test]
    fn test_extract_arxiv_id() {
        assert_eq!(
            extract_arxiv_id("http://arxiv.org/abs/2301.12345v1"),
            Some("2301.12345".to_string())
        );
        assert_eq!(
            extract_arxiv_id("hep-th/9901001"),
            Some("hep-th/9901001".to_string())
        );
        assert_eq!(extract_arxiv_id("not an id"), None);
    }

    const SAMPLE_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <entry>
    <id>http://arxiv.org/abs/2301.12345v1</id>
    <title>A Test Paper About
  Machine Learning</title>
    <summary>This is the abstract.</summary>
    <published>2023-01-15T00:00:00Z</published>
    <author><name>John Smith</name></author>
    <author><name>Jane Doe</name></author>
    <link href="http://arxiv.org/abs/2301.12345v1" rel="alternate" type="text/html"/>
    <link href="http://arxiv.org/pdf/2301.12345v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="cs.LG"/>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_atom_feed() {
        let articles = parse_atom_feed(SAMPLE_ATOM).unwrap();
        assert_eq!(articles.len(), 1);

        let article = &articles[0];
        assert_eq!(article.arxiv_id, "2301.12345");
        assert_eq!(article.title, "A Test Paper About Machine Learning");
        assert_eq!(article.authors, vec!["John Smith", "Jane Doe"]);
        assert_eq!(article.year, Some(2023));
        assert_eq!(article.categories, vec!["cs.LG"]);
        assert_eq!(
            article.url.as_deref(),
            Some("http://arxiv.org/abs/2301.12345v1")
        );
    }

    #[test]
    fn test_parse_atom_feed_empty() {
        let xml = r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"></feed>"#;
        assert!(parse_atom_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_metadata() {
        let meta = ArxivClient::metadata();
        assert_eq!(meta.id, "arxiv");
        assert!(!meta.requires_api_key);
    }
}
