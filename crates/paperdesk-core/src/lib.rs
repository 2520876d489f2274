//! paperdesk-core: Core library for the paperdesk ArXiv article manager
//!
//! This library provides:
//! - A durable, deduplicated article library keyed by ArXiv identifier
//! - Export of article collections to BibTeX and plain text
//! - ArXiv API query building and Atom feed parsing
//! - Summarization via an OpenAI-compatible chat completion endpoint
//! - Settings loading from TOML with environment overrides
//!
//! The presentation layer (GUI or CLI) lives elsewhere; everything here is
//! callable directly. Store and export operations are synchronous; the
//! search and summarization clients are async with blocking wrappers for
//! callers without a runtime.

pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod sources;
pub mod store;
pub mod summarize;

pub use config::{Settings, SummarizerSettings};
pub use error::{ExportError, LibraryError, PersistenceError, ServiceError};
pub use export::{to_bibtex, to_text};
pub use sources::arxiv::ArxivClient;
pub use store::LibraryStore;
pub use summarize::ChatCompletionSummarizer;

// Re-export the domain model at the crate root for convenience
pub use paperdesk_domain::Article;
