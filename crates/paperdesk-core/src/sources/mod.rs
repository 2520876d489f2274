//! Search source plugins
//!
//! Only ArXiv is implemented; the traits module holds the pieces a second
//! source (e.g. Crossref) would share.

pub mod arxiv;
pub mod traits;

pub use arxiv::{build_api_query, parse_atom_feed, ArxivClient};
pub use traits::{SourceError, SourceMetadata};
