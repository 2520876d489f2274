//! paperdesk-domain: Domain models shared across the paperdesk crates
//!
//! Currently this is just the [`Article`] record, the unit of everything the
//! library store persists and the exporters render.

pub mod article;

pub use article::Article;
