//! paperdesk-bibtex: BibTeX entry structures and formatting
//!
//! The export pipeline builds [`BibTeXEntry`] values from article records and
//! renders them with [`format_entry`]/[`format_entries`]. Parsing BibTeX back
//! in is not part of this crate.

pub mod entry;
pub mod formatter;

pub use entry::{BibTeXEntry, BibTeXEntryType, BibTeXField};
pub use formatter::{format_entries, format_entry};
