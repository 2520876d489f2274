//! The library store: a durable, deduplicated collection of articles
//!
//! Articles are kept in insertion order and keyed by ArXiv identifier.
//! Every mutating call persists the whole collection to `articles.json`
//! under the storage directory before returning, so a process restart never
//! loses data. Writes go to a sibling temp file followed by a rename, and the
//! in-memory collection is only swapped after the write succeeds.
//!
//! The store is synchronous and not internally locked; callers running
//! multiple threads must serialize access themselves.

use std::fs;
use std::path::{Path, PathBuf};

use paperdesk_domain::Article;
use tracing::{error, info};

use crate::error::{LibraryError, PersistenceError};

const LIBRARY_FILE: &str = "articles.json";

pub struct LibraryStore {
    path: PathBuf,
    articles: Vec<Article>,
}

impl LibraryStore {
    /// Open the library under `storage_dir`, creating the directory if
    /// needed. A missing library file yields an empty store; an unreadable
    /// or corrupt one is an error.
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let storage_dir = storage_dir.as_ref();
        fs::create_dir_all(storage_dir).map_err(PersistenceError::Io)?;

        let path = storage_dir.join(LIBRARY_FILE);
        let articles = if path.exists() {
            let data = fs::read_to_string(&path).map_err(PersistenceError::Io)?;
            serde_json::from_str(&data).map_err(PersistenceError::Serialization)?
        } else {
            Vec::new()
        };

        Ok(Self { path, articles })
    }

    /// Path of the on-disk library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace by ArXiv identifier; returns the stored record.
    ///
    /// Last write wins: adding an article whose id is already present
    /// replaces the stored entry without error. `added_at` is stamped on
    /// first insert and carried over on replacement.
    pub fn add(&mut self, mut article: Article) -> Result<Article, LibraryError> {
        let existing = self
            .articles
            .iter()
            .position(|a| a.arxiv_id == article.arxiv_id);

        if article.added_at.is_none() {
            article.added_at = match existing {
                Some(pos) => self.articles[pos].added_at.clone(),
                None => None,
            }
            .or_else(|| Some(chrono::Utc::now().to_rfc3339()));
        }

        let mut next = self.articles.clone();
        match existing {
            Some(pos) => next[pos] = article.clone(),
            None => next.push(article.clone()),
        }
        self.persist(&next)?;
        self.articles = next;

        info!(arxiv_id = %article.arxiv_id, "added article to library");
        Ok(article)
    }

    /// Look up an article by ArXiv identifier
    pub fn get(&self, arxiv_id: &str) -> Result<&Article, LibraryError> {
        self.articles
            .iter()
            .find(|a| a.arxiv_id == arxiv_id)
            .ok_or_else(|| LibraryError::not_found(arxiv_id))
    }

    /// Delete an article; fails with `NotFound` if absent
    pub fn remove(&mut self, arxiv_id: &str) -> Result<(), LibraryError> {
        let pos = self
            .articles
            .iter()
            .position(|a| a.arxiv_id == arxiv_id)
            .ok_or_else(|| LibraryError::not_found(arxiv_id))?;

        let mut next = self.articles.clone();
        next.remove(pos);
        self.persist(&next)?;
        self.articles = next;

        info!(arxiv_id, "removed article from library");
        Ok(())
    }

    /// Overwrite the AI summary of a stored article; returns the updated
    /// record
    pub fn update_summary(
        &mut self,
        arxiv_id: &str,
        summary: impl Into<String>,
    ) -> Result<Article, LibraryError> {
        let pos = self
            .articles
            .iter()
            .position(|a| a.arxiv_id == arxiv_id)
            .ok_or_else(|| LibraryError::not_found(arxiv_id))?;

        let mut next = self.articles.clone();
        next[pos].summary = Some(summary.into());
        self.persist(&next)?;
        self.articles = next;

        Ok(self.articles[pos].clone())
    }

    /// All articles in insertion order
    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Write the candidate collection to disk via temp file + rename.
    ///
    /// The previous file stays intact unless the rename succeeds, so a
    /// failed write never leaves a partially written library behind.
    fn persist(&self, articles: &[Article]) -> Result<(), PersistenceError> {
        let data = serde_json::to_string_pretty(articles)?;

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, data).and_then(|_| fs::rename(&tmp_path, &self.path))
        {
            error!(path = %self.path.display(), "failed to persist library: {e}");
            let _ = fs::remove_file(&tmp_path);
            return Err(PersistenceError::Io(e));
        }
        Ok(())
    }
}
