//! Bookstack content types.
//!
//! Records read from a local vault have no `id` or `slug`.

use serde::{Deserialize, Serialize};

/// Shelf (top-level vault directory).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Shelf {
    /// Shelf ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Shelf name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Book (directory inside a shelf).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Book ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Book name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Chapter (directory inside a book).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chapter {
    /// Chapter ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Chapter name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Owning book ID.
    #[serde(default)]
    pub book_id: Option<u64>,
}

/// Page (markdown note).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Page name.
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Owning book ID.
    #[serde(default)]
    pub book_id: Option<u64>,
}

/// `GET /api/system` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemInfo {
    /// Bookstack release, e.g. `v24.05`.
    pub version: String,
    /// Unique ID of this installation.
    #[serde(default)]
    pub instance_id: Option<String>,
    /// Configured application name.
    #[serde(default)]
    pub app_name: Option<String>,
}

impl Shelf {
    pub(crate) fn local(name: String) -> Self {
        Self {
            id: None,
            name,
            slug: None,
        }
    }
}

impl Book {
    pub(crate) fn local(name: String) -> Self {
        Self {
            id: None,
            name,
            slug: None,
        }
    }
}

impl Chapter {
    pub(crate) fn local(name: String) -> Self {
        Self {
            id: None,
            name,
            slug: None,
            book_id: None,
        }
    }
}

impl Page {
    pub(crate) fn local(name: String) -> Self {
        Self {
            id: None,
            name,
            slug: None,
            book_id: None,
        }
    }
}
