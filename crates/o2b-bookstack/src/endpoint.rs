//! Bookstack endpoint registry and request descriptors.

use std::borrow::Cow;
use std::fmt;

/// Something that resolves to a path below the instance base URL.
pub trait ApiPath {
    /// Path starting with `/api/`.
    fn path(&self) -> Cow<'_, str>;
}

/// Bookstack REST collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Shelves,
    Books,
    Chapters,
    Pages,
    Attachments,
    ImageGallery,
    SystemInfo,
}

impl Endpoint {
    /// Path suffix for this collection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shelves => "/api/shelves",
            Self::Books => "/api/books",
            Self::Chapters => "/api/chapters",
            Self::Pages => "/api/pages",
            Self::Attachments => "/api/attachments",
            Self::ImageGallery => "/api/image-gallery",
            Self::SystemInfo => "/api/system",
        }
    }

    /// Link to a single record in this collection.
    #[must_use]
    pub fn detail(self, id: u64) -> DetailedLink {
        DetailedLink {
            endpoint: self,
            id,
            action: None,
        }
    }
}

impl ApiPath for Endpoint {
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Precomposed link to one record, e.g. `/api/pages/12/export/markdown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedLink {
    endpoint: Endpoint,
    id: u64,
    action: Option<&'static str>,
}

impl DetailedLink {
    /// Append a sub-resource such as `export/markdown`.
    #[must_use]
    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = Some(action);
        self
    }
}

impl ApiPath for DetailedLink {
    fn path(&self) -> Cow<'_, str> {
        let base = format!("{}/{}", self.endpoint.as_str(), self.id);
        match self.action {
            Some(action) => Cow::Owned(format!("{base}/{action}")),
            None => Cow::Owned(base),
        }
    }
}

/// One page of a collection listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    pub endpoint: Endpoint,
    pub count: usize,
    pub offset: usize,
}

impl ApiPath for Listing {
    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!(
            "{}?count={}&offset={}",
            self.endpoint.as_str(),
            self.count,
            self.offset
        ))
    }
}

/// HTTP verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    None,
    /// Sent as-is.
    Raw(Vec<u8>),
    /// Serialized with `Content-Type: application/json`.
    Json(serde_json::Value),
}
