//! Shelf/book/chapter/page hierarchy sources.

mod envelope;
mod local;
mod remote;

pub use local::LocalClient;
pub use remote::RemoteClient;

use crate::error::BookstackError;
use crate::types::{Book, Chapter, Page, Shelf};

/// Source of the content hierarchy, either a Bookstack instance or a vault.
pub trait Client {
    /// All shelves.
    fn shelves(&self) -> Result<Vec<Shelf>, BookstackError>;

    /// All books.
    fn books(&self) -> Result<Vec<Book>, BookstackError>;

    /// All chapters.
    fn chapters(&self) -> Result<Vec<Chapter>, BookstackError>;

    /// All pages.
    fn pages(&self) -> Result<Vec<Page>, BookstackError>;
}
