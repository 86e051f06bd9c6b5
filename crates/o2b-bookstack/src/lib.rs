//! Bookstack integration for o2b.
//!
//! - [`RemoteClient`]: token-authenticated REST client for a Bookstack instance
//! - [`LocalClient`]: reads the same shelf/book/chapter/page hierarchy from a vault
//! - [`Client`]: the capability both of them provide
//!
//! # API Client
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use o2b_bookstack::{Client, Endpoint, RemoteClient};
//!
//! // Reads BOOKSTACK_TOKEN_ID, BOOKSTACK_TOKEN_SECRET and BOOKSTACK_BASE_URL
//! let client = RemoteClient::from_env();
//!
//! let books = client.get(&Endpoint::Books)?;
//! println!("{books}");
//!
//! for shelf in client.shelves()? {
//!     println!("{}", shelf.name);
//! }
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::{Client, LocalClient, RemoteClient};

// Credentials
mod credentials;
pub use credentials::Credentials;

// Endpoint registry
mod endpoint;
pub use endpoint::{ApiPath, DetailedLink, Endpoint, Listing, RequestBody, RequestKind};

// Types
mod types;
pub use types::{Book, Chapter, Page, Shelf, SystemInfo};

// Errors
pub mod error;
pub use error::BookstackError;
