//! Vault directory reader.
//!
//! Layout mirrors Bookstack: `<vault>/<shelf>/<book>/<chapter>/<page>.md`.
//! Pages may also sit directly in a book, or deeper below a chapter.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Client;
use crate::error::BookstackError;
use crate::types::{Book, Chapter, Page, Shelf};

/// Extension of note files.
const PAGE_EXTENSION: &str = "md";

/// Reads the content hierarchy from a local vault.
pub struct LocalClient {
    root: PathBuf,
    excluded: Vec<String>,
}

impl LocalClient {
    /// Create a reader for the vault at `root`.
    ///
    /// Directories whose name is listed in `excluded` are skipped at every
    /// level, as are hidden entries such as `.obsidian`.
    pub fn new(root: impl Into<PathBuf>, excluded: Vec<String>) -> Self {
        Self {
            root: root.into(),
            excluded,
        }
    }

    /// Vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn shelf_dirs(&self) -> Result<Vec<PathBuf>, BookstackError> {
        self.subdirs(&self.root)
    }

    fn book_dirs(&self) -> Result<Vec<PathBuf>, BookstackError> {
        let mut books = Vec::new();
        for shelf in self.shelf_dirs()? {
            books.extend(self.subdirs(&shelf)?);
        }
        Ok(books)
    }

    /// Visible, non-excluded subdirectories of `dir`.
    fn subdirs(&self, dir: &Path) -> Result<Vec<PathBuf>, BookstackError> {
        Ok(self
            .entries(dir)?
            .into_iter()
            .filter(|path| path.is_dir())
            .collect())
    }

    /// Markdown files at any depth below `dir`.
    ///
    /// Symlinked directories are not followed, so a link back to an
    /// ancestor cannot loop.
    fn page_files(&self, dir: &Path, pages: &mut Vec<PathBuf>) -> Result<(), BookstackError> {
        for path in self.entries(dir)? {
            if path.is_symlink() && path.is_dir() {
                debug!("Skipping symlinked directory {}", path.display());
            } else if path.is_dir() {
                self.page_files(&path, pages)?;
            } else if path.extension().is_some_and(|ext| ext == PAGE_EXTENSION) {
                pages.push(path);
            }
        }
        Ok(())
    }

    fn entries(&self, dir: &Path) -> Result<Vec<PathBuf>, BookstackError> {
        let io_err = |source| BookstackError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || self.excluded.iter().any(|e| e == name) {
                continue;
            }
            entries.push(path);
        }
        Ok(entries)
    }
}

impl Client for LocalClient {
    fn shelves(&self) -> Result<Vec<Shelf>, BookstackError> {
        Ok(sorted_names(&self.shelf_dirs()?, Path::file_name)
            .into_iter()
            .map(Shelf::local)
            .collect())
    }

    fn books(&self) -> Result<Vec<Book>, BookstackError> {
        Ok(sorted_names(&self.book_dirs()?, Path::file_name)
            .into_iter()
            .map(Book::local)
            .collect())
    }

    fn chapters(&self) -> Result<Vec<Chapter>, BookstackError> {
        let mut chapters = Vec::new();
        for book in self.book_dirs()? {
            chapters.extend(self.subdirs(&book)?);
        }
        Ok(sorted_names(&chapters, Path::file_name)
            .into_iter()
            .map(Chapter::local)
            .collect())
    }

    fn pages(&self) -> Result<Vec<Page>, BookstackError> {
        let mut files = Vec::new();
        for book in self.book_dirs()? {
            self.page_files(&book, &mut files)?;
        }
        debug!("Found {} pages in {}", files.len(), self.root.display());
        Ok(sorted_names(&files, Path::file_stem)
            .into_iter()
            .map(Page::local)
            .collect())
    }
}

/// Names of `paths` as extracted by `name`, sorted.
fn sorted_names(paths: &[PathBuf], name: fn(&Path) -> Option<&OsStr>) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .filter_map(|p| name(p))
        .map(|stem| stem.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "# note\n").unwrap();
    }

    /// Two shelves, three books, one chapter, hidden and excluded noise.
    fn vault() -> TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "Work/Projects/Roadmap.md");
        touch(root, "Work/Projects/Q3/Planning.md");
        touch(root, "Work/Projects/Q3/Deep/Retro.md");
        touch(root, "Work/Meetings/Standup.md");
        touch(root, "Home/Recipes/Bread.md");
        touch(root, "Home/Recipes/shopping.txt");
        touch(root, "Home/Templates/Daily.md");
        touch(root, ".obsidian/workspace.md");
        touch(root, "Work/Projects/.trash/Old.md");
        touch(root, "README.md");
        temp_dir
    }

    #[test]
    fn test_shelves() {
        let vault = vault();
        let client = LocalClient::new(vault.path(), Vec::new());

        let shelves = client.shelves().unwrap();
        assert_eq!(
            shelves.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["Home", "Work"]
        );
        assert!(shelves.iter().all(|s| s.id.is_none()));
    }

    #[test]
    fn test_books_skip_excluded() {
        let vault = vault();
        let client = LocalClient::new(vault.path(), vec!["Templates".to_owned()]);

        let books = client.books().unwrap();
        assert_eq!(
            books.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
            vec!["Meetings", "Projects", "Recipes"]
        );
    }

    #[test]
    fn test_chapters() {
        let vault = vault();
        let client = LocalClient::new(vault.path(), Vec::new());

        let chapters = client.chapters().unwrap();
        assert_eq!(
            chapters.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            vec!["Q3"]
        );
    }

    #[test]
    fn test_pages_recurse_below_books() {
        let vault = vault();
        let client = LocalClient::new(vault.path(), vec!["Templates".to_owned()]);

        let pages = client.pages().unwrap();
        assert_eq!(
            pages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Bread", "Planning", "Retro", "Roadmap", "Standup"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_pages_ignore_symlink_cycles() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        touch(root, "Work/Book/a.md");
        std::os::unix::fs::symlink(root.join("Work/Book"), root.join("Work/Book/loop")).unwrap();
        let client = LocalClient::new(root, Vec::new());

        let pages = client.pages().unwrap();
        assert_eq!(
            pages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["a"]
        );
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let client = LocalClient::new(temp_dir.path().join("absent"), Vec::new());

        let err = client.shelves().unwrap_err();
        assert!(matches!(err, BookstackError::Io { .. }));
        assert!(err.to_string().contains("absent"));
    }
}
