//! Compound-container extraction boundary.
//!
//! Opening the outer compound document is not this crate's concern; callers
//! inject a [`ContainerExtractor`].  The crate owns only the scratch
//! directory the streams are extracted into: a uuid-scoped folder under the
//! system temp directory, removed on every exit path.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::Result;

/// Opens a container file and produces its directory tree of raw streams.
pub trait ContainerExtractor {
    /// Extract `container` into `out_dir` and return the root directory of
    /// the produced tree.
    fn extract(&self, container: &Path, out_dir: &Path) -> Result<PathBuf>;

    /// Write a human-readable listing of the container's tree.
    fn print_tree(&self, container: &Path) -> Result<()>;
}

/// A scratch directory for one extraction.
///
/// Each parser instance gets its own directory so that similarly named
/// files can be processed in parallel.  Owned directories are removed when
/// the value is dropped, whichever way the run ends.
#[derive(Debug)]
pub struct ExtractionDir {
    root: PathBuf,
    owned: bool,
}

impl ExtractionDir {
    /// Create a fresh scratch directory under the system temp directory,
    /// named by a random 128-bit identifier.
    pub fn scratch() -> Result<Self> {
        let root = std::env::temp_dir()
            .join("orcadrust")
            .join(Uuid::new_v4().simple().to_string());
        fs::create_dir_all(&root)?;
        Ok(Self { root, owned: true })
    }

    /// Wrap an existing directory without taking ownership; nothing is
    /// removed on drop.
    pub fn pre_extracted(root: PathBuf) -> Self {
        Self { root, owned: false }
    }

    /// Path of the scratch directory.
    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Drop for ExtractionDir {
    fn drop(&mut self) {
        if self.owned {
            if let Err(e) = fs::remove_dir_all(&self.root) {
                log::warn!("could not remove scratch dir {}: {e}", self.root.display());
            }
        }
    }
}
