//! An archive of radar volumes.
//!
//! The archive is a read-only directory tree with one zip container per radar per day:
//!
//! ```text
//! <root>/<radar id>/<year>/vol/<radar id>_<YYYYMMDD>.pvol.zip
//! ```
//!
//! Each container holds the volumes scanned that day, named `<radar id>_<YYYYMMDD>_<HHMMSS>.pvol.h5`
//! with the time in UTC. Nothing is indexed ahead of time; every query lists the containers it
//! needs again.

use std::path::{Path, PathBuf};

use crate::config;

pub use availability::DateScope;
pub use manifest::Manifest;

mod availability;
mod manifest;
pub(crate) mod naming;
mod paths;
mod query;

/// The archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    root: PathBuf, // The root directory.
}

impl Archive {
    /// Use the archive rooted at the given directory.
    ///
    /// Nothing is checked; a missing root simply holds no data.
    pub fn at(root: &dyn AsRef<Path>) -> Self {
        Archive {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Use the archive at the process-wide base path as it is right now.
    pub fn from_config() -> Self {
        Archive {
            root: config::base_path(),
        }
    }

    /// Retrieve a path to the root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for Archive {
    fn default() -> Self {
        Self::from_config()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
