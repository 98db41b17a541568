//! Access to the files a model is loaded from
//!
//! Models live either in packed containers or in plain directory trees. The
//! [`ModelArchive`] trait abstracts over both; paths are archive-relative and
//! use `/` as separator. [`DirectoryArchive`] serves files from a directory
//! on disk.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::error::{Md2Error, Result};

/// Source of model and skin files
pub trait ModelArchive {
    /// Stream returned by [`ModelArchive::open`]
    type Stream: Read + Seek;

    /// Open a file for reading
    fn open(&self, path: &str) -> Result<Self::Stream>;

    /// Check whether a file exists
    fn exists(&self, path: &str) -> bool;

    /// Whether this archive is a directory tree rather than a packed container
    fn is_directory(&self) -> bool;

    /// Location on disk the archive paths are relative to
    fn base_path(&self) -> &Path;

    /// Names of the files directly inside `dir`, sorted
    fn list_dir(&self, dir: &str) -> Result<Vec<String>>;
}

/// Directory tree on disk used as an archive
#[derive(Debug, Clone)]
pub struct DirectoryArchive {
    root: PathBuf,
}

impl DirectoryArchive {
    /// Create an archive rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Absolute location of an archive-relative path
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        path.split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl ModelArchive for DirectoryArchive {
    type Stream = BufReader<File>;

    fn open(&self, path: &str) -> Result<Self::Stream> {
        let full_path = self.resolve_path(path);
        let file = File::open(&full_path).map_err(|source| Md2Error::Open {
            path: full_path.display().to_string(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path(path).is_file()
    }

    fn is_directory(&self) -> bool {
        true
    }

    fn base_path(&self) -> &Path {
        &self.root
    }

    fn list_dir(&self, dir: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.resolve_path(dir))? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
