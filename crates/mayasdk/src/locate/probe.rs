//! Filesystem probing for devkit files.
//!
//! The locator asks a [`FileProbe`] whether candidate files exist, so tests can
//! observe which paths were (or were not) touched.

use std::path::{Path, PathBuf};

/// Answers "is there a file here?" for the locator.
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Outcome of searching for one named output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probed {
    Found(PathBuf),
    Missing {
        name: &'static str,
        /// Every directory that was checked, in order.
        searched: Vec<PathBuf>,
    },
}

impl Probed {
    pub fn into_found(self) -> Option<PathBuf> {
        match self {
            Probed::Found(path) => Some(path),
            Probed::Missing { .. } => None,
        }
    }
}

/// Directories to search: each root joined with every suffix, then the bare root.
pub fn candidate_dirs(roots: &[PathBuf], suffixes: &[&str]) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for root in roots {
        for suffix in suffixes {
            push_unique(&mut dirs, root.join(suffix));
        }
        push_unique(&mut dirs, root.clone());
    }
    dirs
}

/// Find the first directory `d` in `dirs` where `d/relative` is a file.
///
/// Returns the directory itself (like a header search path), not the file.
pub fn find_dir_containing(
    probe: &dyn FileProbe,
    name: &'static str,
    dirs: &[PathBuf],
    relative: &str,
) -> Probed {
    for dir in dirs {
        let candidate = dir.join(relative);
        tracing::debug!("Probing {} at {}", name, candidate.display());
        if probe.is_file(&candidate) {
            return Probed::Found(dir.clone());
        }
    }
    Probed::Missing {
        name,
        searched: dirs.to_vec(),
    }
}

/// Find the first existing `d/file_name` in `dirs` and return the file path.
pub fn find_file(
    probe: &dyn FileProbe,
    name: &'static str,
    dirs: &[PathBuf],
    file_name: &str,
) -> Probed {
    for dir in dirs {
        let candidate = dir.join(file_name);
        tracing::debug!("Probing {} at {}", name, candidate.display());
        if probe.is_file(&candidate) {
            return Probed::Found(candidate);
        }
    }
    Probed::Missing {
        name,
        searched: dirs.to_vec(),
    }
}

pub(crate) fn push_unique(dirs: &mut Vec<PathBuf>, dir: PathBuf) {
    if !dirs.contains(&dir) {
        dirs.push(dir);
    }
}
