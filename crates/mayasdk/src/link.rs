//! Linkable units and their publication as Cargo build-script directives.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::WATCHED_ENV_VARS;

/// An imported library a plugin links against.
///
/// The primary unit (`Maya::Maya`) carries the devkit's include directory and
/// definitions; companion units hang off it in `link_dependencies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkUnit {
    pub name: String,
    pub location: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    pub definitions: Vec<String>,
    pub compile_options: Vec<String>,
    pub link_dependencies: Vec<LinkUnit>,
}

impl LinkUnit {
    /// A bare imported library with no interface properties.
    pub fn imported(name: impl Into<String>, location: PathBuf) -> Self {
        Self {
            name: name.into(),
            location,
            include_dirs: Vec::new(),
            definitions: Vec::new(),
            compile_options: Vec::new(),
            link_dependencies: Vec::new(),
        }
    }

    /// Add `dep` to the link interface, skipping units already present by name.
    pub fn append_dependency(&mut self, dep: LinkUnit) {
        if !self.link_dependencies.iter().any(|d| d.name == dep.name) {
            self.link_dependencies.push(dep);
        }
    }

    /// This unit's library followed by every library reachable through dependencies.
    pub fn transitive_libraries(&self) -> Vec<PathBuf> {
        let mut out = vec![self.location.clone()];
        for dep in &self.link_dependencies {
            for lib in dep.transitive_libraries() {
                if !out.contains(&lib) {
                    out.push(lib);
                }
            }
        }
        out
    }

    /// Write the `cargo:` directives that link this unit into the current crate.
    pub fn emit_cargo_directives(&self, out: &mut dyn Write) -> io::Result<()> {
        let libraries = self.transitive_libraries();

        let search_dirs: BTreeSet<&Path> = libraries.iter().filter_map(|l| l.parent()).collect();
        for dir in search_dirs {
            writeln!(out, "cargo:rustc-link-search=native={}", dir.display())?;
        }
        for lib in &libraries {
            if let Some(name) = link_name(lib) {
                writeln!(out, "cargo:rustc-link-lib=dylib={name}")?;
            }
        }

        // Metadata visible to dependents as DEP_<links>_INCLUDE / _DEFINES / _CFLAGS.
        if let Some(include) = self.include_dirs.first() {
            writeln!(out, "cargo:include={}", include.display())?;
        }
        if !self.definitions.is_empty() {
            writeln!(out, "cargo:defines={}", self.definitions.join(";"))?;
        }
        if !self.compile_options.is_empty() {
            writeln!(out, "cargo:cflags={}", self.compile_options.join(" "))?;
        }

        for var in WATCHED_ENV_VARS {
            writeln!(out, "cargo:rerun-if-env-changed={var}")?;
        }
        Ok(())
    }
}

/// Library name as `-l` expects it: `libOpenMaya.so` → `OpenMaya`, `OpenMaya.lib` → `OpenMaya`.
pub fn link_name(library: &Path) -> Option<String> {
    let stem = library.file_stem()?.to_str()?;
    let is_unix_style = matches!(
        library.extension().and_then(|e| e.to_str()),
        Some("so" | "dylib" | "a")
    );
    let name = if is_unix_style {
        stem.strip_prefix("lib").unwrap_or(stem)
    } else {
        stem
    };
    Some(name.to_string())
}
