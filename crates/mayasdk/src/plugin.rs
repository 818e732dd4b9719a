//! Maya plugin targets.
//!
//! A plugin is a `cdylib` whose file Maya loads by extension, so applying the
//! conventions means choosing its final file name, the linker arguments that
//! export the entry points, and (for managed plugins) the assemblies it
//! references. Cargo cannot rename artifacts itself; [`PluginTarget::stage`]
//! copies the built library to its plugin name.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::locate::MayaSdk;
use crate::platform::Platform;

/// Suffix Maya expects for .NET plugin assemblies.
pub const MANAGED_PLUGIN_EXTENSION: &str = ".nll.dll";

/// Framework assemblies every managed plugin references.
pub const MANAGED_FRAMEWORK_REFERENCES: &[&str] = &[
    "Microsoft.CSharp",
    "PresentationCore",
    "PresentationFramework",
    "System",
    "System.Core",
    "System.Data",
    "System.Data.DataSetExtensions",
    "System.Drawing",
    "System.Net.Http",
    "System.Xaml",
    "System.Xml",
    "System.Xml.Linq",
    "WindowsBase",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Native,
    Managed,
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginKind::Native => f.write_str("native"),
            PluginKind::Managed => f.write_str("managed"),
        }
    }
}

/// Everything a plugin flavour changes on a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFlavor {
    pub kind: PluginKind,
    pub suffix: String,
    pub link_args: Vec<String>,
    pub references: Vec<String>,
}

impl PluginFlavor {
    /// Native flavour: platform plugin extension, export flags where the platform needs them.
    pub fn native(sdk: &MayaSdk) -> Self {
        let spec = sdk.platform.spec();
        Self {
            kind: PluginKind::Native,
            suffix: spec.plugin_extension.to_string(),
            link_args: spec.export_link_args.iter().map(|a| a.to_string()).collect(),
            references: Vec::new(),
        }
    }

    /// Managed flavour: `.nll.dll`, framework references plus the devkit's assembly.
    pub fn managed(sdk: &MayaSdk) -> Self {
        let mut references: Vec<String> = MANAGED_FRAMEWORK_REFERENCES
            .iter()
            .map(|r| r.to_string())
            .collect();
        references.push(sdk.managed_assembly.display().to_string());
        Self {
            kind: PluginKind::Managed,
            suffix: MANAGED_PLUGIN_EXTENSION.to_string(),
            link_args: Vec::new(),
            references,
        }
    }
}

/// A shared-library build target Maya will load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginTarget {
    pub name: String,
    pub kind: PluginKind,
    pub prefix: String,
    pub suffix: String,
    pub link_args: Vec<String>,
    pub references: Vec<String>,
    /// Platform whose artifact naming applies when staging.
    pub platform: Platform,
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Built artifact not found at {0}")]
    ArtifactMissing(PathBuf),

    #[error("Failed to copy {from} -> {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PluginTarget {
    /// A plain shared library with the platform's default naming.
    pub fn shared_library(name: impl Into<String>, platform: Platform) -> Self {
        let spec = platform.spec();
        Self {
            name: name.into(),
            kind: PluginKind::Native,
            prefix: spec.artifact_prefix.to_string(),
            suffix: spec.artifact_extension.to_string(),
            link_args: Vec::new(),
            references: Vec::new(),
            platform,
        }
    }

    /// Final file name, e.g. `myNode.mll`.
    pub fn file_name(&self) -> String {
        format!("{}{}{}", self.prefix, self.name, self.suffix)
    }

    /// File name Cargo gives the built `cdylib`.
    pub fn artifact_name(&self) -> String {
        self.platform.artifact_file_name(&self.name)
    }

    /// Pass the link args to the linker of the crate whose build script is running.
    pub fn emit_cargo_directives(&self, out: &mut dyn Write) -> io::Result<()> {
        for arg in &self.link_args {
            writeln!(out, "cargo:rustc-cdylib-link-arg={arg}")?;
        }
        Ok(())
    }

    /// [`Self::emit_cargo_directives`] to stdout, where Cargo reads them.
    pub fn publish(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.emit_cargo_directives(&mut lock)
    }

    /// Write a compiler response file with one `/reference:` line per reference.
    pub fn write_response_file(&self, path: &Path) -> Result<(), StageError> {
        let content: String = self
            .references
            .iter()
            .map(|r| format!("/reference:{}\n", reference_file(r)))
            .collect();
        ensure_parent_dirs(path)
            .and_then(|_| std::fs::write(path, content))
            .map_err(|source| StageError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Copy the built artifact from `built_dir` to `dest_dir/<file_name>`.
    pub fn stage(&self, built_dir: &Path, dest_dir: &Path) -> Result<PathBuf, StageError> {
        let from = built_dir.join(self.artifact_name());
        if !from.is_file() {
            return Err(StageError::ArtifactMissing(from));
        }
        let to = dest_dir.join(self.file_name());

        ensure_parent_dirs(&to)
            .and_then(|_| std::fs::copy(&from, &to))
            .map_err(|source| StageError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;

        tracing::info!("Staged {} plugin {} -> {}", self.kind, from.display(), to.display());
        Ok(to)
    }
}

/// Framework names become `<name>.dll`; paths are passed through.
fn reference_file(reference: &str) -> String {
    if reference.ends_with(".dll") {
        reference.to_string()
    } else {
        format!("{reference}.dll")
    }
}

fn ensure_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Set `target`'s suffix, clear its prefix, and add the flavour's link args and
/// references that are not already present. Applying the same flavour twice is a no-op.
pub fn apply_flavor(target: &mut PluginTarget, flavor: &PluginFlavor) {
    target.kind = flavor.kind;
    target.prefix.clear();
    target.suffix = flavor.suffix.clone();
    append_missing(&mut target.link_args, &flavor.link_args);
    append_missing(&mut target.references, &flavor.references);
}

fn append_missing(existing: &mut Vec<String>, additions: &[String]) {
    for item in additions {
        if !existing.contains(item) {
            existing.push(item.clone());
        }
    }
}

pub fn apply_plugin_conventions(target: &mut PluginTarget, sdk: &MayaSdk) {
    apply_flavor(target, &PluginFlavor::native(sdk));
}

/// Declare a shared library named `name` and apply the native plugin conventions.
pub fn declare_plugin(name: impl Into<String>, sdk: &MayaSdk) -> PluginTarget {
    let mut target = PluginTarget::shared_library(name, sdk.platform);
    apply_plugin_conventions(&mut target, sdk);
    target
}

pub fn apply_managed_plugin_conventions(target: &mut PluginTarget, sdk: &MayaSdk) {
    apply_flavor(target, &PluginFlavor::managed(sdk));
}

/// Declare a shared library named `name` and apply the managed plugin conventions.
pub fn declare_managed_plugin(name: impl Into<String>, sdk: &MayaSdk) -> PluginTarget {
    let mut target = PluginTarget::shared_library(name, sdk.platform);
    apply_managed_plugin_conventions(&mut target, sdk);
    target
}
