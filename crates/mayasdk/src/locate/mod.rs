//! Devkit locator.
//!
//! Searches the configured Maya location and the `MAYA_LOCATION` override for
//! the devkit header and the primary `OpenMaya` library. Both must exist; a
//! partially present devkit cannot produce a loadable plugin.

pub mod companions;
pub mod probe;

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, LocatorConfig};
use crate::link::LinkUnit;
use crate::platform::{Platform, MANAGED_ASSEMBLY, PRIMARY_LIBRARY, SDK_HEADER};
use crate::version::SdkVersion;

use probe::{
    candidate_dirs, find_dir_containing, find_file, push_unique, FileProbe, FsProbe, Probed,
};

/// Output name of the resolved header directory.
pub const INCLUDE_DIR_OUTPUT: &str = "MAYA_INCLUDE_DIR";
/// Output name of the resolved primary library.
pub const LIBRARY_OUTPUT: &str = "MAYA_LIBRARY";

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Maya version is not set (set MAYA_VERSION or configure a version)")]
    MissingVersion,

    /// Lists every unresolved required output and the directories searched for them.
    #[error("Could NOT find Maya (missing: {})", .missing.join(" "))]
    NotFound {
        missing: Vec<&'static str>,
        searched: Vec<PathBuf>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A located devkit and everything published for downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct MayaSdk {
    pub found: bool,
    pub platform: Platform,
    pub version: SdkVersion,
    /// `<install base>/maya<version>`; may differ from where files were found.
    pub location: PathBuf,
    pub include_dir: PathBuf,
    pub library: PathBuf,
    /// Primary library followed by every companion that was present.
    pub libraries: Vec<PathBuf>,
    pub definitions: Vec<String>,
    pub plugin_extension: String,
    /// `openmayacs.dll` referenced by managed plugins.
    pub managed_assembly: PathBuf,
    /// Roots the search used, in probe order.
    pub roots: Vec<PathBuf>,
    pub unit: LinkUnit,
}

impl MayaSdk {
    /// Locate from the process environment and the real filesystem.
    pub fn from_env() -> Result<Self, LocateError> {
        let config = LocatorConfig::from_env()?;
        locate(&config, &FsProbe)
    }

    /// Link the devkit into the crate whose build script is running.
    pub fn emit_cargo_directives(&self, out: &mut dyn Write) -> io::Result<()> {
        self.unit.emit_cargo_directives(out)?;
        writeln!(out, "cargo:root={}", self.location.display())
    }

    /// [`Self::emit_cargo_directives`] to stdout, where Cargo reads them.
    pub fn publish(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.emit_cargo_directives(&mut lock)
    }
}

impl fmt::Display for MayaSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "found = {}", self.found)?;
        writeln!(f, "platform = {}", self.platform)?;
        writeln!(f, "version = {}", self.version)?;
        writeln!(f, "location = {}", self.location.display())?;
        writeln!(f, "include_dir = {}", self.include_dir.display())?;
        writeln!(f, "library = {}", self.library.display())?;
        for lib in &self.libraries {
            writeln!(f, "libraries += {}", lib.display())?;
        }
        writeln!(f, "definitions = {}", self.definitions.join(";"))?;
        write!(f, "plugin_extension = {}", self.plugin_extension)
    }
}

/// Resolve the devkit described by `config`.
///
/// Fails before touching the filesystem when no version is configured.
pub fn locate(config: &LocatorConfig, probe: &dyn FileProbe) -> Result<MayaSdk, LocateError> {
    let version = config.version.clone().ok_or(LocateError::MissingVersion)?;
    let location = config
        .maya_location()
        .ok_or(LocateError::MissingVersion)?;
    let platform = config.platform;
    let spec = platform.spec();

    let mut roots = vec![location.clone()];
    if let Some(over) = &config.location_override {
        push_unique(&mut roots, over.clone());
    }

    let include_dirs = candidate_dirs(&roots, &platform.include_suffixes());
    let library_dirs = candidate_dirs(&roots, &[spec.library_suffix]);

    let include_dir = find_dir_containing(probe, INCLUDE_DIR_OUTPUT, &include_dirs, SDK_HEADER);
    let library = find_file(
        probe,
        LIBRARY_OUTPUT,
        &library_dirs,
        &platform.library_file_name(PRIMARY_LIBRARY),
    );

    let (include_dir, library) = match (include_dir, library) {
        (Probed::Found(include_dir), Probed::Found(library)) => (include_dir, library),
        (include_dir, library) => {
            let mut missing = Vec::new();
            let mut searched = Vec::new();
            for probed in [include_dir, library] {
                if let Probed::Missing { name, searched: dirs } = probed {
                    missing.push(name);
                    for dir in dirs {
                        push_unique(&mut searched, dir);
                    }
                }
            }
            return Err(LocateError::NotFound { missing, searched });
        }
    };

    tracing::info!(
        "Found Maya {} devkit: include {} library {}",
        version,
        include_dir.display(),
        library.display()
    );

    let definitions = platform.definitions();
    let mut unit = LinkUnit::imported("Maya::Maya", library.clone());
    unit.include_dirs.push(include_dir.clone());
    unit.definitions = definitions.clone();
    unit.compile_options = platform.compile_options(&version);

    let mut libraries = vec![library.clone()];
    libraries.extend(companions::register_default_companions(
        probe,
        platform,
        &library_dirs,
        &mut unit,
    ));

    // Only managed plugins need the assembly, so its absence is not fatal here.
    let binary_dirs = candidate_dirs(&roots, &[spec.binary_suffix]);
    let managed_assembly = find_file(probe, "MAYA_MANAGED_ASSEMBLY", &binary_dirs, MANAGED_ASSEMBLY)
        .into_found()
        .unwrap_or_else(|| location.join(spec.binary_suffix).join(MANAGED_ASSEMBLY));

    Ok(MayaSdk {
        found: true,
        platform,
        version,
        location,
        include_dir,
        library,
        libraries,
        definitions,
        plugin_extension: spec.plugin_extension.to_string(),
        managed_assembly,
        roots,
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path;

    /// Records every probed path and reports nothing as present.
    #[derive(Default)]
    struct RecordingProbe {
        probed: RefCell<Vec<PathBuf>>,
    }

    impl FileProbe for RecordingProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.probed.borrow_mut().push(path.to_path_buf());
            false
        }
    }

    #[test]
    fn test_missing_version_fails_before_probing() {
        let probe = RecordingProbe::default();
        let config = LocatorConfig::new(Platform::Linux).with_install_base("/opt/autodesk");
        let err = locate(&config, &probe).unwrap_err();
        assert!(matches!(err, LocateError::MissingVersion));
        assert!(probe.probed.borrow().is_empty());
    }

    #[test]
    fn test_nothing_found_reports_both_outputs() {
        let probe = RecordingProbe::default();
        let config = LocatorConfig::new(Platform::Linux)
            .with_version("2024")
            .with_install_base("/opt/autodesk")
            .with_location_override("/srv/maya");
        let err = locate(&config, &probe).unwrap_err();
        match err {
            LocateError::NotFound { missing, searched } => {
                assert_eq!(missing, vec![INCLUDE_DIR_OUTPUT, LIBRARY_OUTPUT]);
                assert_eq!(
                    searched,
                    vec![
                        PathBuf::from("/opt/autodesk/maya2024/include"),
                        PathBuf::from("/opt/autodesk/maya2024/devkit/include"),
                        PathBuf::from("/opt/autodesk/maya2024"),
                        PathBuf::from("/srv/maya/include"),
                        PathBuf::from("/srv/maya/devkit/include"),
                        PathBuf::from("/srv/maya"),
                        PathBuf::from("/opt/autodesk/maya2024/lib"),
                        PathBuf::from("/srv/maya/lib"),
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_probe_order_prefers_configured_location() {
        let probe = RecordingProbe::default();
        let config = LocatorConfig::new(Platform::Linux)
            .with_version("2024")
            .with_install_base("/opt/autodesk")
            .with_location_override("/srv/maya");
        let _ = locate(&config, &probe);

        let probed = probe.probed.borrow();
        assert_eq!(
            probed[0],
            PathBuf::from("/opt/autodesk/maya2024/include/maya/MFn.h")
        );
        assert!(probed.contains(&PathBuf::from("/srv/maya/devkit/include/maya/MFn.h")));
        assert!(probed.contains(&PathBuf::from("/srv/maya/lib/libOpenMaya.so")));
    }

    #[test]
    fn test_not_found_message_names_outputs() {
        let err = LocateError::NotFound {
            missing: vec![LIBRARY_OUTPUT],
            searched: Vec::new(),
        };
        assert_eq!(err.to_string(), "Could NOT find Maya (missing: MAYA_LIBRARY)");
    }
}
