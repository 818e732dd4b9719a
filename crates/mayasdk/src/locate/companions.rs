//! Optional companion libraries.
//!
//! Devkits ship different subsets of these; a missing companion is skipped,
//! never an error.

use std::path::PathBuf;

use crate::link::LinkUnit;
use crate::platform::{Platform, COMPANION_LIBRARIES};

use super::probe::{find_file, FileProbe, Probed};

/// Output name under which a companion's path is reported, e.g. `MAYA_OpenMayaAnim_LIBRARY`.
pub fn output_name(library: &str) -> String {
    format!("MAYA_{library}_LIBRARY")
}

/// Probe every companion in `libraries` and attach each hit to `primary`.
///
/// Returns the paths found, in table order.
pub fn register_companions(
    probe: &dyn FileProbe,
    platform: Platform,
    library_dirs: &[PathBuf],
    libraries: &[&str],
    primary: &mut LinkUnit,
) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for library in libraries {
        let file_name = platform.library_file_name(library);
        match find_file(probe, "MAYA_COMPANION_LIBRARY", library_dirs, &file_name) {
            Probed::Found(path) => {
                tracing::debug!("Found {} at {}", output_name(library), path.display());
                primary.append_dependency(LinkUnit::imported(format!("Maya::{library}"), path.clone()));
                found.push(path);
            }
            Probed::Missing { .. } => {
                tracing::debug!("Companion library {} not present, skipping", library);
            }
        }
    }

    found
}

/// [`register_companions`] over the fixed companion table.
pub fn register_default_companions(
    probe: &dyn FileProbe,
    platform: Platform,
    library_dirs: &[PathBuf],
    primary: &mut LinkUnit,
) -> Vec<PathBuf> {
    register_companions(probe, platform, library_dirs, COMPANION_LIBRARIES, primary)
}
