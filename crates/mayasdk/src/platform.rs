//! Platform definitions — where the Maya devkit lives and how plugins are named.
//!
//! Each supported platform has a static record with install locations, devkit
//! subdirectories, library naming and plugin conventions. Adding a platform is a
//! new entry in `KNOWN_PLATFORMS`, not a new branch.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::version::SdkVersion;

/// Host operating system family a devkit is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

/// Static per-platform lookup data (known at compile time).
#[derive(Debug)]
pub struct PlatformSpec {
    pub platform: Platform,
    pub install_base_default: &'static str,
    /// Devkit header directory relative to the Maya location.
    pub include_suffix: &'static str,
    /// Import library directory relative to the Maya location.
    pub library_suffix: &'static str,
    pub binary_suffix: &'static str,
    pub library_prefix: &'static str,
    pub library_extension: &'static str,
    /// Appended to `COMMON_DEFINITIONS`.
    pub definition: &'static str,
    pub plugin_extension: &'static str,
    /// Linker arguments every native plugin needs so Maya can find its entry points.
    pub export_link_args: &'static [&'static str],
    /// Prefix and extension Cargo gives a `cdylib` artifact.
    pub artifact_prefix: &'static str,
    pub artifact_extension: &'static str,
}

/// Definitions every Maya plugin is compiled with.
pub const COMMON_DEFINITIONS: &[&str] = &["REQUIRE_IOSTREAM", "_BOOL"];

/// Header whose presence identifies a devkit include directory.
pub const SDK_HEADER: &str = "maya/MFn.h";

/// Header suffixes tried after the platform's own include suffix.
pub const INCLUDE_SUFFIX: &str = "include";
pub const DEVKIT_INCLUDE_SUFFIX: &str = "devkit/include";

/// The library that gates found/not-found for the whole devkit.
pub const PRIMARY_LIBRARY: &str = "OpenMaya";

/// .NET assembly managed plugins reference, under the binary suffix.
pub const MANAGED_ASSEMBLY: &str = "openmayacs.dll";

/// Optional libraries shipped with some devkits.
pub const COMPANION_LIBRARIES: &[&str] = &[
    "OpenMayaAnim",
    "OpenMayaFX",
    "OpenMayaRender",
    "OpenMayaUI",
    "Foundation",
    "clew",
];

/// Linux installs before this release live in `maya<version>-x64`.
const LINUX_X64_SUFFIX_BEFORE: u32 = 2016;

/// macOS devkits before this release were built against libstdc++.
const MACOS_LIBSTDCXX_BEFORE: u32 = 2017;

const KNOWN_PLATFORMS: &[PlatformSpec] = &[
    PlatformSpec {
        platform: Platform::Windows,
        install_base_default: "C:/Program Files/Autodesk",
        include_suffix: "include",
        library_suffix: "lib",
        binary_suffix: "bin",
        library_prefix: "",
        library_extension: ".lib",
        definition: "NT_PLUGIN",
        plugin_extension: ".mll",
        export_link_args: &["/export:initializePlugin", "/export:uninitializePlugin"],
        artifact_prefix: "",
        artifact_extension: ".dll",
    },
    PlatformSpec {
        platform: Platform::MacOs,
        install_base_default: "/Applications/Autodesk",
        include_suffix: "devkit/include",
        library_suffix: "Maya.app/Contents/MacOS",
        binary_suffix: "Maya.app/Contents/bin",
        library_prefix: "lib",
        library_extension: ".dylib",
        definition: "OSMac_",
        plugin_extension: ".bundle",
        export_link_args: &[],
        artifact_prefix: "lib",
        artifact_extension: ".dylib",
    },
    PlatformSpec {
        platform: Platform::Linux,
        install_base_default: "/usr/autodesk",
        include_suffix: "include",
        library_suffix: "lib",
        binary_suffix: "bin",
        library_prefix: "lib",
        library_extension: ".so",
        definition: "LINUX",
        plugin_extension: ".so",
        export_link_args: &[],
        artifact_prefix: "lib",
        artifact_extension: ".so",
    },
];

impl Platform {
    /// The platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Platform for a Cargo target triple (the `TARGET` env var in build scripts).
    pub fn from_target(triple: &str) -> Self {
        if triple.contains("windows") {
            Platform::Windows
        } else if triple.contains("apple-darwin") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    pub fn spec(self) -> &'static PlatformSpec {
        // Every variant has an entry; `test_every_platform_has_spec` guards this.
        KNOWN_PLATFORMS
            .iter()
            .find(|s| s.platform == self)
            .unwrap_or(&KNOWN_PLATFORMS[0])
    }

    /// Directory name of a Maya install under the install base.
    pub fn location_dir_name(self, version: &SdkVersion) -> String {
        let suffix = match (self, version.release()) {
            (Platform::Linux, Some(year)) if year < LINUX_X64_SUFFIX_BEFORE => "-x64",
            _ => "",
        };
        format!("maya{}{}", version.as_str(), suffix)
    }

    /// Compile options the link unit must carry for this devkit release.
    pub fn compile_options(self, version: &SdkVersion) -> Vec<String> {
        match (self, version.release()) {
            (Platform::MacOs, Some(year)) if year < MACOS_LIBSTDCXX_BEFORE => {
                vec!["-std=c++0x".to_string(), "-stdlib=libstdc++".to_string()]
            }
            _ => Vec::new(),
        }
    }

    /// Full set of preprocessor definitions for plugins on this platform.
    pub fn definitions(self) -> Vec<String> {
        COMMON_DEFINITIONS
            .iter()
            .chain(std::iter::once(&self.spec().definition))
            .map(|d| d.to_string())
            .collect()
    }

    /// File name of a devkit library, e.g. `libOpenMaya.so` or `OpenMaya.lib`.
    pub fn library_file_name(self, name: &str) -> String {
        let spec = self.spec();
        format!("{}{}{}", spec.library_prefix, name, spec.library_extension)
    }

    /// File name Cargo produces for a `cdylib` crate named `crate_name`.
    pub fn artifact_file_name(self, crate_name: &str) -> String {
        let spec = self.spec();
        format!(
            "{}{}{}",
            spec.artifact_prefix,
            crate_name.replace('-', "_"),
            spec.artifact_extension
        )
    }

    /// Default install base, e.g. `/usr/autodesk`.
    pub fn default_install_base(self) -> PathBuf {
        PathBuf::from(self.spec().install_base_default)
    }

    /// Header search suffixes in probe order, without duplicates.
    pub fn include_suffixes(self) -> Vec<&'static str> {
        let mut suffixes = vec![self.spec().include_suffix];
        for suffix in [INCLUDE_SUFFIX, DEVKIT_INCLUDE_SUFFIX] {
            if !suffixes.contains(&suffix) {
                suffixes.push(suffix);
            }
        }
        suffixes
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        };
        f.write_str(name)
    }
}
