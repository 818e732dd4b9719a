//! Locate an installed Maya devkit and build Maya plugins against it.
//!
//! Intended for a plugin crate's `build.rs`:
//!
//! ```no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdk = mayasdk::MayaSdk::from_env()?;
//!     sdk.publish()?;
//!     mayasdk::declare_plugin(std::env::var("CARGO_PKG_NAME")?, &sdk).publish()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod link;
pub mod locate;
pub mod platform;
pub mod plugin;
pub mod version;

pub use config::{ConfigError, LocatorConfig};
pub use link::LinkUnit;
pub use locate::probe::{FileProbe, FsProbe, Probed};
pub use locate::{locate, LocateError, MayaSdk};
pub use platform::{Platform, PlatformSpec};
pub use plugin::{
    apply_managed_plugin_conventions, apply_plugin_conventions, declare_managed_plugin,
    declare_plugin, PluginKind, PluginTarget, StageError,
};
pub use version::SdkVersion;
