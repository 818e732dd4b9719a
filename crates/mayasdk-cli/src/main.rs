//! `maya-sdk` — inspect the Maya devkit a build would use and stage built plugins.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mayasdk::config::{ENV_CONFIG, ENV_INSTALL_BASE, ENV_LOCATION, ENV_VERSION};
use mayasdk::{
    declare_managed_plugin, declare_plugin, locate, FsProbe, LocatorConfig, MayaSdk, Platform,
};

#[derive(Debug, Parser)]
#[command(name = "maya-sdk", version, about = "Locate a Maya devkit and stage Maya plugins")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every resolved devkit output.
    Locate {
        #[command(flatten)]
        sdk: SdkArgs,
        /// Print JSON instead of `key = value` lines.
        #[arg(long)]
        json: bool,
    },
    /// Print the cargo directives a build script would emit.
    Cargo {
        #[command(flatten)]
        sdk: SdkArgs,
        /// Also print the plugin link args for this crate name.
        #[arg(long)]
        plugin: Option<String>,
    },
    /// Copy a built cdylib to its Maya plugin file name.
    Stage {
        #[command(flatten)]
        sdk: SdkArgs,
        /// Crate (library) name of the plugin.
        #[arg(long)]
        name: String,
        /// Stage as a managed (.NET) plugin.
        #[arg(long)]
        managed: bool,
        /// Directory holding the built artifact, e.g. target/release.
        #[arg(long)]
        from: PathBuf,
        /// Destination directory.
        #[arg(long)]
        to: PathBuf,
    },
}

#[derive(Debug, Args)]
struct SdkArgs {
    /// Devkit version, e.g. 2024.
    #[arg(long = "maya-version", env = ENV_VERSION)]
    version: Option<String>,
    /// Directory containing maya<version> installs.
    #[arg(long, env = ENV_INSTALL_BASE)]
    install_base: Option<PathBuf>,
    /// Maya install searched after the configured location.
    #[arg(long, env = ENV_LOCATION)]
    location: Option<PathBuf>,
    /// Settings file with a [Maya] section.
    #[arg(long, env = ENV_CONFIG)]
    config: Option<PathBuf>,
    /// Cargo target triple to resolve for (defaults to the host).
    #[arg(long)]
    target: Option<String>,
}

impl SdkArgs {
    fn config(&self) -> anyhow::Result<LocatorConfig> {
        let platform = self
            .target
            .as_deref()
            .map(Platform::from_target)
            .unwrap_or_else(Platform::host);

        // clap has already folded the environment into these fields.
        let path_value = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        let config = LocatorConfig::from_lookup(platform, |key| match key {
            ENV_VERSION => self.version.clone(),
            ENV_INSTALL_BASE => path_value(&self.install_base),
            ENV_LOCATION => path_value(&self.location),
            ENV_CONFIG => path_value(&self.config),
            _ => None,
        })?;
        Ok(config)
    }

    fn locate(&self) -> anyhow::Result<MayaSdk> {
        let config = self.config()?;
        tracing::debug!(?config, "Resolved locator configuration");
        locate(&config, &FsProbe).context("Maya devkit lookup failed")
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Locate { sdk, json } => {
            let sdk = sdk.locate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sdk)?);
            } else {
                println!("{sdk}");
            }
        }
        Command::Cargo { sdk, plugin } => {
            let sdk = sdk.locate()?;
            sdk.publish()?;
            if let Some(name) = plugin {
                declare_plugin(name, &sdk).publish()?;
            }
        }
        Command::Stage {
            sdk,
            name,
            managed,
            from,
            to,
        } => {
            let sdk = sdk.locate()?;
            let target = if managed {
                declare_managed_plugin(name, &sdk)
            } else {
                declare_plugin(name, &sdk)
            };
            let staged = target
                .stage(&from, &to)
                .with_context(|| format!("Failed to stage {}", target.file_name()))?;
            println!("{}", staged.display());
        }
    }

    Ok(())
}
