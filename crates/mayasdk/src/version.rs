//! Maya release identifiers.

use std::fmt;

use serde::Serialize;

/// A devkit version as configured, e.g. `2024` or `2018.6`.
///
/// The identifier is kept verbatim because it is part of the install directory
/// name. The leading release year drives the version-keyed platform entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SdkVersion {
    raw: String,
    release: Option<u32>,
}

impl SdkVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into().trim().to_string();
        let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
        let release = digits.parse().ok();
        Self { raw, release }
    }

    /// Parse a configured value; blank values count as unset.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self::new(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Leading release year, if the identifier starts with one.
    pub fn release(&self) -> Option<u32> {
        self.release
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<SdkVersion> for String {
    fn from(v: SdkVersion) -> Self {
        v.raw
    }
}
