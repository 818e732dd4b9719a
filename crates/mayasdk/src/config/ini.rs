//! Minimal INI reader for devkit settings files.
//!
//! Format:
//! - Sections in `[brackets]`
//! - Keys with `=` separator, values optionally wrapped in double quotes
//! - Comments start with `;` or `#`
//! - Keys before the first section belong to the unnamed global section

use std::path::Path;

use super::ConfigError;

/// A parsed INI file, sections kept in file order.
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    pub sections: Vec<IniSection>,
}

#[derive(Debug, Clone)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

impl IniFile {
    /// Parse INI content. Lines that are neither sections nor `key=value` are ignored.
    pub fn parse(content: &str) -> Self {
        let mut sections = Vec::new();
        let mut current = IniSection {
            name: String::new(),
            entries: Vec::new(),
        };

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }

            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                sections.push(current);
                current = IniSection {
                    name: trimmed[1..trimmed.len() - 1].trim().to_string(),
                    entries: Vec::new(),
                };
            } else if let Some(eq_pos) = trimmed.find('=') {
                let key = trimmed[..eq_pos].trim().to_string();
                let value = unquote(trimmed[eq_pos + 1..].trim()).to_string();
                current.entries.push((key, value));
            }
        }

        sections.push(current);
        IniFile { sections }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&content))
    }

    /// Get a value from a section by key. Section names match case-insensitively.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|s| s.name.eq_ignore_ascii_case(section))
            .flat_map(|s| s.entries.iter())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "[Maya]\r\nversion=2024\r\ninstallBase=/opt/autodesk\r\n";
        let ini = IniFile::parse(content);
        assert_eq!(ini.get("Maya", "version"), Some("2024"));
        assert_eq!(ini.get("Maya", "installBase"), Some("/opt/autodesk"));
    }

    #[test]
    fn test_section_case_insensitive() {
        let ini = IniFile::parse("[maya]\nversion=2023\n");
        assert_eq!(ini.get("Maya", "version"), Some("2023"));
    }

    #[test]
    fn test_comments_and_quotes() {
        let content = "; devkit settings\n# also a comment\n[Maya]\nlocation=\"C:/Program Files/Autodesk/Maya2024\"\n";
        let ini = IniFile::parse(content);
        assert_eq!(
            ini.get("Maya", "location"),
            Some("C:/Program Files/Autodesk/Maya2024")
        );
    }

    #[test]
    fn test_missing_key() {
        let ini = IniFile::parse("[Maya]\nversion=2024\n[Other]\nlocation=/x\n");
        assert_eq!(ini.get("Maya", "location"), None);
        assert_eq!(ini.get("Nope", "version"), None);
    }

    #[test]
    fn test_read_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = IniFile::read(&tmp.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
