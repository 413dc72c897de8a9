use std::path::Path;

use crate::error::{ConfigError, Result};

/// Name of the section holding the global configuration.
pub const GENERAL_SECTION: &str = "general";

/// One `name = value` line of a configuration section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
    pub lineno: usize,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>, lineno: usize) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            lineno,
        }
    }
}

/// Read access to sectioned configuration text.
///
/// Entries keep their source order and line numbers. Key lookups are
/// case-insensitive, section names are matched exactly.
pub trait ConfigSource {
    /// Section names in source order.
    fn section_names(&self) -> Vec<&str>;

    /// Entries of a section, `None` when the section does not exist.
    fn entries(&self, section: &str) -> Option<&[ConfigEntry]>;

    fn has_section(&self, section: &str) -> bool {
        self.entries(section).is_some()
    }

    /// First entry named `key` in `section`.
    fn get(&self, section: &str, key: &str) -> Option<&ConfigEntry> {
        self.entries(section)?
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(key))
    }

    /// Every entry named `key` in `section`, in order.
    fn get_all(&self, section: &str, key: &str) -> Vec<&ConfigEntry> {
        self.entries(section)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| entry.name.eq_ignore_ascii_case(key))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<ConfigEntry>,
}

/// Ordered in-memory configuration, usually parsed from `sccp.conf`.
///
/// The text format is the classic one: `[section]` headers, `name = value`
/// or `name => value` lines, and comments introduced by `;` anywhere or `#`
/// at the start of a line. Repeated section headers continue the earlier
/// section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: Vec<Section>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut store = Self::new();
        let mut current: Option<usize> = None;

        for (index, raw) in text.lines().enumerate() {
            let lineno = index + 1;
            let line = strip_comment(raw).trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(end) = rest.find(']') else {
                    return Err(parse_error(lineno, "unterminated section header"));
                };
                let name = rest[..end].trim();
                let trailer = rest[end + 1..].trim();
                if name.is_empty() {
                    return Err(parse_error(lineno, "empty section name"));
                }
                // `[name](template)` style trailers are accepted and ignored.
                if !trailer.is_empty() && !trailer.starts_with('(') {
                    return Err(parse_error(lineno, "unexpected text after section header"));
                }
                current = Some(store.section_index(name));
                continue;
            }

            let Some(section) = current else {
                return Err(parse_error(lineno, "option outside of any section"));
            };
            let Some((name, value)) = split_assignment(line) else {
                return Err(parse_error(lineno, "expected 'name = value'"));
            };
            if name.is_empty() {
                return Err(parse_error(lineno, "empty option name"));
            }
            store.sections[section]
                .entries
                .push(ConfigEntry::new(name, value, lineno));
        }

        Ok(store)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Append an entry, creating the section on first use.
    pub fn push(&mut self, section: &str, name: &str, value: &str) {
        let index = self.section_index(section);
        let lineno = self.sections[index].entries.len() + 1;
        self.sections[index]
            .entries
            .push(ConfigEntry::new(name, value, lineno));
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|section| section.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

impl ConfigSource for ConfigStore {
    fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|section| section.name.as_str()).collect()
    }

    fn entries(&self, section: &str) -> Option<&[ConfigEntry]> {
        self.sections
            .iter()
            .find(|candidate| candidate.name == section)
            .map(|section| section.entries.as_slice())
    }
}

fn parse_error(line: usize, message: &str) -> ConfigError {
    ConfigError::Parse {
        line,
        message: message.to_string(),
    }
}

/// Cut a line at the first `;` that is not escaped as `\;`.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (index, byte) in bytes.iter().enumerate() {
        if *byte == b';' && (index == 0 || bytes[index - 1] != b'\\') {
            return &line[..index];
        }
    }
    line
}

fn split_assignment(line: &str) -> Option<(&str, String)> {
    let equals = line.find('=')?;
    let name = line[..equals].trim();
    let mut value = &line[equals + 1..];
    if let Some(rest) = value.strip_prefix('>') {
        value = rest;
    }
    Some((name, value.trim().replace("\\;", ";")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
; global settings
[general]
servername = Asterisk ; trailing comment
keepalive=60

# hash comment
[SEP001122334455]
type => device
button = line, 100
button = speeddial,Home, 200
";

    #[test]
    fn parses_sections_in_order() {
        let store = ConfigStore::parse(SAMPLE).unwrap();
        assert_eq!(store.section_names(), vec!["general", "SEP001122334455"]);

        let servername = store.get("general", "ServerName").unwrap();
        assert_eq!(servername.value, "Asterisk");
        assert_eq!(servername.lineno, 3);

        assert_eq!(store.get("SEP001122334455", "type").unwrap().value, "device");
        let buttons = store.get_all("SEP001122334455", "button");
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[1].value, "speeddial,Home, 200");
        assert_eq!(buttons[1].lineno, 10);
    }

    #[test]
    fn escaped_semicolon_is_kept() {
        let store = ConfigStore::parse("[general]\nmeetmeopts = a\\;b\n").unwrap();
        assert_eq!(store.get("general", "meetmeopts").unwrap().value, "a;b");
    }

    #[test]
    fn repeated_header_continues_section() {
        let store = ConfigStore::parse("[general]\na=1\n[x]\nb=2\n[general]\nc=3\n").unwrap();
        assert_eq!(store.section_names(), vec!["general", "x"]);
        assert_eq!(store.entries("general").unwrap().len(), 2);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(
            ConfigStore::parse("keepalive=60\n"),
            Err(ConfigError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            ConfigStore::parse("[general]\njunk\n"),
            Err(ConfigError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            ConfigStore::parse("[general\n"),
            Err(ConfigError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn missing_section_has_no_entries() {
        let store = ConfigStore::new();
        assert!(store.entries("general").is_none());
        assert!(store.get_all("general", "allow").is_empty());
    }
}
