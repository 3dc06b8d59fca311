//! Key/value run outputs
//!
//! Outputs are append-only: once set, a value stays visible to the caller
//! even if the run fails afterwards.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

pub const PREVIOUS_TAG: &str = "previous-tag";
pub const RELEASE_TAG: &str = "release-tag";
pub const RELEASE_URL: &str = "release-url";

/// Destination of run outputs
pub trait OutputSink {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_output(key, value)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_output(key, value)
    }
}

/// Writes outputs to a `$GITHUB_OUTPUT` style file using heredoc delimiters
#[derive(Debug, Clone)]
pub struct FileOutputs {
    path: PathBuf,
}

impl FileOutputs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileOutputs { path: path.into() }
    }

    /// Sink for `$GITHUB_OUTPUT`, if set
    pub fn from_env() -> Option<Self> {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|p| !p.is_empty())
            .map(Self::new)
    }
}

/// Format one `key<<DELIM` entry
pub fn format_output_entry(key: &str, value: &str, delimiter: &str) -> io::Result<String> {
    if key.contains(delimiter) || value.contains(delimiter) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output '{}' contains the delimiter '{}'", key, delimiter),
        ));
    }
    Ok(format!("{}<<{}\n{}\n{}\n", key, delimiter, value, delimiter))
}

impl OutputSink for FileOutputs {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        let delimiter = format!("ghadelimiter_{}", uuid::Uuid::new_v4());
        let entry = format_output_entry(key, value, &delimiter)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        file.flush()
    }
}

/// Prints `key=value` lines to standard output
#[derive(Debug, Clone, Default)]
pub struct StdoutOutputs;

impl OutputSink for StdoutOutputs {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}={}", key, value)
    }
}

/// Keeps outputs in memory, in the order they were set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryOutputs {
    entries: Vec<(String, String)>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output_entry() {
        assert_eq!(
            format_output_entry("release-tag", "2025.1.0", "EOF").unwrap(),
            "release-tag<<EOF\n2025.1.0\nEOF\n"
        );
    }

    #[test]
    fn test_format_output_entry_rejects_delimiter_in_value() {
        assert!(format_output_entry("k", "a EOF b", "EOF").is_err());
    }

    #[test]
    fn test_file_outputs_appends_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output");

        let mut outputs = FileOutputs::new(&path);
        outputs.set_output(PREVIOUS_TAG, "0.0.0").unwrap();
        outputs.set_output(RELEASE_TAG, "2025.1.0").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("previous-tag<<ghadelimiter_"));
        assert_eq!(lines[1], "0.0.0");
        assert_eq!(lines[2], lines[0].trim_start_matches("previous-tag<<"));
        assert!(lines[3].starts_with("release-tag<<ghadelimiter_"));
        assert_eq!(lines[4], "2025.1.0");
    }

    #[test]
    fn test_memory_outputs_order() {
        let mut outputs = MemoryOutputs::new();
        outputs.set_output(PREVIOUS_TAG, "a").unwrap();
        outputs.set_output(RELEASE_TAG, "b").unwrap();

        assert_eq!(outputs.keys(), vec![PREVIOUS_TAG, RELEASE_TAG]);
        assert_eq!(outputs.get(RELEASE_TAG), Some("b"));
        assert_eq!(outputs.get(RELEASE_URL), None);
    }
}
