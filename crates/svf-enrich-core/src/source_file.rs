//! Line-oriented view of a source file.
//!
//! Files are read whole and closed before any line is looked at; a
//! `SourceFile` holds no handle. Bytes that are not valid UTF-8 are replaced
//! rather than failing the read.

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SourceFile {
    lines: Vec<String>,
}

impl SourceFile {
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_text(&String::from_utf8_lossy(&bytes)))
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line `n`, 1-based, without its terminator.
    pub fn line(&self, n: u32) -> Option<&str> {
        let idx = (n as usize).checked_sub(1)?;
        self.lines.get(idx).map(String::as_str)
    }

    /// Whether line `line` exists and is at least `column` characters long.
    pub fn has_position(&self, line: u32, column: u32) -> bool {
        self.line(line)
            .is_some_and(|text| text.chars().count() >= column as usize)
    }

    /// Whether any of lines `1..=line` contains `needle`.
    pub fn mentions_before(&self, needle: &str, line: u32) -> bool {
        self.lines
            .iter()
            .take(line as usize)
            .any(|text| text.contains(needle))
    }

    /// Lines `line - range ..= line + range`, clamped to the file, each
    /// trimmed of surrounding whitespace.
    pub fn excerpt(&self, line: u32, range: usize) -> Vec<String> {
        let line = line as usize;
        let first = line.saturating_sub(range).max(1);
        let last = line.saturating_add(range).min(self.lines.len());
        if first > last {
            return Vec::new();
        }
        self.lines[first - 1..last]
            .iter()
            .map(|text| text.trim().to_string())
            .collect()
    }
}
