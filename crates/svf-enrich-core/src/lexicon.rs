//! Lexical variable-name filter.
//!
//! Guesses which identifiers on a source line name variables, without
//! parsing. Tokens are matched with a loose identifier pattern that also
//! swallows member access and indexing (`node.next`, `buf[i]`), then
//! filtered on their immediate neighbours and a keyword table.
//!
//! This accepts false positives: type names outside the keyword table
//! (`size_t`, `FILE` with caps filtering off) come through as "variables".

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::EnrichError;

/// C/C++ words never reported as variable names. Includes `when`.
pub const C_CPP_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "catch", "char", "const", "continue", "default", "do", "double",
    "else", "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "try", "typedef", "union",
    "unsigned", "void", "volatile", "while", "when",
];

/// Identifier-like token: letters/underscore, then letters, digits,
/// underscore, `.`, `[` or `]`.
pub const C_VAR_NAME_PATTERN: &str = r"[_a-zA-Z]+[_a-zA-Z0-9.\[\]]*";

/// Keyword table and token pattern for one language dialect.
#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: HashSet<String>,
    token_pattern: Regex,
}

impl Lexicon {
    /// Build a lexicon from an explicit keyword list and token pattern.
    pub fn new<I, S>(keywords: I, token_pattern: &str) -> Result<Self, EnrichError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            token_pattern: Regex::new(token_pattern)?,
        })
    }

    /// The C/C++ table used for SVF reports.
    pub fn c_family() -> Self {
        Self {
            keywords: C_CPP_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            token_pattern: C_VAR_NAME.clone(),
        }
    }

    /// Extend the keyword table.
    pub fn with_keywords<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn is_keyword(&self, token: &str) -> bool {
        self.keywords.contains(token)
    }

    /// Likely variable names on `line`, in order of appearance, without
    /// duplicates.
    ///
    /// A token is dropped when:
    /// - a quote sits directly before or after it (string or char literal),
    /// - `)` sits directly before it (cast) or `(` directly after it (call),
    /// - it was already collected,
    /// - it is a keyword,
    /// - `caps_as_constants` is set and it has no lowercase letter.
    pub fn filter_names(&self, line: &str, caps_as_constants: bool) -> Vec<String> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut names: Vec<String> = Vec::new();

        for m in self.token_pattern.find_iter(line) {
            let before = line[..m.start()].chars().next_back();
            let after = line[m.end()..].chars().next();

            if matches!(before, Some('\'' | '"' | ')')) || matches!(after, Some('\'' | '"' | '(')) {
                continue;
            }

            let token = m.as_str();
            if names.iter().any(|n| n == token) || self.is_keyword(token) {
                continue;
            }
            if caps_as_constants && is_all_caps(token) {
                continue;
            }
            names.push(token.to_string());
        }

        names
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::c_family()
    }
}

static C_VAR_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(C_VAR_NAME_PATTERN).expect("C_VAR_NAME_PATTERN is a valid regex")
});

/// True when every alphabetic character is uppercase. Tokens with no letters
/// at all count as all-caps, though the token pattern never yields one.
fn is_all_caps(token: &str) -> bool {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase)
}
