use regex::Regex;
use thiserror::Error;

use crate::config::FilterConfig;

/// Errors raised while turning a query into match predicates.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The derived pattern was rejected by the regex engine.
    #[error("query produced an invalid match pattern: {0}")]
    Compile(#[from] regex::Error),
}

/// Compiled form of one query: an anchored predicate, a substring predicate,
/// and whether the ranked pass is disabled for this request.
///
/// Every query character is matched literally except whitespace (Unicode
/// definition, so the full-width U+3000 space counts), which becomes a
/// single-character wildcard. Escaping metacharacters is owned here; callers
/// always pass raw text.
#[derive(Debug)]
pub struct QueryPattern {
    anchored: Regex,
    substring: Regex,
    abort_ranking: bool,
}

impl QueryPattern {
    pub fn compile(query: &str, config: &FilterConfig) -> Result<Self, PatternError> {
        let mut pattern = String::with_capacity(query.len() * 2);
        let mut abort_ranking = false;
        for ch in query.chars() {
            if ch == config.abort_marker {
                abort_ranking = true;
            }
            if ch.is_whitespace() {
                pattern.push('.');
            } else {
                pattern.push_str(&regex::escape(&ch.to_string()));
            }
        }

        let anchored = Regex::new(&format!("^(?:{pattern})"))?;
        let substring = Regex::new(&pattern)?;
        Ok(Self {
            anchored,
            substring,
            abort_ranking,
        })
    }

    /// Whether the ranked substring pass must be skipped for this request.
    #[must_use]
    pub fn abort_ranking(&self) -> bool {
        self.abort_ranking
    }

    /// True when the query matches `candidate` starting at position 0.
    #[must_use]
    pub fn matches_prefix(&self, candidate: &str) -> bool {
        self.anchored.is_match(candidate)
    }

    /// Byte offset of the earliest occurrence of the query anywhere in
    /// `candidate`, or `None` when it does not occur.
    #[must_use]
    pub fn first_offset(&self, candidate: &str) -> Option<usize> {
        self.substring.find(candidate).map(|found| found.start())
    }
}
