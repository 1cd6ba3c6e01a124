use std::time::Duration;

use serde::Deserialize;

/// Tunables for the filtering pipeline.
///
/// Hosts typically embed this in their own settings structure; every field
/// has a default so a missing section deserializes to the stock behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Query character that restricts a request to anchored matches only.
    /// The marker stays a literal part of the pattern; its presence merely
    /// disables the ranked substring pass.
    pub abort_marker: char,
    /// Interval at which a worker re-checks whether its predecessors have
    /// finished, in milliseconds.
    pub poll_interval_ms: u64,
    /// Zero-pad width applied to the match offset when building ranking
    /// keys. Offsets wider than this would sort out of order, so the
    /// default is generous.
    pub offset_key_width: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            abort_marker: '*',
            poll_interval_ms: 10,
            offset_key_width: 10,
        }
    }
}

impl FilterConfig {
    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let config = FilterConfig::default();
        assert_eq!(config.abort_marker, '*');
        assert_eq!(config.poll_interval(), Duration::from_millis(10));
        assert_eq!(config.offset_key_width, 10);
    }
}
