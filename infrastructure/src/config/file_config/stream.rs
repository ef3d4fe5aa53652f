//! Stream configuration from TOML (`[stream]` section)

use bargaining_application::StreamParams;
use bargaining_domain::ParseMode;
use serde::{Deserialize, Serialize};

/// Raw stream configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStreamConfig {
    /// Abort a run on the first transport diagnostic or unknown event kind
    pub strict: bool,
    /// Chunk size in bytes used when replaying a captured stream
    pub replay_chunk_size: usize,
}

impl Default for FileStreamConfig {
    fn default() -> Self {
        Self {
            strict: false,
            replay_chunk_size: 64,
        }
    }
}

impl FileStreamConfig {
    pub fn to_stream_params(&self) -> StreamParams {
        StreamParams::default().with_parse_mode(ParseMode::from_strict(self.strict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_maps_to_parse_mode() {
        let config = FileStreamConfig {
            strict: true,
            ..Default::default()
        };
        assert!(config.to_stream_params().parse_mode.is_strict());
        assert!(!FileStreamConfig::default().to_stream_params().parse_mode.is_strict());
    }
}
