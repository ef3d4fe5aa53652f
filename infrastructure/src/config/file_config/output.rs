//! Output configuration from TOML (`[output]` section)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report format accepted in `output.format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutputFormat {
    Full,
    Summary,
    Json,
}

impl FileOutputFormat {
    pub const VALUES: [&'static str; 3] = ["full", "summary", "json"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutputFormat::Full => "full",
            FileOutputFormat::Summary => "summary",
            FileOutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for FileOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(FileOutputFormat::Full),
            "summary" => Ok(FileOutputFormat::Summary),
            "json" => Ok(FileOutputFormat::Json),
            other => Err(other.to_string()),
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report format; `None` leaves the choice to the command line
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Parsed format. An unrecognised value is reported by `validate()`
    /// and treated as unset here.
    pub fn parse_format(&self) -> Option<FileOutputFormat> {
        self.format.as_deref().and_then(|s| s.parse().ok())
    }
}
