//! Stream parameters: controller behavior over the event stream.
//!
//! These are application-layer concerns: the transport reports diagnostics
//! unconditionally, and [`StreamParams`] decides what a run does with them.

use bargaining_domain::ParseMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamParams {
    /// Lenient runs report diagnostics and continue; strict runs abort.
    pub parse_mode: ParseMode,
}

impl StreamParams {
    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn strict() -> Self {
        Self::default().with_parse_mode(ParseMode::Strict)
    }
}
