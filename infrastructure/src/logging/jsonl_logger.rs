//! JSONL transcript writer.
//!
//! Each [`TranscriptEvent`] becomes one JSON line carrying its `type`, a
//! per-file sequence number `seq` and an RFC 3339 `timestamp`. Object
//! payloads are merged into the line; any other payload is nested under
//! `data`.

use bargaining_application::ports::transcript_logger::{TranscriptEvent, TranscriptLogger};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Inner {
    writer: BufWriter<File>,
    seq: u64,
}

/// Transcript logger that writes one JSON object per line.
///
/// Thread-safe via a `Mutex`. Flushes after every line and on `Drop`.
pub struct JsonlTranscriptLogger {
    inner: Mutex<Inner>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Create a logger writing to `path`, truncating any existing file.
    ///
    /// Parent directories are created as needed. Returns `None` (after a
    /// warning) if the file cannot be created.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match File::create(path) {
            Ok(file) => Some(Self {
                inner: Mutex::new(Inner {
                    writer: BufWriter::new(file),
                    seq: 0,
                }),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not create transcript {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn line_for(event: TranscriptEvent, seq: u64) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let mut line = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    line.insert("type".to_string(), Value::from(event.event_type));
    line.insert("seq".to_string(), Value::from(seq));
    line.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(line)
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };

        let line = line_for(event, inner.seq);
        inner.seq += 1;

        let Ok(text) = serde_json::to_string(&line) else {
            return;
        };
        if let Err(e) = writeln!(inner.writer, "{}", text).and_then(|_| inner.writer.flush()) {
            warn!("Failed to write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let _ = inner.writer.flush();
        }
    }
}
