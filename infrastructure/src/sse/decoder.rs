//! Incremental event-stream decoder.
//!
//! Bytes arrive in arbitrary chunks. The decoder buffers the unterminated
//! tail of the current line at the byte level and only interprets a line
//! once its `\n` has arrived, so neither a record nor a multibyte character
//! split across chunks is ever seen half-way. Output is identical for every
//! way of chunking the same input.
//!
//! | Line | Effect |
//! |------|--------|
//! | `event: <kind>` | sets the pending kind (trimmed) |
//! | `data: <text>` | appends to the pending payload (`\n`-joined) |
//! | `: ...` | comment / keep-alive, ignored |
//! | `id:`, `retry:`, other fields | ignored |
//! | blank | terminates the pending record (empty values count as absent) |

use bargaining_domain::{Frame, MissingField, Record, RecordDiagnostic};

/// Stateful decoder from raw bytes to [`Frame`]s.
#[derive(Debug, Default)]
pub struct RecordDecoder {
    /// Bytes of the current, not yet terminated line
    line: Vec<u8>,
    event: Option<String>,
    data: Option<String>,
    /// Bytes consumed by the pending record so far (terminated lines only)
    pending_bytes: usize,
}

impl RecordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns every frame completed by it, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut rest = chunk;

        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let (head, tail) = rest.split_at(pos);
            rest = &tail[1..];

            if self.line.is_empty() {
                self.process_line(head, &mut frames);
            } else {
                self.line.extend_from_slice(head);
                let line = std::mem::take(&mut self.line);
                self.process_line(&line, &mut frames);
            }
        }

        self.line.extend_from_slice(rest);
        frames
    }

    /// Signal end of input.
    ///
    /// A record that was never terminated by a blank line is discarded and
    /// reported as [`RecordDiagnostic::IncompleteRecord`]. The decoder is
    /// empty afterwards.
    pub fn finish(&mut self) -> Option<Frame> {
        let partial_line = !self.line.is_empty() && !self.line.starts_with(b":");
        if self.event.is_none() && self.data.is_none() && !partial_line {
            self.reset();
            return None;
        }

        let diagnostic = RecordDiagnostic::IncompleteRecord {
            event: self.event.take(),
            buffered_bytes: self.pending_bytes + self.line.len(),
        };
        self.reset();
        Some(Frame::Diagnostic(diagnostic))
    }

    /// Whether any input is buffered that has not produced a frame yet.
    pub fn has_pending(&self) -> bool {
        !self.line.is_empty() || self.event.is_some() || self.data.is_some()
    }

    fn reset(&mut self) {
        self.line.clear();
        self.event = None;
        self.data = None;
        self.pending_bytes = 0;
    }

    fn process_line(&mut self, raw: &[u8], frames: &mut Vec<Frame>) {
        let line = raw.strip_suffix(b"\r").unwrap_or(raw);

        if line.is_empty() {
            if let Some(frame) = self.dispatch() {
                frames.push(frame);
            }
            return;
        }

        self.pending_bytes += raw.len() + 1;

        if line.starts_with(b":") {
            return;
        }

        let text = String::from_utf8_lossy(line);
        let (field, value) = match text.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (text.as_ref(), ""),
        };

        match field {
            "event" => self.event = Some(value.trim().to_string()),
            "data" => match &mut self.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(value);
                }
                None => self.data = Some(value.to_string()),
            },
            _ => {}
        }
    }

    /// Terminate the pending record at a blank line.
    fn dispatch(&mut self) -> Option<Frame> {
        self.pending_bytes = 0;
        // An empty value counts as an absent field
        let event = self.event.take().filter(|event| !event.is_empty());
        let data = self.data.take().filter(|data| !data.is_empty());
        match (event, data) {
            (Some(event), Some(data)) => Some(Frame::Record(Record { event, data })),
            (None, None) => None,
            (Some(event), None) => Some(Frame::Diagnostic(RecordDiagnostic::MalformedRecord {
                missing: MissingField::Data,
                event: Some(event),
            })),
            (None, Some(_)) => Some(Frame::Diagnostic(RecordDiagnostic::MalformedRecord {
                missing: MissingField::Event,
                event: None,
            })),
        }
    }
}

/// Decode a complete input in one go.
pub fn decode_all(input: &[u8]) -> Vec<Frame> {
    let mut decoder = RecordDecoder::new();
    let mut frames = decoder.feed(input);
    frames.extend(decoder.finish());
    frames
}
