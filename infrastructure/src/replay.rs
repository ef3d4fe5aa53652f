//! Offline feed that replays a captured event stream from disk.
//!
//! The file is read in fixed-size chunks and pushed through the same
//! decoder as a live response, so a capture can reproduce the chunking a
//! slow network would produce.

use crate::sse::decode_frames;
use async_trait::async_trait;
use bargaining_application::{FeedError, FrameStream, SimulationFeed};
use bargaining_domain::SimulationRequest;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::info;

pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// [`SimulationFeed`] over a captured `text/event-stream` body.
///
/// The request is ignored; every `open()` replays the same file.
#[derive(Debug, Clone)]
pub struct ReplayFeed {
    path: PathBuf,
    chunk_size: usize,
}

impl ReplayFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the chunk size. Zero is raised to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SimulationFeed for ReplayFeed {
    async fn open(&self, _request: &SimulationRequest) -> Result<FrameStream, FeedError> {
        let file = File::open(&self.path).await.map_err(|e| {
            FeedError::ConnectionError(format!(
                "Cannot open replay file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        info!(
            "Replaying {} in {}-byte chunks",
            self.path.display(),
            self.chunk_size
        );

        let chunk_size = self.chunk_size;
        let chunks = futures::stream::unfold(Some(file), move |file| async move {
            let mut file = file?;
            let mut buf = vec![0u8; chunk_size];
            match file.read(&mut buf).await {
                Ok(0) => None,
                Ok(n) => {
                    buf.truncate(n);
                    Some((Ok(buf), Some(file)))
                }
                Err(e) => Some((Err(FeedError::ReadFailed(e.to_string())), None)),
            }
        });

        Ok(decode_frames(chunks).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bargaining_domain::{Frame, RecordDiagnostic};
    use std::io::Write;

    const CAPTURE: &str = "event: round_start\r\ndata: {\"round_number\": 1, \"phase\": 1, \"phase_name\": \"Öppningsbud\", \"active_agents\": []}\r\n\r\n: ping\r\n\r\nevent: round_end\r\ndata: {\"round_number\": 1, \"summary\": \"Första rundan klar\"}\r\n\r\nevent: simulation_end\r\n";

    fn capture_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CAPTURE.as_bytes()).unwrap();
        file
    }

    async fn replay(feed: &ReplayFeed) -> Vec<Frame> {
        feed.open(&SimulationRequest::preset("baseline"))
            .await
            .unwrap()
            .map(|frame| frame.unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_replay_is_independent_of_chunk_size() {
        let file = capture_file();
        let whole = replay(&ReplayFeed::new(file.path()).with_chunk_size(4096)).await;

        assert_eq!(whole.len(), 3);
        assert_eq!(whole[1].as_record().unwrap().event, "round_end");
        assert!(matches!(
            whole[2],
            Frame::Diagnostic(RecordDiagnostic::IncompleteRecord { .. })
        ));

        for chunk_size in [1, 2, 3, 7, DEFAULT_CHUNK_SIZE] {
            let frames = replay(&ReplayFeed::new(file.path()).with_chunk_size(chunk_size)).await;
            assert_eq!(frames, whole, "chunk size {}", chunk_size);
        }
    }

    #[tokio::test]
    async fn test_missing_file_fails_to_open() {
        let feed = ReplayFeed::new("/definitely/not/here.sse");
        let err = match feed.open(&SimulationRequest::preset("baseline")).await {
            Ok(_) => panic!("missing file must not open"),
            Err(e) => e,
        };
        assert!(err.is_open_failure());
    }

    #[test]
    fn test_zero_chunk_size_is_raised() {
        let feed = ReplayFeed::new("capture.sse").with_chunk_size(0);
        assert_eq!(feed.chunk_size, 1);
    }
}
