//! Adapter from a chunked byte stream to a frame stream.

use super::decoder::RecordDecoder;
use bargaining_domain::Frame;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;

struct DecodeState<S> {
    bytes: Pin<Box<S>>,
    decoder: RecordDecoder,
    ready: VecDeque<Frame>,
    done: bool,
}

/// Decode a stream of byte chunks into frames.
///
/// Frames are yielded as soon as the chunk completing them arrives. When the
/// byte stream ends, any unterminated record is reported once as a
/// diagnostic. A read error is passed through and ends the stream; the
/// buffered tail is dropped without a diagnostic.
pub fn decode_frames<S, B, E>(bytes: S) -> impl Stream<Item = Result<Frame, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let state = DecodeState {
        bytes: Box::pin(bytes),
        decoder: RecordDecoder::new(),
        ready: VecDeque::new(),
        done: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.ready.pop_front() {
                return Some((Ok(frame), state));
            }
            if state.done {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => state.ready.extend(state.decoder.feed(chunk.as_ref())),
                Some(Err(e)) => {
                    state.done = true;
                    return Some((Err(e), state));
                }
                None => {
                    state.done = true;
                    state.ready.extend(state.decoder.finish());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bargaining_domain::{Record, RecordDiagnostic};
    use futures::stream;

    #[tokio::test]
    async fn test_frames_follow_chunks() {
        let chunks: Vec<Result<&[u8], String>> = vec![
            Ok(b"event: round_st".as_slice()),
            Ok(b"art\ndata: {}\n".as_slice()),
            Ok(b"\nevent: round_end\ndata: x\n\nevent: simul".as_slice()),
        ];

        let frames: Vec<_> = decode_frames(stream::iter(chunks)).collect().await;

        assert_eq!(
            frames,
            vec![
                Ok(Frame::Record(Record::new("round_start", "{}"))),
                Ok(Frame::Record(Record::new("round_end", "x"))),
                Ok(Frame::Diagnostic(RecordDiagnostic::IncompleteRecord {
                    event: None,
                    buffered_bytes: 12,
                })),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_error_ends_stream() {
        let chunks: Vec<Result<Vec<u8>, String>> = vec![
            Ok(b"event: round_end\ndata: x\n\nevent: round_end\n".to_vec()),
            Err("connection reset".to_string()),
            Ok(b"data: never seen\n\n".to_vec()),
        ];

        let frames: Vec<_> = decode_frames(stream::iter(chunks)).collect().await;

        assert_eq!(
            frames,
            vec![
                Ok(Frame::Record(Record::new("round_end", "x"))),
                Err("connection reset".to_string()),
            ]
        );
    }
}
