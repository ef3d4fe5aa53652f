//! Record Transport: event-stream framing.
//!
//! [`RecordDecoder`] turns arbitrarily chunked bytes into [`Frame`]s;
//! [`decode_frames`] applies it to an async byte stream.
//!
//! [`Frame`]: bargaining_domain::Frame

mod decoder;
mod stream;

pub use decoder::{RecordDecoder, decode_all};
pub use stream::decode_frames;
