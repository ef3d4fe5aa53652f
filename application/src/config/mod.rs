//! Application-level configuration.
//!
//! - [`StreamParams`]: how the simulation controller treats the event stream

pub mod stream_params;

pub use stream_params::StreamParams;
