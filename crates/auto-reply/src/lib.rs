//! Outbound reply shaping: word-safe chunking of long text and ordered
//! delivery of the chunks through a channel's send capability.

pub mod chunk;
pub mod deliver;

pub use {
    chunk::{DEFAULT_MAX_MESSAGE_LEN, split},
    deliver::send_chunked,
};
