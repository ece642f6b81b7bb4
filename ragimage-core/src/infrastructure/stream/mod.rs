//! HTTP side of a generation request: the SSE stream and result download.

mod client;
mod error;

pub use client::GenerateClient;
pub use error::{ClientError, describe_stream_error};
