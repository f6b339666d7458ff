//! Shared text model used by the completion engine.

pub mod text_buffer;

pub use text_buffer::{slice_to_cow, TextBuffer};
