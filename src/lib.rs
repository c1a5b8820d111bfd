//! Decoder for REDengine 4 quantized fallback animation buffers.
//!
//! A fallback animation is a reduced-fidelity track stored as directly keyed
//! per-frame, per-bone transforms, used when the full curve-compressed
//! animation is unavailable. The decoder is IO-free: it operates on an
//! in-memory byte slice plus per-frame metadata already extracted from the
//! containing animation set by the archive layer.

#![forbid(unsafe_code)]

mod decode;
mod error;
mod layout;
mod model;
mod quant;
mod scheme;

pub use decode::*;
pub use error::*;
pub use layout::*;
pub use model::*;
pub use quant::*;
pub use scheme::*;


#[cfg(test)]
mod layout_tests;
