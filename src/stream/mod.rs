//! Record streams
//!
//! # Submodules
//! - `writer` - Sequential, position-tracked output with length patching
//! - `reader` - Sequential record decoding

mod reader;
mod writer;

pub use reader::RecordReader;
pub use writer::{RecordMark, StreamWriter};
