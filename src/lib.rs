#![forbid(unsafe_code)]
//! Bit-exact codec for Parquet's `DELTA_BINARY_PACKED` integer encoding.
//!
//! This crate implements only the encoder/decoder for that one encoding: the
//! page/column framing, schema machinery, and compression codecs that
//! surround it in a full Parquet implementation are treated as external
//! collaborators and are out of scope here.

pub mod encoding;
pub mod error;

pub use encoding::delta_bitpacked::{decode_i32, decode_i64, encode_i32, encode_i64, Decoded};
pub use error::{Error, Result};
