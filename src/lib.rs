//! glyphgrid library crate.
//!
//! Converts RGBA bitmaps into character-cell art (plain text, HTML markup and
//! SVG). The binary in `main.rs` is a thin CLI over these modules; they are
//! public so integration tests can drive them directly.

pub mod ascii;
pub mod bitmap;
pub mod cli;
pub mod config;
pub mod decode;
pub mod export;
pub mod preview;
