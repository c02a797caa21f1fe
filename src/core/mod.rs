//! Core company record types, IČO validation and record output.
//!
//! Everything here is pure and network-free: the registry parsers in
//! [`crate::lookup`] fill a [`Company`], and [`record`] turns it into the
//! fixed-field output file.

mod address;
mod company;
mod diacritics;
mod error;
mod ico;
pub mod record;

pub use address::*;
pub use company::*;
pub use diacritics::*;
pub use error::*;
pub use ico::*;
pub use record::{FIELD_COUNT, LineEnding, OutputFormat, SUBSTITUTE_BYTE, Separator, Unmappable};
