//! The property path grammar.
//!
//! A path is a non-empty list of segments separated by `.`:
//!
//! - `name`: the member `name` of the current container.
//! - `name[key]`: the member `name`, then the entry `key` inside it.
//! - `[key]`: the entry `key` of the current container itself.
//!
//! `key` is a sequence position when it is a canonical decimal integer, and a
//! dictionary key otherwise. Dictionaries accept both, rendering positions in
//! decimal.
//!
//! [`PropertyPath::parse`] collects the segments up front; [`Parser`] streams
//! them.

// -----------------------------------------------------------------------------
// Modules

mod parser;
mod path;

// -----------------------------------------------------------------------------
// Exports

pub use parser::Parser;
pub use path::{IndexKey, OffsetSegment, ParseError, PropertyPath, Segment, extract_this_reference};
