//! Newline-delimited line framing for relaydeck.
//!
//! The relay network speaks one text message per `\n`-terminated line, but
//! the transport delivers bytes in arbitrarily sized, arbitrarily split
//! chunks. [`LineFramer`] reassembles complete lines across chunk
//! boundaries.
//!
//! No partial lines, no buffer management in user code.

pub mod framer;

pub use framer::{LineFramer, Lines};
