#![warn(rust_2018_idioms)]

//! Decoder for ANT/Garmin FIT binary files: header parsing, CRC
//! verification, definition/data record interpretation, subfield and
//! component expansion, compressed-timestamp reconstruction, developer-field
//! support, and value normalization through a pluggable [`Processor`].
//!
//! The crate is a library; [`open`] returns a [`Decoder`] that yields
//! [`Message`]s either lazily ([`Decoder::messages`]) or eagerly
//! ([`Decoder::read_all`]). It does not write FIT files, perform I/O beyond
//! reading its input, or interpret activity-level semantics beyond naming.

pub mod basetype;
pub mod decoder;
pub mod error;
pub mod field;
pub mod header;
pub mod message;
pub mod processor;
pub mod profile;
pub mod reader;

pub use decoder::{open, DecodeOptions, Decoder, Messages, Source};
pub use error::{Error, Result};
pub use message::{Field, FieldValue, Message};
pub use processor::{DefaultProcessor, Processor};
