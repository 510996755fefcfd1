//! A depth-bounded, field-driven streaming unmarshaller.
//!
//! Generated service SDKs tend to ship one hand-written JSON unmarshaller per
//! model type, each walking the token stream and matching field names at a
//! target depth. This crate implements that walk once: a type describes its
//! fields in a [`FieldTable`], and a generic [`Unmarshaller`] consumes
//! [`Token`]s from a [`Cursor`] and populates the type without building an
//! intermediate document tree.
//!
//! ```rust
//! use depthwalk::{Composite, FieldTable, Registry, impl_composite_decode};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct MountPoint {
//!     source_volume: Option<String>,
//!     read_only: Option<bool>,
//! }
//!
//! impl Composite for MountPoint {
//!     const NAME: &'static str = "MountPoint";
//!
//!     fn fields() -> FieldTable<Self> {
//!         FieldTable::<Self>::new()
//!             .field("sourceVolume", |m, v| m.source_volume = v)
//!             .field("readOnly", |m, v| m.read_only = v)
//!     }
//! }
//!
//! impl_composite_decode!(MountPoint);
//!
//! let registry = Registry::new().with::<MountPoint>();
//! let mount: Option<MountPoint> = registry
//!     .from_str(r#"{"sourceVolume": "data", "unknown": [1, 2], "readOnly": true}"#)
//!     .unwrap();
//! assert_eq!(
//!     mount,
//!     Some(MountPoint {
//!         source_volume: Some("data".into()),
//!         read_only: Some(true),
//!     })
//! );
//! ```
//!
//! Tokens come from any [`TokenSource`]: [`JsonLexer`] reads JSON text and
//! [`TokenReplay`] replays a prepared sequence.

mod collections;
mod cursor;
mod decode;
mod error;
mod lexer;
mod options;
mod registry;
mod source;
mod token;
mod unmarshaller;

#[cfg(feature = "model")]
pub mod model;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use decode::{Blob, Decode, Shape};
pub use error::{DecodeError, SyntaxError};
pub use lexer::JsonLexer;
pub use options::{DecodeOptions, LexerOptions};
pub use registry::Registry;
pub use source::{TokenReplay, TokenSource};
pub use token::{Scalar, Token, TokenKind};
pub use unmarshaller::{Composite, FieldTable, Unmarshaller};
