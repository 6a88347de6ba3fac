// Copyright 2015, Yuheng Chen.
// Copyright 2023, Ethiraric.
// See the LICENSE file at the top-level directory of this distribution.

//! YAML 1.1 decoding in pure Rust, covering the subset exercised by the canonical specification
//! examples: block and flow collections, the five scalar styles, anchors and aliases, explicit
//! tags, timestamps, `!!binary`, `!!set` and `!!omap`.
//!
//! # Usage
//!
//! This crate is used by adding `citrine` to the dependencies in your project's `Cargo.toml`:
//! ```sh
//! cargo add citrine
//! ```
//!
//! # Examples
//! Parse a string into a `Vec<Yaml>` and access its contents.
//!
//! ```
//! use citrine::Yaml;
//!
//! let docs = Yaml::load_from_str("[1, 2, 3]").unwrap();
//! let doc = &docs[0]; // select the first YAML document
//! assert_eq!(doc[0].as_i64().unwrap(), 1); // access elements by index
//! ```
//!
//! Decode a multi-document stream lazily, one document per pull:
//!
//! ```
//! use citrine::{DocumentStream, Yaml};
//!
//! let mut stream = DocumentStream::new("---\nfirst\n---\nsecond\n");
//! assert_eq!(stream.next().unwrap().unwrap(), Yaml::String("first".into()));
//! assert_eq!(stream.next().unwrap().unwrap(), Yaml::String("second".into()));
//! assert!(stream.next().is_none());
//! ```
//!
//! # Tags
//! ## Core-schema tags (`!!str`, `!!int`, ...)
//! `citrine` is aware of the YAML core-schema tags and resolves scalars accordingly. Should a
//! plain scalar be explicitly tagged with a core-schema tag, it is parsed as the given type. If
//! parsing fails (e.g.: `!!int foo`), a [`Yaml::BadValue`] is returned. Quoted and block scalars
//! never undergo implicit resolution; they resolve to strings, or to [`Yaml::Binary`] under an
//! explicit `!!binary` tag.
//!
//! ## Application-specific tags
//! Tags with no built-in rule resolve to [`Yaml::Tagged`], keeping the node raw so the caller can
//! dispatch on the tag URI. Callers may instead register decoding rules in a [`TagRegistry`]
//! before decoding, or opt into strict handling where unknown tags are an error:
//!
//! ```
//! use citrine::{TagRegistry, Yaml};
//!
//! let mut registry = TagRegistry::new();
//! registry.register("!celsius", |node| match node {
//!     Yaml::String(v) => Ok(v
//!         .parse::<f64>()
//!         .map_or(Yaml::BadValue, |deg| Yaml::Float((deg * 1.8 + 32.0).into()))),
//!     other => Ok(other),
//! });
//! let docs = Yaml::load_from_str_with("!celsius 100", &registry).unwrap();
//! assert_eq!(docs[0].as_f64().unwrap(), 212.0);
//! ```

#![warn(missing_docs, clippy::pedantic)]

#[macro_use]
mod macros;

mod error;
mod loader;
mod scalar;
mod stream;
mod tags;
mod timestamp;
mod yaml;

// Re-export main components.
pub use crate::error::LoadError;
pub use crate::loader::YamlLoader;
pub use crate::scalar::{parse_core_schema_fp, resolve_plain_scalar};
pub use crate::stream::{DocumentStream, ErrorPolicy};
pub use crate::tags::{TagRegistry, TagResult, TagRule};
pub use crate::timestamp::parse_timestamp;
pub use crate::yaml::{Mapping, OMap, Sequence, Set, Timestamp, Yaml, YamlIter};

// Re-export parser types that are part of our public API, so consumers can inspect errors,
// spans and tags without depending on the parser crate directly.
pub use citrine_parser::{
    Event, EventReceiver, Marker, Parser, ScanError, Span, SpannedEventReceiver, TScalarStyle, Tag,
};
