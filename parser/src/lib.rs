// Copyright 2015, Yuheng Chen.
// Copyright 2023, Ethiraric.
// See the LICENSE file at the top-level directory of this distribution.

//! YAML 1.1 parser implementation in pure Rust.
//!
//! **If you want to load YAML into a Rust structure or manipulate YAML objects, use `citrine`
//! instead of `citrine-parser`. This crate contains only the parser.**
//!
//! This is a low-level parsing API for YAML. It allows users to fetch a stream of YAML events
//! from a stream of characters. The subset of YAML covered is the one exercised by the canonical
//! specification examples: block and flow collections, the five scalar styles, anchors and
//! aliases, tags and `%TAG`/`%YAML` directives, and multi-document streams delimited by `---` and
//! `...`.
//!
//! # Usage
//!
//! ```
//! use citrine_parser::{Event, Parser, TScalarStyle};
//!
//! let mut events = vec![];
//! for x in Parser::new_from_str("a: 3") {
//!     events.push(x.unwrap().0);
//! }
//! assert_eq!(
//!     events,
//!     [
//!         Event::StreamStart,
//!         Event::DocumentStart,
//!         Event::MappingStart(0, None),
//!         Event::Scalar("a".to_string(), TScalarStyle::Plain, 0, None),
//!         Event::Scalar("3".to_string(), TScalarStyle::Plain, 0, None),
//!         Event::MappingEnd,
//!         Event::DocumentEnd,
//!         Event::StreamEnd,
//!     ]
//! );
//! ```
//!
//! # Features
//!
//! #### `debug_prints`
//! Enables the `debug` module and usage of debug prints in the scanner and the parser. Do not
//! enable if you are consuming the crate rather than working on it as this can significantly
//! decrease performance.

#![warn(missing_docs, clippy::pedantic)]

mod char_traits;
#[macro_use]
mod debug;
pub mod input;
mod parser;
mod scanner;

pub use crate::input::{BufferedInput, Input};
pub use crate::parser::{Event, EventReceiver, ParseResult, Parser, SpannedEventReceiver, Tag};
pub use crate::scanner::{
    Marker, ScanError, Scanner, Span, TScalarStyle, Token, TokenType,
};
