//! Errors reported while loading YAML documents.

use thiserror::Error;

use citrine_parser::ScanError;

/// An error that happened when loading a YAML document.
///
/// Scanning and structuring errors come out of the parser as [`ScanError`]s; the remaining
/// variants are raised while resolving an otherwise well-formed document. Implicit resolution of
/// untagged scalars never fails: content that matches no core-schema rule degrades to a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Malformed input rejected while tokenizing or structuring the stream.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// A `!!set` mapping contained the same key twice.
    #[error("duplicate key in !!set mapping")]
    DuplicateSetKey,
    /// A `!!set` mapping associated a key with a non-null value.
    #[error("!!set mapping values must be null")]
    NonNullSetValue,
    /// A `!!omap` entry was not a single-entry mapping.
    #[error("!!omap entries must be single-entry mappings")]
    InvalidOmapEntry,
    /// An alias referenced an anchor that is not defined in the current document.
    #[error("alias references an undefined anchor")]
    UndefinedAlias,
    /// Strict mode refused a tag with no registered rule.
    #[error("unsupported tag `{0}'")]
    UnsupportedTag(String),
}
