//! The tag registry: a dispatch table from tag URIs to decoding behavior.

use std::{collections::HashMap, sync::OnceLock};

use citrine_parser::{TScalarStyle, Tag};

use crate::{
    error::LoadError,
    scalar::{parse_binary, parse_core_schema_fp},
    timestamp::parse_timestamp,
    yaml::{OMap, Set, Yaml},
};

/// The result of applying a tag rule to a node.
pub type TagResult = Result<Yaml, LoadError>;

/// A caller-supplied decoding rule for one tag URI.
///
/// Scalars reach the rule as [`Yaml::String`] holding the raw scalar text; collections reach it
/// fully built. Whatever the rule returns replaces the node in the document.
pub type TagRule = Box<dyn Fn(Yaml) -> TagResult + Send + Sync>;

/// Maps tag URIs to decoding behavior.
///
/// A registry holds the built-in core-schema rules (`!!str`, `!!int`, `!!float`, `!!bool`,
/// `!!null`, `!!binary`, `!!timestamp`, `!!set`, `!!omap`, `!!map`, `!!seq`) and any rules the
/// caller registers for application-specific tags. Caller rules are consulted first and may
/// override the built-ins.
///
/// The registry must be fully configured before decoding begins; decoding only ever reads it.
/// Rules are `Send + Sync` so a configured registry can be shared freely.
///
/// # Examples
/// ```
/// use citrine::{TagRegistry, Yaml};
///
/// let mut registry = TagRegistry::new();
/// registry.register("!answer", |_| Ok(Yaml::Integer(42)));
///
/// let docs = Yaml::load_from_str_with("!answer anything", &registry).unwrap();
/// assert_eq!(docs[0], Yaml::Integer(42));
/// ```
#[derive(Default)]
pub struct TagRegistry {
    rules: HashMap<String, TagRule>,
    strict: bool,
}

impl TagRegistry {
    /// Create a registry with the built-in core-schema behavior only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoding rule for the given tag URI.
    ///
    /// The URI is the fully resolved tag: `tag:yaml.org,2002:int` for `!!int`, `!shape` for a
    /// local `!shape` tag, or whatever a `%TAG` directive expands a shorthand to.
    pub fn register<F>(&mut self, uri: impl Into<String>, rule: F)
    where
        F: Fn(Yaml) -> TagResult + Send + Sync + 'static,
    {
        self.rules.insert(uri.into(), Box::new(rule));
    }

    /// Refuse tags with no rule instead of wrapping them in [`Yaml::Tagged`].
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// Resolve an explicitly tagged scalar.
    pub(crate) fn resolve_scalar(&self, tag: &Tag, v: String, style: TScalarStyle) -> TagResult {
        if let Some(rule) = self.rules.get(&tag.uri()) {
            return rule(Yaml::String(v));
        }
        if tag.handle.is_empty() && tag.suffix == "!" {
            // the non-specific `!` tag forces the default type of the kind, a string
            return Ok(Yaml::String(v));
        }
        if !tag.is_core_schema() {
            return self.unknown(tag, Yaml::String(v));
        }
        let resolved = match tag.suffix.as_str() {
            "str" => Yaml::String(v),
            "binary" => parse_binary(&v).map_or(Yaml::BadValue, Yaml::Binary),
            // quoted and block scalars resolve as strings for every other core tag
            "null" | "bool" | "int" | "float" | "timestamp"
                if style != TScalarStyle::Plain =>
            {
                Yaml::String(v)
            }
            "null" => match v.as_str() {
                "~" | "" | "null" | "Null" | "NULL" => Yaml::Null,
                _ => Yaml::BadValue,
            },
            "bool" => match v.as_str() {
                "true" | "True" | "TRUE" => Yaml::Boolean(true),
                "false" | "False" | "FALSE" => Yaml::Boolean(false),
                _ => Yaml::BadValue,
            },
            "int" => parse_int(&v).map_or(Yaml::BadValue, Yaml::Integer),
            "float" => parse_core_schema_fp(&v).map_or(Yaml::BadValue, |f| Yaml::Float(f.into())),
            "timestamp" => parse_timestamp(&v).map_or(Yaml::BadValue, Yaml::Timestamp),
            _ => return self.unknown(tag, Yaml::String(v)),
        };
        Ok(resolved)
    }

    /// Resolve an explicitly tagged collection node.
    ///
    /// `had_duplicate_key` reports whether building the node discarded an entry because a key
    /// appeared twice; plain mappings keep the last entry, but `!!set` must reject this.
    pub(crate) fn resolve_collection(
        &self,
        tag: &Tag,
        node: Yaml,
        had_duplicate_key: bool,
    ) -> TagResult {
        if let Some(rule) = self.rules.get(&tag.uri()) {
            return rule(node);
        }
        if !tag.is_core_schema() {
            return self.unknown(tag, node);
        }
        match tag.suffix.as_str() {
            "set" => match node {
                Yaml::Mapping(mapping) => {
                    if had_duplicate_key {
                        return Err(LoadError::DuplicateSetKey);
                    }
                    let mut set = Set::new();
                    for (key, value) in mapping {
                        if !matches!(value, Yaml::Null) {
                            return Err(LoadError::NonNullSetValue);
                        }
                        set.insert(key);
                    }
                    Ok(Yaml::Set(set))
                }
                _ => Ok(Yaml::BadValue),
            },
            "omap" => match node {
                Yaml::Sequence(sequence) => {
                    let mut omap = OMap::new();
                    for entry in sequence {
                        let Yaml::Mapping(mut mapping) = entry else {
                            return Err(LoadError::InvalidOmapEntry);
                        };
                        if mapping.len() != 1 {
                            return Err(LoadError::InvalidOmapEntry);
                        }
                        let (key, value) = mapping.pop_front().unwrap();
                        omap.push((key, value));
                    }
                    Ok(Yaml::OMap(omap))
                }
                _ => Ok(Yaml::BadValue),
            },
            "map" => match node {
                node @ Yaml::Mapping(_) => Ok(node),
                _ => Ok(Yaml::BadValue),
            },
            "seq" => match node {
                node @ Yaml::Sequence(_) => Ok(node),
                _ => Ok(Yaml::BadValue),
            },
            _ => self.unknown(tag, node),
        }
    }

    fn unknown(&self, tag: &Tag, node: Yaml) -> TagResult {
        if self.strict {
            Err(LoadError::UnsupportedTag(tag.uri()))
        } else {
            Ok(Yaml::Tagged(tag.clone(), Box::new(node)))
        }
    }
}

/// Parse the given string as a core-schema integer: decimal with an optional sign, `0x`
/// hexadecimal or `0o` octal.
fn parse_int(v: &str) -> Option<i64> {
    if let Some(number) = v.strip_prefix("0x") {
        i64::from_str_radix(number, 16).ok()
    } else if let Some(number) = v.strip_prefix("0o") {
        i64::from_str_radix(number, 8).ok()
    } else if let Some(number) = v.strip_prefix('+') {
        number.parse().ok()
    } else {
        v.parse().ok()
    }
}

/// The registry used when the caller does not supply one.
///
/// Initialized once, on first use, and never written to afterwards.
pub(crate) fn default_registry() -> &'static TagRegistry {
    static DEFAULT: OnceLock<TagRegistry> = OnceLock::new();
    DEFAULT.get_or_init(TagRegistry::default)
}
