//! YAML objects manipulation utilities.

#![allow(clippy::module_name_repetitions)]

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    mem,
    ops::{Index, IndexMut},
};

use chrono::{DateTime, FixedOffset};
use hashlink::{LinkedHashMap, LinkedHashSet};
use ordered_float::OrderedFloat;

use citrine_parser::{BufferedInput, Input, Parser, Tag};

use crate::{error::LoadError, loader::YamlLoader, tags};

/// A YAML node is stored as this `Yaml` enumeration, which provides an easy way to
/// access your YAML document.
///
/// # Examples
///
/// ```
/// use citrine::Yaml;
/// let foo = Yaml::value_from_str("-123"); // convert the string to the appropriate YAML type
/// assert_eq!(foo.as_i64().unwrap(), -123);
///
/// // iterate over a sequence
/// let vec = Yaml::Sequence(vec![Yaml::Integer(1), Yaml::Integer(2)]);
/// for v in vec.as_vec().unwrap() {
///     assert!(v.as_i64().is_some());
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Yaml {
    /// YAML null, e.g. `null` or `~`.
    Null,
    /// YAML bool, e.g. `true` or `false`.
    Boolean(bool),
    /// YAML int, stored as `i64`.
    Integer(i64),
    /// YAML float.
    ///
    /// [`OrderedFloat`] keeps the enum [`Eq`] and [`Hash`] so that any node can be used as a
    /// mapping key.
    Float(OrderedFloat<f64>),
    /// YAML scalar string.
    String(String),
    /// A `!!binary` scalar, decoded from base64.
    Binary(Vec<u8>),
    /// A scalar matching the timestamp grammar, resolved to an instant.
    Timestamp(Timestamp),
    /// YAML sequence, can be accessed as a `Vec`.
    Sequence(Sequence),
    /// YAML mapping, can be accessed as a [`LinkedHashMap`].
    ///
    /// Iteration order will match the order of insertion into the map and that of the document.
    Mapping(Mapping),
    /// A `!!set` mapping: insertion-ordered keys associated with no values.
    ///
    /// Unlike every other variant, equality between sets ignores insertion order.
    Set(Set),
    /// A `!!omap`: an ordered sequence of key-value pairs.
    OMap(OMap),
    /// A node decorated with a tag the decoder has no rule for.
    ///
    /// The node is kept raw (scalars stay strings) so the caller can dispatch on
    /// [`Tag::uri`] and apply its own decoding.
    Tagged(Tag, Box<Yaml>),
    /// Accessing a nonexistent node via the Index trait returns `BadValue`. This simplifies error
    /// handling in the calling code. Invalid type conversion also returns `BadValue`. A scalar
    /// whose content contradicts its explicit core-schema tag (e.g. `!!int foo`) resolves to
    /// `BadValue` as well.
    BadValue,
}

/// The type contained in the [`Yaml::Sequence`] variant.
pub type Sequence = Vec<Yaml>;
/// The type contained in the [`Yaml::Mapping`] variant.
pub type Mapping = LinkedHashMap<Yaml, Yaml>;
/// The type contained in the [`Yaml::Set`] variant.
pub type Set = LinkedHashSet<Yaml>;
/// The type contained in the [`Yaml::OMap`] variant.
pub type OMap = Vec<(Yaml, Yaml)>;
/// The type contained in the [`Yaml::Timestamp`] variant.
///
/// Comparison between timestamps compares the instants they denote: the canonical and the
/// space-separated writings of the same moment are equal.
pub type Timestamp = DateTime<FixedOffset>;

impl PartialEq for Yaml {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::BadValue, Self::BadValue) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Binary(a), Self::Binary(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            // set equality ignores insertion order
            (Self::Set(a), Self::Set(b)) => {
                a.len() == b.len() && a.iter().all(|v| b.contains(v))
            }
            (Self::OMap(a), Self::OMap(b)) => a == b,
            (Self::Tagged(ta, a), Self::Tagged(tb, b)) => ta == tb && a == b,
            _ => false,
        }
    }
}

impl Eq for Yaml {}

impl Hash for Yaml {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Null | Self::BadValue => {}
            Self::Boolean(v) => v.hash(state),
            Self::Integer(v) => v.hash(state),
            Self::Float(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::Binary(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::Sequence(v) => v.hash(state),
            Self::Mapping(v) => v.hash(state),
            Self::Set(v) => {
                // commutative, so that equal sets hash alike regardless of insertion order
                v.len().hash(state);
                let mut acc = 0u64;
                for entry in v.iter() {
                    let mut hasher = DefaultHasher::new();
                    entry.hash(&mut hasher);
                    acc ^= hasher.finish();
                }
                state.write_u64(acc);
            }
            Self::OMap(v) => v.hash(state),
            Self::Tagged(tag, v) => {
                tag.hash(state);
                v.hash(state);
            }
        }
    }
}

impl Yaml {
    /// Load the given string as an array of YAML documents.
    ///
    /// The `source` is interpreted as YAML documents and is parsed. Parsing succeeds if and only
    /// if all documents are parsed successfully. An error in a latter document prevents the
    /// former from being returned.
    ///
    /// Most often, only one document is loaded in a YAML string. In this case, only the first
    /// element of the returned `Vec` will be used. Otherwise, each element in the `Vec` is a
    /// document:
    ///
    /// ```
    /// use citrine::Yaml;
    ///
    /// let docs = Yaml::load_from_str(r#"
    /// First document
    /// ---
    /// - Second document
    /// "#).unwrap();
    /// let first_document = &docs[0]; // select the first YAML document
    /// // the document is a string containing "First document"
    /// assert_eq!(*first_document, Yaml::String("First document".into()));
    ///
    /// let second_document = &docs[1]; // select the second YAML document
    /// // the document is an array containing a single string, "Second document"
    /// assert_eq!(second_document[0], Yaml::String("Second document".into()));
    /// ```
    ///
    /// # Errors
    /// Returns [`LoadError`] when loading fails.
    pub fn load_from_str(source: &str) -> Result<Vec<Yaml>, LoadError> {
        Self::load_from_iter(source.chars())
    }

    /// Load the contents of the given iterator as an array of YAML documents.
    ///
    /// See [`Self::load_from_str`] for details.
    ///
    /// # Errors
    /// Returns [`LoadError`] when loading fails.
    pub fn load_from_iter<I: Iterator<Item = char>>(source: I) -> Result<Vec<Yaml>, LoadError> {
        let mut parser = Parser::new(BufferedInput::new(source));
        Self::load_from_parser(&mut parser)
    }

    /// Load the contents from the specified [`Parser`] as an array of YAML documents.
    ///
    /// See [`Self::load_from_str`] for details.
    ///
    /// # Errors
    /// Returns [`LoadError`] when loading fails.
    pub fn load_from_parser<I: Input>(parser: &mut Parser<I>) -> Result<Vec<Yaml>, LoadError> {
        let mut loader = YamlLoader::new(tags::default_registry());
        parser.load(&mut loader, true)?;
        loader.into_documents()
    }

    /// Load the given string, resolving tags through the given registry.
    ///
    /// See [`Self::load_from_str`] for details and [`crate::TagRegistry`] for registering
    /// application-specific tags.
    ///
    /// # Errors
    /// Returns [`LoadError`] when loading fails.
    pub fn load_from_str_with(
        source: &str,
        registry: &crate::TagRegistry,
    ) -> Result<Vec<Yaml>, LoadError> {
        let mut parser = Parser::new_from_str(source);
        let mut loader = YamlLoader::new(registry);
        parser.load(&mut loader, true)?;
        loader.into_documents()
    }

    define_as!(as_bool, bool, Boolean);
    define_as!(as_i64, i64, Integer);
    define_as!(as_timestamp, Timestamp, Timestamp);

    define_as_ref!(as_str, &str, String);
    define_as_ref!(as_hash, &Mapping, Mapping);
    define_as_ref!(as_mapping, &Mapping, Mapping);
    define_as_ref!(as_vec, &Sequence, Sequence);
    define_as_ref!(as_sequence, &Sequence, Sequence);
    define_as_ref!(as_binary, &[u8], Binary);
    define_as_ref!(as_set, &Set, Set);
    define_as_ref!(as_omap, &OMap, OMap);

    define_as_mut_ref!(as_mut_hash, &mut Mapping, Mapping);
    define_as_mut_ref!(as_mut_vec, &mut Sequence, Sequence);

    define_into!(into_bool, bool, Boolean);
    define_into!(into_i64, i64, Integer);
    define_into!(into_string, String, String);
    define_into!(into_hash, Mapping, Mapping);
    define_into!(into_vec, Sequence, Sequence);
    define_into!(into_bytes, Vec<u8>, Binary);

    define_is!(is_null, Self::Null);
    define_is!(is_boolean, Self::Boolean(_));
    define_is!(is_integer, Self::Integer(_));
    define_is!(is_float, Self::Float(_));
    define_is!(is_string, Self::String(_));
    define_is!(is_binary, Self::Binary(_));
    define_is!(is_timestamp, Self::Timestamp(_));
    define_is!(is_sequence, Self::Sequence(_));
    define_is!(is_array, Self::Sequence(_));
    define_is!(is_mapping, Self::Mapping(_));
    define_is!(is_hash, Self::Mapping(_));
    define_is!(is_set, Self::Set(_));
    define_is!(is_omap, Self::OMap(_));
    define_is!(is_tagged, Self::Tagged(..));
    define_is!(is_badvalue, Self::BadValue);

    /// Return the `f64` value contained in this YAML node.
    ///
    /// If the node is not a [`Yaml::Float`] YAML node, `None` is returned.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v.into_inner()),
            _ => None,
        }
    }

    /// Return the `f64` value contained in this YAML node.
    ///
    /// If the node is not a [`Yaml::Float`] YAML node, `None` is returned.
    #[must_use]
    pub fn into_f64(self) -> Option<f64> {
        self.as_f64()
    }

    /// Convert a string to a scalar node.
    ///
    /// This attempts to resolve the content the way an untagged plain scalar would be: `"42"`
    /// becomes an integer, `"~"` a null, ... etc. This means that `"a: b"` gets resolved to a
    /// string and not a mapping. If you want to parse a YAML document, use
    /// [`Self::load_from_str`].
    ///
    /// # Examples
    /// ```
    /// # use citrine::Yaml;
    /// assert!(matches!(Yaml::value_from_str("42"),   Yaml::Integer(42)));
    /// assert!(matches!(Yaml::value_from_str("0x2A"), Yaml::Integer(42)));
    /// assert!(matches!(Yaml::value_from_str("0o52"), Yaml::Integer(42)));
    /// assert!(matches!(Yaml::value_from_str("~"),    Yaml::Null));
    /// assert!(matches!(Yaml::value_from_str("null"), Yaml::Null));
    /// assert!(matches!(Yaml::value_from_str("true"), Yaml::Boolean(true)));
    /// assert!(matches!(Yaml::value_from_str("3.14"), Yaml::Float(_)));
    /// assert!(matches!(Yaml::value_from_str("foo"),  Yaml::String(_)));
    /// ```
    #[must_use]
    pub fn value_from_str(v: &str) -> Yaml {
        crate::scalar::resolve_plain_scalar(v.to_owned())
    }

    /// If a value is null or otherwise bad (see variants), consume it and
    /// replace it with a given value `other`. Otherwise, return self unchanged.
    ///
    /// ```
    /// use citrine::Yaml;
    ///
    /// assert_eq!(Yaml::BadValue.or(Yaml::Integer(3)),  Yaml::Integer(3));
    /// assert_eq!(Yaml::Integer(3).or(Yaml::BadValue),  Yaml::Integer(3));
    /// ```
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::BadValue | Self::Null => other,
            this => this,
        }
    }

    /// Check whether `self` is a [`Yaml::Mapping`] and that it contains the given key.
    ///
    /// # Return
    /// If the variant of `self` is `Yaml::Mapping` and the mapping contains the key, returns
    /// `true`. Otherwise, returns `false`.
    #[must_use]
    pub fn contains_mapping_key(&self, key: &str) -> bool {
        let key = Yaml::String(key.to_owned());
        self.as_hash().is_some_and(|mapping| mapping.contains_key(&key))
    }
}

static BAD_VALUE: Yaml = Yaml::BadValue;

impl<'a> Index<&'a str> for Yaml {
    type Output = Yaml;

    /// Perform indexing if `self` is a mapping.
    ///
    /// Indexing a node that is not a mapping, or a mapping without the given key, yields a
    /// [`Yaml::BadValue`].
    fn index(&self, idx: &'a str) -> &Yaml {
        let key = Yaml::String(idx.to_owned());
        match self.as_hash() {
            Some(mapping) => mapping.get(&key).unwrap_or(&BAD_VALUE),
            None => &BAD_VALUE,
        }
    }
}

impl<'a> IndexMut<&'a str> for Yaml {
    /// Perform indexing if `self` is a mapping.
    ///
    /// # Panics
    /// This function panics if `self` is not a [`Yaml::Mapping`] or if the key does not exist in
    /// the mapping.
    fn index_mut(&mut self, idx: &'a str) -> &mut Yaml {
        let key = Yaml::String(idx.to_owned());
        match self.as_mut_hash() {
            Some(mapping) => mapping
                .get_mut(&key)
                .unwrap_or_else(|| panic!("key '{idx}' not found in mapping")),
            None => panic!("attempt to index a non-mapping node with '{idx}'"),
        }
    }
}

impl Index<usize> for Yaml {
    type Output = Yaml;

    /// Perform indexing if `self` is a sequence or a mapping.
    ///
    /// Out-of-bound indexes and nodes that are neither sequences nor mappings yield a
    /// [`Yaml::BadValue`]. Mappings are looked up with an integer key.
    fn index(&self, idx: usize) -> &Yaml {
        if let Some(v) = self.as_vec() {
            v.get(idx).unwrap_or(&BAD_VALUE)
        } else if let Some(v) = self.as_hash() {
            match i64::try_from(idx) {
                Ok(key) => v.get(&Yaml::Integer(key)).unwrap_or(&BAD_VALUE),
                Err(_) => &BAD_VALUE,
            }
        } else {
            &BAD_VALUE
        }
    }
}

impl IndexMut<usize> for Yaml {
    /// Perform indexing if `self` is a sequence or a mapping.
    ///
    /// # Panics
    /// This function panics if the index is out of bounds or if `self` is neither a sequence nor
    /// a mapping.
    fn index_mut(&mut self, idx: usize) -> &mut Yaml {
        match self {
            Yaml::Sequence(sequence) => sequence
                .get_mut(idx)
                .unwrap_or_else(|| panic!("index {idx} out of bounds in sequence")),
            Yaml::Mapping(mapping) => {
                let key = i64::try_from(idx)
                    .unwrap_or_else(|_| panic!("attempt to index a mapping with an overflowing index"));
                mapping
                    .get_mut(&Yaml::Integer(key))
                    .unwrap_or_else(|| panic!("key {idx} not found in mapping"))
            }
            _ => panic!("attempt to index a scalar node with {idx}"),
        }
    }
}

impl IntoIterator for Yaml {
    type Item = Yaml;
    type IntoIter = YamlIter;

    fn into_iter(self) -> Self::IntoIter {
        YamlIter {
            yaml: self.into_vec().unwrap_or_default().into_iter(),
        }
    }
}

/// An iterator over a [`Yaml`] node.
///
/// If the node is a sequence, iterates over its elements. Otherwise, the iterator is empty.
pub struct YamlIter {
    yaml: std::vec::IntoIter<Yaml>,
}

impl Iterator for YamlIter {
    type Item = Yaml;

    fn next(&mut self) -> Option<Yaml> {
        self.yaml.next()
    }
}
