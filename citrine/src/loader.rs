//! The default loader.

use std::collections::BTreeMap;

use citrine_parser::{Event, Span, SpannedEventReceiver, TScalarStyle, Tag};

use crate::{
    error::LoadError,
    scalar::resolve_plain_scalar,
    tags::TagRegistry,
    yaml::{Mapping, Sequence, Yaml},
};

/// Main structure for loading YAML documents from parser events.
///
/// A `YamlLoader` receives the [`Event`]s of one or more documents and builds one [`Yaml`] root
/// value per document, resolving scalars and tags through a [`TagRegistry`] along the way.
///
/// The anchor table is scoped to a single document: it is cleared at every document boundary, and
/// aliases can only reference anchors defined earlier in the same document.
#[allow(clippy::module_name_repetitions)]
pub struct YamlLoader<'reg> {
    registry: &'reg TagRegistry,
    /// The different YAML documents that are loaded.
    docs: Vec<Yaml>,
    /// The stack of collections being built, innermost last.
    doc_stack: Vec<Scope>,
    /// The key of the pair currently being built, one per nested mapping.
    key_stack: Vec<Yaml>,
    /// Completed nodes that carried an anchor, by anchor id.
    anchor_map: BTreeMap<usize, Yaml>,
    /// The first error raised while resolving; once set, further events are ignored.
    error: Option<LoadError>,
}

/// A collection being built, along with the properties attached to it.
struct Scope {
    node: Yaml,
    anchor_id: usize,
    tag: Option<Tag>,
    /// Whether an insertion into this mapping overwrote an existing key.
    had_duplicate_key: bool,
}

impl Scope {
    fn root(node: Yaml) -> Scope {
        Scope {
            node,
            anchor_id: 0,
            tag: None,
            had_duplicate_key: false,
        }
    }
}

impl<'reg> YamlLoader<'reg> {
    /// Create a loader resolving tags through the given registry.
    #[must_use]
    pub fn new(registry: &'reg TagRegistry) -> YamlLoader<'reg> {
        YamlLoader {
            registry,
            docs: Vec::new(),
            doc_stack: Vec::new(),
            key_stack: Vec::new(),
            anchor_map: BTreeMap::new(),
            error: None,
        }
    }

    /// Return the document nodes from `self`, consuming it in the process.
    ///
    /// # Errors
    /// Returns the first error that was raised while resolving, if any. An error in a latter
    /// document prevents the former documents from being returned.
    pub fn into_documents(self) -> Result<Vec<Yaml>, LoadError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.docs),
        }
    }

    /// Take the first resolution error out of the loader, if any.
    pub(crate) fn take_error(&mut self) -> Option<LoadError> {
        self.error.take()
    }

    /// Extract the single finished document, if any.
    pub(crate) fn into_document(mut self) -> Option<Yaml> {
        self.docs.pop()
    }

    fn handle_event(&mut self, ev: Event) -> Result<(), LoadError> {
        match ev {
            Event::StreamStart | Event::StreamEnd => {}
            Event::DocumentStart => {
                self.anchor_map.clear();
            }
            Event::DocumentEnd => {
                // the anchor table does not outlive the document
                self.anchor_map.clear();
                match self.doc_stack.len() {
                    // empty document
                    0 => self.docs.push(Yaml::BadValue),
                    1 => {
                        let scope = self.doc_stack.pop().unwrap();
                        self.docs.push(scope.node);
                    }
                    _ => unreachable!(),
                }
            }
            Event::SequenceStart(aid, tag) => {
                self.doc_stack.push(Scope {
                    node: Yaml::Sequence(Sequence::new()),
                    anchor_id: aid,
                    tag,
                    had_duplicate_key: false,
                });
            }
            Event::SequenceEnd => {
                let scope = self.doc_stack.pop().unwrap();
                self.finish_collection(scope)?;
            }
            Event::MappingStart(aid, tag) => {
                self.doc_stack.push(Scope {
                    node: Yaml::Mapping(Mapping::new()),
                    anchor_id: aid,
                    tag,
                    had_duplicate_key: false,
                });
                self.key_stack.push(Yaml::BadValue);
            }
            Event::MappingEnd => {
                self.key_stack.pop();
                let scope = self.doc_stack.pop().unwrap();
                self.finish_collection(scope)?;
            }
            Event::Scalar(v, style, aid, tag) => {
                let node = match tag {
                    Some(tag) => self.registry.resolve_scalar(&tag, v, style)?,
                    None if style == TScalarStyle::Plain => resolve_plain_scalar(v),
                    // quoted and block scalars never undergo implicit resolution
                    None => Yaml::String(v),
                };
                self.insert_new_node(node, aid);
            }
            Event::Alias(id) => {
                let node = self
                    .anchor_map
                    .get(&id)
                    .cloned()
                    .ok_or(LoadError::UndefinedAlias)?;
                self.insert_new_node(node, 0);
            }
        }
        Ok(())
    }

    fn finish_collection(&mut self, scope: Scope) -> Result<(), LoadError> {
        let node = match &scope.tag {
            Some(tag) => {
                self.registry
                    .resolve_collection(tag, scope.node, scope.had_duplicate_key)?
            }
            None => scope.node,
        };
        self.insert_new_node(node, scope.anchor_id);
        Ok(())
    }

    fn insert_new_node(&mut self, node: Yaml, aid: usize) {
        // valid anchor id starts from 1
        if aid > 0 {
            self.anchor_map.insert(aid, node.clone());
        }
        if let Some(parent) = self.doc_stack.last_mut() {
            match &mut parent.node {
                Yaml::Sequence(v) => v.push(node),
                Yaml::Mapping(mapping) => {
                    let cur_key = self.key_stack.last_mut().unwrap();
                    if cur_key.is_badvalue() {
                        // current node is a key
                        *cur_key = node;
                    } else {
                        // current node is a value
                        let key = std::mem::replace(cur_key, Yaml::BadValue);
                        // duplicate keys: the last entry wins, but `!!set` needs to know
                        if mapping.insert(key, node).is_some() {
                            parent.had_duplicate_key = true;
                        }
                    }
                }
                _ => unreachable!("parent nodes are always collections"),
            }
        } else {
            self.doc_stack.push(Scope::root(node));
        }
    }
}

impl SpannedEventReceiver for YamlLoader<'_> {
    fn on_event(&mut self, ev: Event, _span: Span) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.handle_event(ev) {
            self.error = Some(error);
        }
    }
}
