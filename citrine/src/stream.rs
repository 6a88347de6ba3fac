//! Lazy per-document decoding.

use std::str::Chars;

use citrine_parser::{BufferedInput, Event, Parser, SpannedEventReceiver};

use crate::{error::LoadError, loader::YamlLoader, tags, tags::TagRegistry, yaml::Yaml};

/// What to do with the rest of the stream when a document fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Report the error and end the stream.
    #[default]
    Abort,
    /// Report the error, then resume at the next line-initial `---` marker.
    SkipToNextDocument,
}

/// A lazy iterator over the documents of a YAML stream.
///
/// Documents are decoded one at a time, when pulled. Abandoning the iterator mid-stream has no
/// side effects: no document past the last one pulled is ever inspected. An error in one document
/// never corrupts previously yielded documents; what happens to the documents after it depends on
/// the [`ErrorPolicy`].
///
/// # Examples
/// ```
/// use citrine::{DocumentStream, Yaml};
///
/// let mut stream = DocumentStream::new("---\n- A\n---\n- B\n");
/// let first = stream.next().unwrap().unwrap();
/// assert_eq!(first[0], Yaml::String("A".into()));
/// let second = stream.next().unwrap().unwrap();
/// assert_eq!(second[0], Yaml::String("B".into()));
/// assert!(stream.next().is_none());
/// ```
pub struct DocumentStream<'input, 'reg> {
    source: &'input str,
    /// Byte offset into `source` of the slice the parser is reading.
    offset: usize,
    parser: Parser<BufferedInput<Chars<'input>>>,
    registry: &'reg TagRegistry,
    policy: ErrorPolicy,
    done: bool,
}

impl<'input> DocumentStream<'input, 'static> {
    /// Create a stream decoding with the built-in core-schema rules.
    #[must_use]
    pub fn new(source: &'input str) -> Self {
        Self::with_registry(source, tags::default_registry())
    }
}

impl<'input, 'reg> DocumentStream<'input, 'reg> {
    /// Create a stream resolving tags through the given registry.
    #[must_use]
    pub fn with_registry(source: &'input str, registry: &'reg TagRegistry) -> Self {
        DocumentStream {
            source,
            offset: 0,
            parser: Parser::new_from_str(source),
            registry,
            policy: ErrorPolicy::default(),
            done: false,
        }
    }

    /// Select the error policy (builder-style).
    #[must_use]
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restart the parser at the next document marker after a failure.
    ///
    /// `err_index` is the character offset of the error within the slice the parser was reading.
    fn resync(&mut self, err_index: usize) {
        let slice = &self.source[self.offset..];
        let byte = slice
            .char_indices()
            .nth(err_index)
            .map_or(slice.len(), |(b, _)| b);
        let rest = &slice[byte..];
        // resume strictly after the line the error is on
        let mut pos = match rest.find('\n') {
            Some(i) => i + 1,
            None => {
                self.done = true;
                return;
            }
        };
        loop {
            if is_document_start_line(&rest[pos..]) {
                self.offset += byte + pos;
                self.parser = Parser::new_from_str(&self.source[self.offset..]);
                return;
            }
            match rest[pos..].find('\n') {
                Some(i) => pos += i + 1,
                None => break,
            }
        }
        self.done = true;
    }
}

fn is_document_start_line(line: &str) -> bool {
    line.starts_with("---")
        && matches!(line.as_bytes().get(3), None | Some(b' ' | b'\t' | b'\n' | b'\r'))
}

impl Iterator for DocumentStream<'_, '_> {
    type Item = Result<Yaml, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut loader = YamlLoader::new(self.registry);
        loop {
            match self.parser.next_event() {
                Err(error) => {
                    let index = error.marker().index();
                    match self.policy {
                        ErrorPolicy::Abort => self.done = true,
                        ErrorPolicy::SkipToNextDocument => self.resync(index),
                    }
                    return Some(Err(error.into()));
                }
                Ok((Event::StreamEnd, _)) => {
                    self.done = true;
                    return None;
                }
                Ok((ev, span)) => {
                    let end_of_document = ev == Event::DocumentEnd;
                    loader.on_event(ev, span);
                    if end_of_document {
                        if let Some(error) = loader.take_error() {
                            if self.policy == ErrorPolicy::Abort {
                                self.done = true;
                            }
                            return Some(Err(error));
                        }
                        return Some(Ok(loader.into_document().unwrap_or(Yaml::BadValue)));
                    }
                }
            }
        }
    }
}
