//! Home to the YAML parser.
//!
//! The parser takes the [`Token`]s the [`Scanner`] emits and turns them into a stream of
//! [`Event`]s through a pushdown state machine. The nesting of `SequenceStart`/`SequenceEnd` and
//! `MappingStart`/`MappingEnd` events encodes the node tree; consumers implement
//! [`EventReceiver`] or [`SpannedEventReceiver`] to build their own representation out of it.

use std::{collections::HashMap, fmt};

use crate::{
    input::{BufferedInput, Input},
    scanner::{Marker, ScanError, Scanner, Span, TScalarStyle, Token, TokenType},
};

#[derive(Clone, Copy, PartialEq, Debug, Eq)]
enum State {
    StreamStart,
    ImplicitDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    BlockNode,
    BlockSequenceFirstEntry,
    BlockSequenceEntry,
    IndentlessSequenceEntry,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingValue,
    FlowSequenceFirstEntry,
    FlowSequenceEntry,
    FlowSequenceEntryMappingKey,
    FlowSequenceEntryMappingValue,
    FlowSequenceEntryMappingEnd,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingValue,
    FlowMappingEmptyValue,
    End,
}

/// A YAML tag, with its handle resolved against the active `%TAG` directives.
///
/// The `handle` is the full resolved prefix (e.g. `tag:yaml.org,2002:` for `!!`-shorthands) and
/// `suffix` the remainder, so that the full tag URI is the concatenation of both.
#[derive(Clone, PartialEq, Debug, Eq, Hash)]
pub struct Tag {
    /// The resolved prefix of the tag.
    pub handle: String,
    /// The suffix of the tag.
    pub suffix: String,
}

impl Tag {
    /// Whether the tag is a shorthand of the YAML core schema (`!!str`, `!!int`, ...).
    #[must_use]
    pub fn is_core_schema(&self) -> bool {
        self.handle == CORE_SCHEMA_PREFIX
    }

    /// Return the full URI of the tag (handle and suffix concatenated).
    #[must_use]
    pub fn uri(&self) -> String {
        format!("{}{}", self.handle, self.suffix)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.handle, self.suffix)
    }
}

/// The resolution prefix of the `!!` shorthand handle.
const CORE_SCHEMA_PREFIX: &str = "tag:yaml.org,2002:";

/// An event generated at each step of parsing.
#[derive(Clone, PartialEq, Debug, Eq)]
pub enum Event {
    /// Event generated at the very beginning of parsing.
    StreamStart,
    /// Last event that will be generated by the parser. Signals EOF.
    StreamEnd,
    /// The start of a YAML document.
    DocumentStart,
    /// The end of a YAML document.
    DocumentEnd,
    /// A reference to an anchor.
    Alias(usize),
    /// A scalar value, with its style, anchor id and tag.
    Scalar(String, TScalarStyle, usize, Option<Tag>),
    /// The start of a sequence, with its anchor id and tag.
    SequenceStart(usize, Option<Tag>),
    /// The end of a sequence.
    SequenceEnd,
    /// The start of a mapping, with its anchor id and tag.
    MappingStart(usize, Option<Tag>),
    /// The end of a mapping.
    MappingEnd,
}

impl Event {
    /// An empty scalar event, standing in for an omitted node.
    fn empty_scalar() -> Event {
        // a `null' scalar
        Event::Scalar("~".to_owned(), TScalarStyle::Plain, 0, None)
    }

    fn empty_scalar_with_anchor(anchor: usize, tag: Option<Tag>) -> Event {
        Event::Scalar(String::new(), TScalarStyle::Plain, anchor, tag)
    }
}

/// Trait to be implemented in order to use the low-level parsing API.
///
/// The functions are called when the corresponding [`Event`]s are encountered.
pub trait EventReceiver {
    /// Handler called for each YAML event that is emitted by the parser.
    fn on_event(&mut self, ev: Event);
}

/// Trait to be implemented for using the low-level parsing API.
///
/// Functionally similar to [`EventReceiver`], but receives a [`Span`] as well as the event.
pub trait SpannedEventReceiver {
    /// Handler called for each event that occurs.
    fn on_event(&mut self, ev: Event, span: Span);
}

impl<R: EventReceiver> SpannedEventReceiver for R {
    fn on_event(&mut self, ev: Event, _span: Span) {
        EventReceiver::on_event(self, ev);
    }
}

/// A convenience alias for a `Result` of a parser event.
pub type ParseResult = Result<(Event, Span), ScanError>;

/// A YAML parser.
pub struct Parser<T: Input> {
    scanner: Scanner<T>,
    states: Vec<State>,
    state: State,
    token: Option<Token>,
    current: Option<(Event, Span)>,
    anchors: HashMap<String, usize>,
    anchor_id_count: usize,
    tags: HashMap<String, String>,
}

impl<'a> Parser<BufferedInput<std::str::Chars<'a>>> {
    /// Create a new instance of a parser from a &str.
    #[must_use]
    pub fn new_from_str(value: &'a str) -> Self {
        Parser::new(BufferedInput::new(value.chars()))
    }
}

impl<I: Iterator<Item = char>> Parser<BufferedInput<I>> {
    /// Create a new instance of a parser from an iterator of `char`s.
    pub fn new_from_iter(iter: I) -> Self {
        Parser::new(BufferedInput::new(iter))
    }
}

impl<T: Input> Parser<T> {
    /// Create a new instance of a parser from the given input of characters.
    pub fn new(input: T) -> Parser<T> {
        Parser {
            scanner: Scanner::new(input),
            states: Vec::new(),
            state: State::StreamStart,
            token: None,
            current: None,
            anchors: HashMap::new(),
            // valid anchor_id starts from 1
            anchor_id_count: 1,
            tags: HashMap::new(),
        }
    }

    /// Try to load the next event and return it, but do not consume it from `self`.
    ///
    /// Any subsequent call of [`Parser::next_event`] will return the same event.
    ///
    /// # Errors
    /// Returns `ScanError` when loading the next event fails.
    pub fn peek(&mut self) -> Result<&(Event, Span), ScanError> {
        if self.current.is_none() {
            self.current = Some(self.parse()?);
        }
        Ok(self.current.as_ref().unwrap())
    }

    /// Try to load the next event and return it, consuming it from `self`.
    ///
    /// # Errors
    /// Returns `ScanError` when loading the next event fails.
    pub fn next_event(&mut self) -> ParseResult {
        match self.current.take() {
            None => self.parse(),
            Some(v) => Ok(v),
        }
    }

    /// Load the YAML from the stream in `self`, pushing events into `recv`.
    ///
    /// The contents of the stream are parsed and the corresponding events are sent into the
    /// receiver. For detailed explanations about how events work, see [`EventReceiver`].
    ///
    /// If `multi` is set to `true`, the parser will allow parsing of multiple YAML documents
    /// inside the stream. Otherwise, parsing stops after the first document.
    ///
    /// # Errors
    /// Returns `ScanError` when loading fails.
    pub fn load<R: SpannedEventReceiver>(
        &mut self,
        recv: &mut R,
        multi: bool,
    ) -> Result<(), ScanError> {
        let (ev, span) = self.next_event()?;
        if ev != Event::StreamStart {
            return Err(ScanError::new(
                span.start,
                "did not find expected <stream-start>",
            ));
        }
        recv.on_event(ev, span);

        let (mut ev, mut span) = self.next_event()?;
        loop {
            if ev == Event::StreamEnd {
                recv.on_event(ev, span);
                return Ok(());
            }
            if ev != Event::DocumentStart {
                return Err(ScanError::new(
                    span.start,
                    "did not find expected <document start>",
                ));
            }
            recv.on_event(ev, span);
            self.load_document(recv)?;
            if !multi {
                return Ok(());
            }
            (ev, span) = self.next_event()?;
        }
    }

    fn load_document<R: SpannedEventReceiver>(&mut self, recv: &mut R) -> Result<(), ScanError> {
        loop {
            let (ev, span) = self.next_event()?;
            let done = ev == Event::DocumentEnd;
            recv.on_event(ev, span);
            if done {
                return Ok(());
            }
        }
    }

    fn parse(&mut self) -> ParseResult {
        let (ev, span) = self.state_machine()?;
        debug_print!("  \x1B[;33m{:?}\x1B[;0m", ev);
        Ok((ev, span))
    }

    fn state_machine(&mut self) -> ParseResult {
        match self.state {
            State::StreamStart => self.stream_start(),
            State::ImplicitDocumentStart => self.document_start(true),
            State::DocumentStart => self.document_start(false),
            State::DocumentContent => self.document_content(),
            State::DocumentEnd => self.document_end(),
            State::BlockNode => self.parse_node(true, false),
            State::BlockSequenceFirstEntry => self.block_sequence_entry(true),
            State::BlockSequenceEntry => self.block_sequence_entry(false),
            State::IndentlessSequenceEntry => self.indentless_sequence_entry(),
            State::BlockMappingFirstKey => self.block_mapping_key(true),
            State::BlockMappingKey => self.block_mapping_key(false),
            State::BlockMappingValue => self.block_mapping_value(),
            State::FlowSequenceFirstEntry => self.flow_sequence_entry(true),
            State::FlowSequenceEntry => self.flow_sequence_entry(false),
            State::FlowSequenceEntryMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceEntryMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceEntryMappingEnd => self.flow_sequence_entry_mapping_end(),
            State::FlowMappingFirstKey => self.flow_mapping_key(true),
            State::FlowMappingKey => self.flow_mapping_key(false),
            State::FlowMappingValue => self.flow_mapping_value(false),
            State::FlowMappingEmptyValue => self.flow_mapping_value(true),
            State::End => Ok((Event::StreamEnd, Span::empty(self.scanner.mark()))),
        }
    }

    fn peek_token(&mut self) -> Result<&Token, ScanError> {
        if self.token.is_none() {
            self.token = Some(self.scan_next_token()?);
        }
        Ok(self.token.as_ref().unwrap())
    }

    fn scan_next_token(&mut self) -> Result<Token, ScanError> {
        match self.scanner.next_token()? {
            Some(tok) => Ok(tok),
            None => Err(ScanError::new(
                self.scanner.mark(),
                "unexpected end of the token stream",
            )),
        }
    }

    /// Consume the lookahead token.
    ///
    /// Must be preceded by a successful call to [`Parser::peek_token`].
    fn pop_token(&mut self) -> Token {
        self.token.take().unwrap()
    }

    fn pop_state(&mut self) -> State {
        self.states.pop().unwrap()
    }

    fn push_state(&mut self, state: State) {
        self.states.push(state);
    }

    fn register_anchor(&mut self, name: String) -> usize {
        // anchors can be overridden/reused: the last definition wins
        let new_id = self.anchor_id_count;
        self.anchor_id_count += 1;
        self.anchors.insert(name, new_id);
        new_id
    }

    fn resolve_tag(&self, mark: Marker, handle: &str, suffix: String) -> Result<Tag, ScanError> {
        if handle.is_empty() {
            // verbatim tag; normalize the core-schema prefix so that `!<tag:yaml.org,2002:str>`
            // and `!!str` compare equal
            if let Some(rest) = suffix.strip_prefix(CORE_SCHEMA_PREFIX) {
                return Ok(Tag {
                    handle: CORE_SCHEMA_PREFIX.to_owned(),
                    suffix: rest.to_owned(),
                });
            }
            return Ok(Tag {
                handle: String::new(),
                suffix,
            });
        }
        let prefix = match self.tags.get(handle) {
            Some(prefix) => prefix.clone(),
            None => match handle {
                "!" => "!".to_owned(),
                "!!" => CORE_SCHEMA_PREFIX.to_owned(),
                _ => {
                    return Err(ScanError::new_string(
                        mark,
                        format!("while parsing a node, found undefined tag handle {handle}"),
                    ))
                }
            },
        };
        Ok(Tag {
            handle: prefix,
            suffix,
        })
    }

    fn stream_start(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(span, TokenType::StreamStart) => {
                self.pop_token();
                self.state = State::ImplicitDocumentStart;
                Ok((Event::StreamStart, span))
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "did not find expected <stream-start>",
            )),
        }
    }

    fn document_start(&mut self, implicit: bool) -> ParseResult {
        if !implicit {
            while let TokenType::DocumentEnd = self.peek_token()?.1 {
                self.pop_token();
            }
        }
        match *self.peek_token()? {
            Token(span, TokenType::StreamEnd) => {
                self.pop_token();
                self.state = State::End;
                Ok((Event::StreamEnd, span))
            }
            Token(
                _,
                TokenType::VersionDirective(..) | TokenType::TagDirective(..)
                | TokenType::DocumentStart,
            ) => self.explicit_document_start(),
            Token(span, _) if implicit => {
                self.anchors.clear();
                self.push_state(State::DocumentEnd);
                self.state = State::BlockNode;
                Ok((Event::DocumentStart, span))
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "did not find expected <document start>",
            )),
        }
    }

    fn explicit_document_start(&mut self) -> ParseResult {
        self.process_directives()?;
        match *self.peek_token()? {
            Token(span, TokenType::DocumentStart) => {
                self.pop_token();
                self.anchors.clear();
                self.push_state(State::DocumentEnd);
                self.state = State::DocumentContent;
                Ok((Event::DocumentStart, span))
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "did not find expected <document start>",
            )),
        }
    }

    fn process_directives(&mut self) -> Result<(), ScanError> {
        let mut version_seen = false;
        loop {
            match self.peek_token()?.1 {
                TokenType::VersionDirective(..) | TokenType::TagDirective(..) => {}
                _ => break,
            }
            let Token(span, tok) = self.pop_token();
            match tok {
                TokenType::VersionDirective(major, _minor) => {
                    if version_seen {
                        return Err(ScanError::new(
                            span.start,
                            "while parsing a document, found duplicate %YAML directive",
                        ));
                    }
                    if major != 1 {
                        return Err(ScanError::new(
                            span.start,
                            "while parsing a document, found incompatible YAML version",
                        ));
                    }
                    version_seen = true;
                }
                TokenType::TagDirective(handle, prefix) => {
                    // redefinition of a handle: the last directive wins
                    self.tags.insert(handle, prefix);
                }
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    fn document_content(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(
                span,
                TokenType::VersionDirective(..)
                | TokenType::TagDirective(..)
                | TokenType::DocumentStart
                | TokenType::DocumentEnd
                | TokenType::StreamEnd,
            ) => {
                // an empty document
                self.state = self.pop_state();
                Ok((Event::empty_scalar(), span))
            }
            _ => self.parse_node(true, false),
        }
    }

    fn document_end(&mut self) -> ParseResult {
        let mut explicit_end = false;
        let span = match *self.peek_token()? {
            Token(span, TokenType::DocumentEnd) => {
                explicit_end = true;
                self.pop_token();
                span
            }
            Token(span, _) => Span::empty(span.start),
        };
        // `%TAG` handles do not carry over to the next document
        self.tags.clear();
        self.state = if explicit_end {
            State::ImplicitDocumentStart
        } else {
            State::DocumentStart
        };
        Ok((Event::DocumentEnd, span))
    }

    #[allow(clippy::too_many_lines)]
    fn parse_node(&mut self, block: bool, indentless_sequence: bool) -> ParseResult {
        let mut anchor_id = 0;
        let mut tag: Option<Tag> = None;
        loop {
            match self.peek_token()?.1 {
                TokenType::Alias(_) => {
                    self.state = self.pop_state();
                    let Token(span, TokenType::Alias(name)) = self.pop_token() else {
                        unreachable!()
                    };
                    if anchor_id > 0 || tag.is_some() {
                        return Err(ScanError::new(
                            span.start,
                            "while parsing a node, found an alias with properties",
                        ));
                    }
                    return match self.anchors.get(&name) {
                        None => Err(ScanError::new_string(
                            span.start,
                            format!("while parsing a node, found undefined anchor '{name}'"),
                        )),
                        Some(id) => Ok((Event::Alias(*id), span)),
                    };
                }
                TokenType::Anchor(_) => {
                    let Token(span, TokenType::Anchor(name)) = self.pop_token() else {
                        unreachable!()
                    };
                    if anchor_id > 0 {
                        return Err(ScanError::new(
                            span.start,
                            "while parsing a node, found duplicate anchor",
                        ));
                    }
                    anchor_id = self.register_anchor(name);
                }
                TokenType::Tag(..) => {
                    let Token(span, TokenType::Tag(handle, suffix)) = self.pop_token() else {
                        unreachable!()
                    };
                    if tag.is_some() {
                        return Err(ScanError::new(
                            span.start,
                            "while parsing a node, found duplicate tag",
                        ));
                    }
                    tag = Some(self.resolve_tag(span.start, &handle, suffix)?);
                }
                _ => break,
            }
        }
        match *self.peek_token()? {
            Token(span, TokenType::BlockEntry) if indentless_sequence => {
                self.state = State::IndentlessSequenceEntry;
                Ok((Event::SequenceStart(anchor_id, tag), span))
            }
            Token(_, TokenType::Scalar(..)) => {
                self.state = self.pop_state();
                let Token(span, TokenType::Scalar(style, v)) = self.pop_token() else {
                    unreachable!()
                };
                Ok((Event::Scalar(v, style, anchor_id, tag), span))
            }
            Token(span, TokenType::FlowSequenceStart) => {
                self.state = State::FlowSequenceFirstEntry;
                Ok((Event::SequenceStart(anchor_id, tag), span))
            }
            Token(span, TokenType::FlowMappingStart) => {
                self.state = State::FlowMappingFirstKey;
                Ok((Event::MappingStart(anchor_id, tag), span))
            }
            Token(span, TokenType::BlockSequenceStart) if block => {
                self.state = State::BlockSequenceFirstEntry;
                Ok((Event::SequenceStart(anchor_id, tag), span))
            }
            Token(span, TokenType::BlockMappingStart) if block => {
                self.state = State::BlockMappingFirstKey;
                Ok((Event::MappingStart(anchor_id, tag), span))
            }
            // an explicit property with no node content is an empty node
            Token(span, _) if anchor_id > 0 || tag.is_some() => {
                self.state = self.pop_state();
                Ok((Event::empty_scalar_with_anchor(anchor_id, tag), span))
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "while parsing a node, did not find expected node content",
            )),
        }
    }

    fn block_sequence_entry(&mut self, first: bool) -> ParseResult {
        if first {
            // skip the `BlockSequenceStart` token
            self.peek_token()?;
            self.pop_token();
        }
        match *self.peek_token()? {
            Token(span, TokenType::BlockEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                Ok((Event::SequenceEnd, span))
            }
            Token(_, TokenType::BlockEntry) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(span, TokenType::BlockEntry | TokenType::BlockEnd) => {
                        self.state = State::BlockSequenceEntry;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::BlockSequenceEntry);
                        self.parse_node(true, false)
                    }
                }
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "while parsing a block collection, did not find expected '-' indicator",
            )),
        }
    }

    fn indentless_sequence_entry(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(_, TokenType::BlockEntry) => (),
            Token(span, _) => {
                self.state = self.pop_state();
                return Ok((Event::SequenceEnd, span));
            }
        }
        self.pop_token();
        match *self.peek_token()? {
            Token(
                span,
                TokenType::BlockEntry | TokenType::Key | TokenType::Value | TokenType::BlockEnd,
            ) => {
                self.state = State::IndentlessSequenceEntry;
                Ok((Event::empty_scalar(), span))
            }
            _ => {
                self.push_state(State::IndentlessSequenceEntry);
                self.parse_node(true, false)
            }
        }
    }

    fn block_mapping_key(&mut self, first: bool) -> ParseResult {
        if first {
            // skip the `BlockMappingStart` token
            self.peek_token()?;
            self.pop_token();
        }
        match *self.peek_token()? {
            Token(_, TokenType::Key) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(span, TokenType::Key | TokenType::Value | TokenType::BlockEnd) => {
                        self.state = State::BlockMappingValue;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::BlockMappingValue);
                        self.parse_node(true, true)
                    }
                }
            }
            // an empty key directly followed by a value
            Token(span, TokenType::Value) => {
                self.state = State::BlockMappingValue;
                Ok((Event::empty_scalar(), span))
            }
            Token(span, TokenType::BlockEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                Ok((Event::MappingEnd, span))
            }
            Token(span, _) => Err(ScanError::new(
                span.start,
                "while parsing a block mapping, did not find expected key",
            )),
        }
    }

    fn block_mapping_value(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(_, TokenType::Value) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(span, TokenType::Key | TokenType::Value | TokenType::BlockEnd) => {
                        self.state = State::BlockMappingKey;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::BlockMappingKey);
                        self.parse_node(true, true)
                    }
                }
            }
            Token(span, _) => {
                self.state = State::BlockMappingKey;
                Ok((Event::empty_scalar(), span))
            }
        }
    }

    fn flow_sequence_entry(&mut self, first: bool) -> ParseResult {
        if first {
            // skip the `FlowSequenceStart` token
            self.peek_token()?;
            self.pop_token();
        }
        match *self.peek_token()? {
            Token(span, TokenType::FlowSequenceEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                return Ok((Event::SequenceEnd, span));
            }
            Token(_, TokenType::FlowEntry) if !first => {
                self.pop_token();
            }
            Token(span, _) if !first => {
                return Err(ScanError::new(
                    span.start,
                    "while parsing a flow sequence, expected ',' or ']'",
                ));
            }
            _ => { /* the first entry follows directly */ }
        }
        match *self.peek_token()? {
            Token(span, TokenType::FlowSequenceEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                Ok((Event::SequenceEnd, span))
            }
            Token(span, TokenType::Key) => {
                // a `key: value` pair inside a flow sequence is a single-pair mapping
                self.state = State::FlowSequenceEntryMappingKey;
                self.pop_token();
                Ok((Event::MappingStart(0, None), span))
            }
            _ => {
                self.push_state(State::FlowSequenceEntry);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_sequence_entry_mapping_key(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(
                span,
                TokenType::Value | TokenType::FlowEntry | TokenType::FlowSequenceEnd,
            ) => {
                self.state = State::FlowSequenceEntryMappingValue;
                Ok((Event::empty_scalar(), span))
            }
            _ => {
                self.push_state(State::FlowSequenceEntryMappingValue);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_sequence_entry_mapping_value(&mut self) -> ParseResult {
        match *self.peek_token()? {
            Token(_, TokenType::Value) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(span, TokenType::FlowEntry | TokenType::FlowSequenceEnd) => {
                        self.state = State::FlowSequenceEntryMappingEnd;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::FlowSequenceEntryMappingEnd);
                        self.parse_node(false, false)
                    }
                }
            }
            Token(span, _) => {
                self.state = State::FlowSequenceEntryMappingEnd;
                Ok((Event::empty_scalar(), span))
            }
        }
    }

    fn flow_sequence_entry_mapping_end(&mut self) -> ParseResult {
        self.state = State::FlowSequenceEntry;
        Ok((Event::MappingEnd, Span::empty(self.scanner.mark())))
    }

    fn flow_mapping_key(&mut self, first: bool) -> ParseResult {
        if first {
            // skip the `FlowMappingStart` token
            self.peek_token()?;
            self.pop_token();
        }
        match *self.peek_token()? {
            Token(span, TokenType::FlowMappingEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                return Ok((Event::MappingEnd, span));
            }
            Token(_, TokenType::FlowEntry) if !first => {
                self.pop_token();
            }
            Token(span, _) if !first => {
                return Err(ScanError::new(
                    span.start,
                    "while parsing a flow mapping, did not find expected ',' or '}'",
                ));
            }
            _ => { /* the first entry follows directly */ }
        }
        match *self.peek_token()? {
            Token(span, TokenType::FlowMappingEnd) => {
                self.pop_token();
                self.state = self.pop_state();
                Ok((Event::MappingEnd, span))
            }
            Token(_, TokenType::Key) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(
                        span,
                        TokenType::Value | TokenType::FlowEntry | TokenType::FlowMappingEnd,
                    ) => {
                        self.state = State::FlowMappingValue;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::FlowMappingValue);
                        self.parse_node(false, false)
                    }
                }
            }
            Token(span, TokenType::Value) => {
                self.state = State::FlowMappingValue;
                Ok((Event::empty_scalar(), span))
            }
            _ => {
                self.push_state(State::FlowMappingEmptyValue);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_mapping_value(&mut self, empty: bool) -> ParseResult {
        if empty {
            self.state = State::FlowMappingKey;
            return Ok((Event::empty_scalar(), Span::empty(self.scanner.mark())));
        }
        match *self.peek_token()? {
            Token(_, TokenType::Value) => {
                self.pop_token();
                match *self.peek_token()? {
                    Token(span, TokenType::FlowEntry | TokenType::FlowMappingEnd) => {
                        self.state = State::FlowMappingKey;
                        Ok((Event::empty_scalar(), span))
                    }
                    _ => {
                        self.push_state(State::FlowMappingKey);
                        self.parse_node(false, false)
                    }
                }
            }
            Token(span, _) => {
                self.state = State::FlowMappingKey;
                Ok((Event::empty_scalar(), span))
            }
        }
    }
}

impl<T: Input> Iterator for Parser<T> {
    type Item = ParseResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::End && self.current.is_none() {
            return None;
        }
        Some(self.next_event())
    }
}
