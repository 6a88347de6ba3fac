//! Home to the YAML scanner.
//!
//! The scanner is the lowest-level parsing utility. It tokenizes the raw character stream into
//! indentation markers, block and flow indicators, scalars, anchors, aliases, tags and document
//! markers. It does not build structure; that is the job of the [`crate::parser`].
//!
//! Indentation is significant only in block context. The scanner keeps an indentation stack and
//! emits collection-start tokens when a line's leading-space count strictly rises, and
//! [`TokenType::BlockEnd`] when it strictly falls. Inside `[...]` and `{...}`, indentation is
//! suspended entirely and nesting is tracked with a flow-level counter.

use std::{collections::VecDeque, error::Error, fmt};

use crate::{
    char_traits::{
        is_anchor_char, is_blank, is_blank_or_breakz, is_break, is_breakz, is_flow, is_tag_char,
        is_z,
    },
    input::Input,
};

/// The style as which the scalar was written in the YAML document.
#[derive(Clone, Copy, PartialEq, Debug, Eq)]
pub enum TScalarStyle {
    /// A YAML plain scalar.
    Plain,
    /// A YAML single-quoted scalar.
    SingleQuoted,
    /// A YAML double-quoted scalar.
    DoubleQuoted,
    /// A YAML literal block (`|`) scalar.
    Literal,
    /// A YAML folded block (`>`) scalar.
    Folded,
}

/// A location in a yaml document.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Default)]
pub struct Marker {
    /// The position, in characters, at which the event happened.
    index: usize,
    /// The line at which the event happened (1-indexed).
    line: usize,
    /// The column at which the event happened (0-indexed).
    col: usize,
}

impl Marker {
    fn new(index: usize, line: usize, col: usize) -> Marker {
        Marker { index, line, col }
    }

    /// Return the position, in characters, at which the event happened.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the line of the event (1-indexed).
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Return the column of the event (0-indexed).
    #[must_use]
    pub fn col(&self) -> usize {
        self.col
    }
}

/// A range of locations in a Yaml document.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Default)]
pub struct Span {
    /// The start (inclusive) of the range.
    pub start: Marker,
    /// The end (exclusive) of the range.
    pub end: Marker,
}

impl Span {
    /// Create a new [`Span`] for the given range.
    #[must_use]
    pub fn new(start: Marker, end: Marker) -> Span {
        Span { start, end }
    }

    /// Create an empty [`Span`] at the given location.
    #[must_use]
    pub fn empty(mark: Marker) -> Span {
        Span {
            start: mark,
            end: mark,
        }
    }
}

/// An error that occurred while scanning.
#[derive(Clone, PartialEq, Debug, Eq)]
pub struct ScanError {
    /// The position at which the error happened in the source.
    mark: Marker,
    /// Human-readable details about the error.
    info: String,
}

impl ScanError {
    /// Create a new error from a location and an error string.
    #[must_use]
    pub fn new(loc: Marker, info: &str) -> ScanError {
        ScanError {
            mark: loc,
            info: info.to_owned(),
        }
    }

    /// Convenience alias for string slices.
    #[must_use]
    pub fn new_string(loc: Marker, info: String) -> ScanError {
        ScanError { mark: loc, info }
    }

    /// Return the marker pointing to the error in the source.
    #[must_use]
    pub fn marker(&self) -> &Marker {
        &self.mark
    }

    /// Return the information string describing the error that happened.
    #[must_use]
    pub fn info(&self) -> &str {
        self.info.as_ref()
    }
}

impl Error for ScanError {}

impl fmt::Display for ScanError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} at byte {} line {} column {}",
            self.info,
            self.mark.index,
            self.mark.line,
            self.mark.col + 1,
        )
    }
}

/// The contents of a scanner token.
#[derive(Clone, PartialEq, Debug, Eq)]
pub enum TokenType {
    /// The start of the stream. Sent first, before even [`TokenType::DocumentStart`].
    StreamStart,
    /// The end of the stream, EOF.
    StreamEnd,
    /// A YAML version directive, major and minor version.
    VersionDirective(u32, u32),
    /// A YAML tag directive, handle and prefix.
    TagDirective(String, String),
    /// The start of a YAML document (`---`).
    DocumentStart,
    /// The end of a YAML document (`...`).
    DocumentEnd,
    /// The start of a sequence block.
    ///
    /// Sequence blocks are arrays starting with a `-`.
    BlockSequenceStart,
    /// The start of a mapping block.
    ///
    /// Mapping blocks are "dictionaries" with "key: value" entries.
    BlockMappingStart,
    /// End of the corresponding `BlockSequenceStart` or `BlockMappingStart`.
    BlockEnd,
    /// Start of an inline sequence (`[ a, b ]`).
    FlowSequenceStart,
    /// End of an inline sequence.
    FlowSequenceEnd,
    /// Start of an inline mapping (`{ a: b, c: d }`).
    FlowMappingStart,
    /// End of an inline mapping.
    FlowMappingEnd,
    /// An entry in a block sequence (c.f.: [`TokenType::BlockSequenceStart`]).
    BlockEntry,
    /// An entry in a flow sequence (c.f.: [`TokenType::FlowSequenceStart`]).
    FlowEntry,
    /// A key in a mapping.
    Key,
    /// A value in a mapping.
    Value,
    /// A reference to an anchor.
    Alias(String),
    /// A YAML anchor (`&`/`*`).
    Anchor(String),
    /// A YAML tag (starting with bangs `!`), as a `(handle, suffix)` pair.
    Tag(String, String),
    /// A regular YAML scalar.
    Scalar(TScalarStyle, String),
}

/// A scanner token.
#[derive(Clone, PartialEq, Debug, Eq)]
pub struct Token(pub Span, pub TokenType);

/// A candidate for a `key: value` mapping key.
///
/// When the scanner encounters content that could be a mapping key, it saves it as a simple key
/// candidate. If a `: ` follows on the same line, a [`TokenType::Key`] token is inserted into the
/// queue retroactively, in front of the already-emitted key content.
#[derive(Clone, PartialEq, Debug, Eq)]
struct SimpleKey {
    possible: bool,
    required: bool,
    token_number: usize,
    mark: Marker,
}

impl SimpleKey {
    fn new(mark: Marker) -> SimpleKey {
        SimpleKey {
            possible: false,
            required: false,
            token_number: 0,
            mark,
        }
    }
}

/// A scanner result, mostly used as a return type for internal functions.
pub type ScanResult = Result<(), ScanError>;

/// The YAML scanner.
///
/// This produces [`Token`]s from the input. Tokens are produced lazily: the scanner only reads as
/// far into the input as needed to yield the next token.
pub struct Scanner<T: Input> {
    /// The input source.
    input: T,
    /// The position of the cursor within the reader.
    mark: Marker,
    /// Buffer for tokens to be returned.
    ///
    /// This buffer can hold some temporary tokens that would cause the parser to error if
    /// returned. For instance, the scanner needs to have scanned past the `:` of a `key: value`
    /// pair before the `Key` token can be inserted in front of the key.
    tokens: VecDeque<Token>,
    /// Whether we have already emitted the `StreamStart` token.
    stream_start_produced: bool,
    /// Whether we have already emitted the `StreamEnd` token.
    stream_end_produced: bool,
    /// In the rare case where the scanner emits 2 tokens at once, whether the second is ready.
    token_available: bool,
    /// Whether a simple key could potentially start at the current position.
    simple_key_allowed: bool,
    /// One simple-key candidate per nested flow level, plus one for the block context.
    simple_keys: Vec<SimpleKey>,
    /// The current indentation level.
    indent: isize,
    /// List of the previous indentation levels.
    indents: Vec<isize>,
    /// Level of nesting of flow sequences and flow mappings.
    flow_level: usize,
    /// The number of tokens that have been returned from the scanner.
    tokens_parsed: usize,
    /// Whether only whitespace was seen on the current line so far.
    ///
    /// Tabs inside indentation are a fatal error, but tabs used as in-line separation are valid.
    leading_whitespace: bool,
}

impl<T: Input> Scanner<T> {
    /// Create a new [`Scanner`] around the given input.
    pub fn new(input: T) -> Scanner<T> {
        Scanner {
            input,
            mark: Marker::new(0, 1, 0),
            tokens: VecDeque::new(),
            stream_start_produced: false,
            stream_end_produced: false,
            token_available: false,
            simple_key_allowed: true,
            simple_keys: Vec::new(),
            indent: -1,
            indents: Vec::new(),
            flow_level: 0,
            tokens_parsed: 0,
            leading_whitespace: true,
        }
    }

    /// Return the next token, or `None` if the stream has ended.
    ///
    /// # Errors
    /// Returns a [`ScanError`] when the input is malformed.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        if self.stream_end_produced {
            return Ok(None);
        }
        if !self.token_available {
            self.fetch_more_tokens()?;
        }
        let Some(t) = self.tokens.pop_front() else {
            return Ok(None);
        };
        self.token_available = false;
        self.tokens_parsed += 1;
        if let TokenType::StreamEnd = t.1 {
            self.stream_end_produced = true;
        }
        debug_print!("  \x1B[;32m{:?}\x1B[;0m", t.1);
        Ok(Some(t))
    }

    /// Return the current position in the input.
    #[must_use]
    pub fn mark(&self) -> Marker {
        self.mark
    }

    /// Fetch tokens into the queue until the front token can safely be returned.
    ///
    /// The front token cannot be returned while a pending simple key could still require a `Key`
    /// token to be inserted in front of it.
    fn fetch_more_tokens(&mut self) -> ScanResult {
        loop {
            let mut need_more = false;
            if self.tokens.is_empty() {
                need_more = true;
            } else {
                self.stale_simple_keys()?;
                for sk in &self.simple_keys {
                    if sk.possible && sk.token_number == self.tokens_parsed {
                        need_more = true;
                        break;
                    }
                }
            }
            if !need_more {
                break;
            }
            self.fetch_next_token()?;
        }
        self.token_available = true;
        Ok(())
    }

    fn fetch_next_token(&mut self) -> ScanResult {
        self.input.lookahead(1);
        if !self.stream_start_produced {
            self.fetch_stream_start();
            return Ok(());
        }
        self.skip_to_next_token()?;
        self.stale_simple_keys()?;
        self.unroll_indent(self.mark.col as isize);
        self.input.lookahead(4);
        if is_z(self.input.peek()) {
            return self.fetch_stream_end();
        }
        let c = self.input.peek();
        if self.mark.col == 0 {
            if c == '%' {
                return self.fetch_directive();
            }
            if self.input.next_is_document_start() {
                return self.fetch_document_indicator(TokenType::DocumentStart);
            }
            if self.input.next_is_document_end() {
                return self.fetch_document_indicator(TokenType::DocumentEnd);
            }
        }
        let nc = self.input.peek_nth(1);
        match c {
            '[' => self.fetch_flow_collection_start(TokenType::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(TokenType::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(TokenType::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(TokenType::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),
            '-' if is_blank_or_breakz(nc) => self.fetch_block_entry(),
            '?' if is_blank_or_breakz(nc) => self.fetch_key(),
            ':' if is_blank_or_breakz(nc) || (self.flow_level > 0 && is_flow(nc)) => {
                self.fetch_value()
            }
            '*' => self.fetch_anchor(true),
            '&' => self.fetch_anchor(false),
            '!' => self.fetch_tag(),
            '|' if self.flow_level == 0 => self.fetch_block_scalar(true),
            '>' if self.flow_level == 0 => self.fetch_block_scalar(false),
            '\'' => self.fetch_flow_scalar(true),
            '"' => self.fetch_flow_scalar(false),
            '%' | '@' | '`' | '|' | '>' => Err(ScanError::new_string(
                self.mark,
                format!("unexpected character: `{c}'"),
            )),
            _ => self.fetch_plain_scalar(),
        }
    }

    /// Skip over whitespace, comments and line breaks until the start of the next token.
    fn skip_to_next_token(&mut self) -> ScanResult {
        loop {
            self.input.lookahead(1);
            match self.input.peek() {
                '\u{feff}' if self.mark.index == 0 => self.skip_char(),
                ' ' => self.skip_char(),
                '\t' => {
                    if self.flow_level == 0 && self.leading_whitespace && self.simple_key_allowed {
                        return Err(ScanError::new(
                            self.mark,
                            "tab cannot be used as indentation",
                        ));
                    }
                    self.skip_char();
                }
                '#' => {
                    while !is_breakz(self.input.look_ch()) {
                        self.skip_char();
                    }
                }
                '\n' | '\r' => {
                    self.input.lookahead(2);
                    self.skip_linebreak();
                    if self.flow_level == 0 {
                        self.allow_simple_key();
                    }
                    self.leading_whitespace = true;
                }
                _ => {
                    self.leading_whitespace = false;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Invalidate simple-key candidates that can no longer be keys.
    ///
    /// An implicit key must fit on a single line and may not exceed 1024 characters.
    fn stale_simple_keys(&mut self) -> ScanResult {
        for sk in &mut self.simple_keys {
            if sk.possible
                && (sk.mark.line < self.mark.line || sk.mark.index + 1024 < self.mark.index)
            {
                if sk.required {
                    return Err(ScanError::new(self.mark, "simple key expect ':'"));
                }
                sk.possible = false;
            }
        }
        Ok(())
    }

    fn save_simple_key(&mut self) -> ScanResult {
        if self.simple_key_allowed {
            let required = self.flow_level == 0 && self.indent == self.mark.col as isize;
            let mut sk = SimpleKey::new(self.mark);
            sk.possible = true;
            sk.required = required;
            sk.token_number = self.tokens_parsed + self.tokens.len();
            self.remove_simple_key()?;
            *self.simple_keys.last_mut().unwrap() = sk;
        }
        Ok(())
    }

    fn remove_simple_key(&mut self) -> ScanResult {
        let last = self.simple_keys.last_mut().unwrap();
        if last.possible && last.required {
            return Err(ScanError::new(self.mark, "simple key expected"));
        }
        last.possible = false;
        Ok(())
    }

    fn allow_simple_key(&mut self) {
        self.simple_key_allowed = true;
    }

    fn disallow_simple_key(&mut self) {
        self.simple_key_allowed = false;
    }

    fn increase_flow_level(&mut self) {
        self.simple_keys.push(SimpleKey::new(Marker::new(0, 1, 0)));
        self.flow_level += 1;
    }

    fn decrease_flow_level(&mut self) {
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
    }

    /// Open a new block collection if the given column is deeper than the current indentation.
    ///
    /// If `number` is given, the collection-start token is inserted at that position in the queue
    /// rather than appended, so that it lands in front of a retroactively inserted `Key`.
    fn roll_indent(&mut self, col: usize, number: Option<usize>, tok: TokenType, mark: Marker) {
        if self.flow_level > 0 {
            return;
        }
        if self.indent < col as isize {
            self.indents.push(self.indent);
            self.indent = col as isize;
            let token = Token(Span::empty(mark), tok);
            match number {
                Some(n) => self.tokens.insert(n - self.tokens_parsed, token),
                None => self.tokens.push_back(token),
            }
        }
    }

    /// Close block collections whose indentation is deeper than the given column.
    fn unroll_indent(&mut self, col: isize) {
        if self.flow_level > 0 {
            return;
        }
        while self.indent > col {
            self.indent = self.indents.pop().unwrap_or(-1);
            self.tokens
                .push_back(Token(Span::empty(self.mark), TokenType::BlockEnd));
        }
    }

    fn fetch_stream_start(&mut self) {
        let mark = self.mark;
        self.indent = -1;
        self.stream_start_produced = true;
        self.allow_simple_key();
        self.simple_keys.push(SimpleKey::new(mark));
        self.tokens
            .push_back(Token(Span::empty(mark), TokenType::StreamStart));
    }

    fn fetch_stream_end(&mut self) -> ScanResult {
        // force new line
        if self.mark.col != 0 {
            self.mark.col = 0;
            self.mark.line += 1;
        }
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();
        self.tokens
            .push_back(Token(Span::empty(self.mark), TokenType::StreamEnd));
        Ok(())
    }

    fn fetch_directive(&mut self) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();
        if let Some(tok) = self.scan_directive()? {
            self.tokens.push_back(tok);
        }
        Ok(())
    }

    fn fetch_document_indicator(&mut self, t: TokenType) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.disallow_simple_key();
        let start = self.mark;
        self.skip_n_chars(3);
        self.tokens.push_back(Token(Span::new(start, self.mark), t));
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, t: TokenType) -> ScanResult {
        // a flow collection may itself be a mapping key
        self.save_simple_key()?;
        self.increase_flow_level();
        let start = self.mark;
        self.skip_char();
        self.allow_simple_key();
        self.tokens.push_back(Token(Span::new(start, self.mark), t));
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, t: TokenType) -> ScanResult {
        self.remove_simple_key()?;
        self.decrease_flow_level();
        self.disallow_simple_key();
        let start = self.mark;
        self.skip_char();
        self.tokens.push_back(Token(Span::new(start, self.mark), t));
        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> ScanResult {
        self.remove_simple_key()?;
        self.allow_simple_key();
        let start = self.mark;
        self.skip_char();
        self.tokens
            .push_back(Token(Span::new(start, self.mark), TokenType::FlowEntry));
        Ok(())
    }

    fn fetch_block_entry(&mut self) -> ScanResult {
        if self.flow_level > 0 {
            return Err(ScanError::new(
                self.mark,
                "block sequence entries are not allowed in flow context",
            ));
        }
        if !self.simple_key_allowed {
            return Err(ScanError::new(
                self.mark,
                "block sequence entries are not allowed in this context",
            ));
        }
        let mark = self.mark;
        self.roll_indent(mark.col, None, TokenType::BlockSequenceStart, mark);
        self.remove_simple_key()?;
        self.allow_simple_key();
        self.skip_char();
        self.tokens
            .push_back(Token(Span::new(mark, self.mark), TokenType::BlockEntry));
        Ok(())
    }

    fn fetch_key(&mut self) -> ScanResult {
        let start = self.mark;
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(ScanError::new(
                    start,
                    "mapping keys are not allowed in this context",
                ));
            }
            self.roll_indent(start.col, None, TokenType::BlockMappingStart, start);
        }
        self.remove_simple_key()?;
        if self.flow_level == 0 {
            self.allow_simple_key();
        } else {
            self.disallow_simple_key();
        }
        self.skip_char();
        self.tokens
            .push_back(Token(Span::new(start, self.mark), TokenType::Key));
        Ok(())
    }

    fn fetch_value(&mut self) -> ScanResult {
        let sk = self.simple_keys.last().unwrap().clone();
        let start = self.mark;
        if sk.possible {
            // insert the `Key` token in front of the saved key content
            let tok = Token(Span::empty(sk.mark), TokenType::Key);
            self.tokens.insert(sk.token_number - self.tokens_parsed, tok);
            self.roll_indent(
                sk.mark.col,
                Some(sk.token_number),
                TokenType::BlockMappingStart,
                sk.mark,
            );
            self.simple_keys.last_mut().unwrap().possible = false;
            self.disallow_simple_key();
        } else {
            if self.flow_level == 0 {
                if !self.simple_key_allowed {
                    return Err(ScanError::new(
                        start,
                        "mapping values are not allowed in this context",
                    ));
                }
                self.roll_indent(start.col, None, TokenType::BlockMappingStart, start);
            }
            if self.flow_level == 0 {
                self.allow_simple_key();
            } else {
                self.disallow_simple_key();
            }
        }
        self.skip_char();
        self.tokens
            .push_back(Token(Span::new(start, self.mark), TokenType::Value));
        Ok(())
    }

    fn fetch_anchor(&mut self, alias: bool) -> ScanResult {
        self.save_simple_key()?;
        self.disallow_simple_key();
        let start = self.mark;
        self.skip_char(); // `*' or `&'
        let mut name = String::new();
        while is_anchor_char(self.input.look_ch()) {
            name.push(self.input.peek());
            self.skip_char();
        }
        if name.is_empty() {
            return Err(ScanError::new(
                start,
                "while scanning an anchor or alias, did not find expected alphabetic or numeric character",
            ));
        }
        let tok = if alias {
            TokenType::Alias(name)
        } else {
            TokenType::Anchor(name)
        };
        self.tokens.push_back(Token(Span::new(start, self.mark), tok));
        Ok(())
    }

    fn fetch_tag(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.disallow_simple_key();
        let tok = self.scan_tag()?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn scan_tag(&mut self) -> Result<Token, ScanError> {
        let start = self.mark;
        let mut handle = String::new();
        let mut suffix = String::new();
        self.input.lookahead(2);
        if self.input.peek_nth(1) == '<' {
            // verbatim tag: `!<uri>'
            self.skip_n_chars(2);
            while self.input.look_ch() != '>' {
                if is_blank_or_breakz(self.input.peek()) {
                    return Err(ScanError::new(
                        start,
                        "while scanning a verbatim tag, did not find expected '>'",
                    ));
                }
                suffix.push(self.input.peek());
                self.skip_char();
            }
            self.skip_char(); // `>'
        } else {
            handle.push('!');
            self.skip_char();
            if self.input.look_ch() == '!' {
                handle.push('!');
                self.skip_char();
            }
            loop {
                let c = self.input.look_ch();
                if is_tag_char(c) {
                    suffix.push(c);
                    self.skip_char();
                } else if c == '!'
                    && handle == "!"
                    && !suffix.is_empty()
                    && suffix.chars().all(char::is_alphanumeric)
                {
                    // a named handle, `!name!suffix'
                    handle = format!("!{suffix}!");
                    suffix.clear();
                    self.skip_char();
                } else {
                    break;
                }
            }
            if handle == "!" && suffix.is_empty() {
                // the non-specific `!' tag
                handle.clear();
                suffix.push('!');
            }
        }
        let c = self.input.look_ch();
        if !is_blank_or_breakz(c) && !(self.flow_level > 0 && is_flow(c)) {
            return Err(ScanError::new(
                start,
                "while scanning a tag, did not find expected whitespace or line break",
            ));
        }
        Ok(Token(
            Span::new(start, self.mark),
            TokenType::Tag(handle, suffix),
        ))
    }

    fn scan_directive(&mut self) -> Result<Option<Token>, ScanError> {
        let start = self.mark;
        self.skip_char(); // `%'
        let mut name = String::new();
        while self.input.look_ch().is_ascii_alphanumeric() || self.input.peek() == '-' {
            name.push(self.input.peek());
            self.skip_char();
        }
        let tok = match name.as_str() {
            "YAML" => Some(self.scan_version_directive_value(start)?),
            "TAG" => Some(self.scan_tag_directive_value(start)?),
            // unknown directives are skipped
            _ => {
                while !is_breakz(self.input.look_ch()) {
                    self.skip_char();
                }
                None
            }
        };
        while is_blank(self.input.look_ch()) {
            self.skip_char();
        }
        if self.input.peek() == '#' {
            while !is_breakz(self.input.look_ch()) {
                self.skip_char();
            }
        }
        if !is_breakz(self.input.peek()) {
            return Err(ScanError::new(
                start,
                "while scanning a directive, did not find expected comment or line break",
            ));
        }
        if is_break(self.input.peek()) {
            self.input.lookahead(2);
            self.skip_linebreak();
        }
        Ok(tok.map(|t| Token(Span::new(start, self.mark), t)))
    }

    fn scan_version_directive_value(&mut self, start: Marker) -> Result<TokenType, ScanError> {
        while is_blank(self.input.look_ch()) {
            self.skip_char();
        }
        let major = self.scan_version_directive_number(start)?;
        if self.input.peek() != '.' {
            return Err(ScanError::new(
                start,
                "while scanning a YAML directive, did not find expected digit or '.' character",
            ));
        }
        self.skip_char();
        let minor = self.scan_version_directive_number(start)?;
        Ok(TokenType::VersionDirective(major, minor))
    }

    fn scan_version_directive_number(&mut self, start: Marker) -> Result<u32, ScanError> {
        let mut val = 0u32;
        let mut digits = 0usize;
        while let Some(digit) = self.input.look_ch().to_digit(10) {
            digits += 1;
            if digits > 9 {
                return Err(ScanError::new(
                    start,
                    "while scanning a YAML directive, found extremely long version number",
                ));
            }
            val = val * 10 + digit;
            self.skip_char();
        }
        if digits == 0 {
            return Err(ScanError::new(
                start,
                "while scanning a YAML directive, did not find expected version number",
            ));
        }
        Ok(val)
    }

    fn scan_tag_directive_value(&mut self, start: Marker) -> Result<TokenType, ScanError> {
        while is_blank(self.input.look_ch()) {
            self.skip_char();
        }
        if self.input.peek() != '!' {
            return Err(ScanError::new(
                start,
                "while scanning a TAG directive, did not find expected tag handle",
            ));
        }
        let mut handle = String::from("!");
        self.skip_char();
        while self.input.look_ch().is_ascii_alphanumeric() {
            handle.push(self.input.peek());
            self.skip_char();
        }
        if self.input.peek() == '!' {
            handle.push('!');
            self.skip_char();
        }
        if !is_blank(self.input.look_ch()) {
            return Err(ScanError::new(
                start,
                "while scanning a TAG directive, did not find expected whitespace after tag handle",
            ));
        }
        while is_blank(self.input.look_ch()) {
            self.skip_char();
        }
        let mut prefix = String::new();
        while !is_blank_or_breakz(self.input.look_ch()) {
            prefix.push(self.input.peek());
            self.skip_char();
        }
        if prefix.is_empty() {
            return Err(ScanError::new(
                start,
                "while scanning a TAG directive, did not find expected tag prefix",
            ));
        }
        Ok(TokenType::TagDirective(handle, prefix))
    }

    fn fetch_block_scalar(&mut self, literal: bool) -> ScanResult {
        self.remove_simple_key()?;
        self.allow_simple_key();
        let tok = self.scan_block_scalar(literal)?;
        self.tokens.push_back(tok);
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn scan_block_scalar(&mut self, literal: bool) -> Result<Token, ScanError> {
        let start = self.mark;
        self.skip_char(); // `|' or `>'

        // header: indentation indicator and chomping indicator, in either order
        let mut chomping = 0i32;
        let mut increment = 0usize;
        self.input.lookahead(2);
        let c = self.input.peek();
        if c == '+' || c == '-' {
            chomping = if c == '+' { 1 } else { -1 };
            self.skip_char();
            if let Some(digit) = self.input.look_ch().to_digit(10) {
                if digit == 0 {
                    return Err(ScanError::new(
                        start,
                        "while scanning a block scalar, found an indentation indicator equal to 0",
                    ));
                }
                increment = digit as usize;
                self.skip_char();
            }
        } else if let Some(digit) = c.to_digit(10) {
            if digit == 0 {
                return Err(ScanError::new(
                    start,
                    "while scanning a block scalar, found an indentation indicator equal to 0",
                ));
            }
            increment = digit as usize;
            self.skip_char();
            let c = self.input.look_ch();
            if c == '+' || c == '-' {
                chomping = if c == '+' { 1 } else { -1 };
                self.skip_char();
            }
        }

        // eat whitespace and comment until the end of the line
        while is_blank(self.input.look_ch()) {
            self.skip_char();
        }
        if self.input.peek() == '#' {
            while !is_breakz(self.input.look_ch()) {
                self.skip_char();
            }
        }
        if !is_breakz(self.input.peek()) {
            return Err(ScanError::new(
                self.mark,
                "while scanning a block scalar, did not find expected comment or line break",
            ));
        }
        if is_break(self.input.peek()) {
            self.input.lookahead(2);
            self.skip_linebreak();
        }

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut leading_blank = false;
        let mut indent: usize = if increment > 0 {
            if self.indent >= 0 {
                self.indent as usize + increment
            } else {
                increment
            }
        } else {
            0 // auto-detect from the first non-empty line
        };
        let mut max_indent = 0usize;

        self.block_scalar_breaks(&mut indent, &mut trailing_breaks, &mut max_indent)?;
        if increment == 0 {
            let min_indent = if self.indent < 0 {
                1
            } else {
                self.indent as usize + 1
            };
            indent = max_indent.max(min_indent);
        }

        while self.mark.col == indent && !is_z(self.input.look_ch()) {
            // fold a single break between two non-more-indented lines into a space; keep
            // every break literal otherwise
            let trailing_blank = is_blank(self.input.peek());
            if !literal && leading_break == "\n" && !leading_blank && !trailing_blank {
                if trailing_breaks.is_empty() {
                    string.push(' ');
                } else {
                    string.push_str(&trailing_breaks);
                }
            } else {
                string.push_str(&leading_break);
                string.push_str(&trailing_breaks);
            }
            leading_break.clear();
            trailing_breaks.clear();
            leading_blank = is_blank(self.input.peek());

            while !is_breakz(self.input.look_ch()) {
                string.push(self.input.peek());
                self.skip_char();
            }
            if is_z(self.input.peek()) {
                break;
            }
            self.read_break(&mut leading_break);
            self.block_scalar_breaks(&mut indent, &mut trailing_breaks, &mut max_indent)?;
        }

        match chomping {
            -1 => {}
            0 => {
                if !leading_break.is_empty() {
                    string.push('\n');
                }
            }
            _ => {
                string.push_str(&leading_break);
                string.push_str(&trailing_breaks);
            }
        }

        let style = if literal {
            TScalarStyle::Literal
        } else {
            TScalarStyle::Folded
        };
        Ok(Token(
            Span::new(start, self.mark),
            TokenType::Scalar(style, string),
        ))
    }

    /// Consume the indentation and blank lines between two lines of a block scalar.
    ///
    /// While `indent` is still 0 (auto-detection), all leading spaces are consumed and the
    /// maximum indentation seen is recorded into `max_indent`.
    fn block_scalar_breaks(
        &mut self,
        indent: &mut usize,
        breaks: &mut String,
        max_indent: &mut usize,
    ) -> ScanResult {
        loop {
            while (*indent == 0 || self.mark.col < *indent) && self.input.look_ch() == ' ' {
                self.skip_char();
            }
            if self.mark.col > *max_indent {
                *max_indent = self.mark.col;
            }
            if (*indent == 0 || self.mark.col < *indent) && self.input.look_ch() == '\t' {
                return Err(ScanError::new(
                    self.mark,
                    "while scanning a block scalar, found a tab character where an indentation space is expected",
                ));
            }
            if !is_break(self.input.peek()) {
                return Ok(());
            }
            self.read_break(breaks);
        }
    }

    fn fetch_flow_scalar(&mut self, single: bool) -> ScanResult {
        self.save_simple_key()?;
        self.disallow_simple_key();
        let tok = self.scan_flow_scalar(single)?;
        self.tokens.push_back(tok);
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn scan_flow_scalar(&mut self, single: bool) -> Result<Token, ScanError> {
        let start = self.mark;
        self.skip_char(); // opening quote
        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks = false;
        loop {
            self.input.lookahead(4);
            if self.mark.col == 0 && self.input.next_is_document_indicator() {
                return Err(ScanError::new(
                    start,
                    "while scanning a quoted scalar, found unexpected document indicator",
                ));
            }
            if is_z(self.input.peek()) {
                return Err(ScanError::new(
                    start,
                    "while scanning a quoted scalar, found unexpected end of stream",
                ));
            }
            if !is_blank_or_breakz(self.input.peek()) {
                // commit pending folded breaks or whitespace before this content chunk
                if leading_blanks {
                    if trailing_breaks.is_empty() {
                        string.push(' ');
                    } else {
                        string.push_str(&trailing_breaks);
                    }
                    leading_break.clear();
                    trailing_breaks.clear();
                    leading_blanks = false;
                } else if !whitespaces.is_empty() {
                    string.push_str(&whitespaces);
                    whitespaces.clear();
                }
                loop {
                    self.input.lookahead(2);
                    let c = self.input.peek();
                    if is_blank_or_breakz(c) {
                        break;
                    }
                    if single && c == '\'' && self.input.peek_nth(1) == '\'' {
                        // `''' is the escaped single quote
                        string.push('\'');
                        self.skip_n_chars(2);
                        continue;
                    }
                    if (single && c == '\'') || (!single && c == '"') {
                        // closing quote
                        self.skip_char();
                        let style = if single {
                            TScalarStyle::SingleQuoted
                        } else {
                            TScalarStyle::DoubleQuoted
                        };
                        return Ok(Token(
                            Span::new(start, self.mark),
                            TokenType::Scalar(style, string),
                        ));
                    }
                    if !single && c == '\\' {
                        if is_break(self.input.peek_nth(1)) {
                            // escaped line break: lines are joined without a space
                            self.skip_char();
                            self.input.lookahead(2);
                            self.skip_linebreak();
                            while is_blank(self.input.look_ch()) {
                                self.skip_char();
                            }
                            break;
                        }
                        self.scan_double_quoted_escape(&mut string)?;
                        continue;
                    }
                    string.push(c);
                    self.skip_char();
                }
            }
            // blanks and breaks; a single break folds into a space
            loop {
                let c = self.input.look_ch();
                if is_blank(c) {
                    if !leading_blanks {
                        whitespaces.push(c);
                    }
                    self.skip_char();
                } else if is_break(c) {
                    self.input.lookahead(2);
                    if leading_blanks {
                        self.read_break(&mut trailing_breaks);
                    } else {
                        whitespaces.clear();
                        self.read_break(&mut leading_break);
                        leading_blanks = true;
                    }
                } else {
                    break;
                }
            }
        }
    }

    fn scan_double_quoted_escape(&mut self, string: &mut String) -> ScanResult {
        let start = self.mark;
        self.skip_char(); // `\'
        let c = self.input.look_ch();
        let mut code_length = 0usize;
        match c {
            '0' => string.push('\0'),
            'a' => string.push('\x07'),
            'b' => string.push('\x08'),
            't' | '\t' => string.push('\t'),
            'n' => string.push('\n'),
            'v' => string.push('\x0b'),
            'f' => string.push('\x0c'),
            'r' => string.push('\r'),
            'e' => string.push('\x1b'),
            ' ' => string.push(' '),
            '"' => string.push('"'),
            '\'' => string.push('\''),
            '/' => string.push('/'),
            '\\' => string.push('\\'),
            'N' => string.push('\u{0085}'),
            '_' => string.push('\u{00a0}'),
            'L' => string.push('\u{2028}'),
            'P' => string.push('\u{2029}'),
            'x' => code_length = 2,
            'u' => code_length = 4,
            'U' => code_length = 8,
            _ => {
                return Err(ScanError::new(
                    start,
                    "while parsing a quoted scalar, found unknown escape character",
                ))
            }
        }
        self.skip_char();
        if code_length > 0 {
            self.input.lookahead(code_length);
            let mut value = 0u32;
            for i in 0..code_length {
                let Some(digit) = self.input.peek_nth(i).to_digit(16) else {
                    return Err(ScanError::new(
                        start,
                        "while parsing a quoted scalar, did not find expected hexadecimal number",
                    ));
                };
                value = (value << 4) + digit;
            }
            let Some(ch) = char::from_u32(value) else {
                return Err(ScanError::new(
                    start,
                    "while parsing a quoted scalar, found invalid Unicode character escape",
                ));
            };
            string.push(ch);
            self.skip_n_chars(code_length);
        }
        Ok(())
    }

    fn fetch_plain_scalar(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.disallow_simple_key();
        let tok = self.scan_plain_scalar()?;
        self.tokens.push_back(tok);
        Ok(())
    }

    fn scan_plain_scalar(&mut self) -> Result<Token, ScanError> {
        let indent = self.indent + 1;
        let start = self.mark;
        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks = false;
        'outer: loop {
            self.input.lookahead(4);
            if self.mark.col == 0 && self.input.next_is_document_indicator() {
                break;
            }
            let c = self.input.peek();
            if is_z(c) || c == '#' {
                // a comment here is always preceded by whitespace
                break;
            }
            loop {
                self.input.lookahead(2);
                let c = self.input.peek();
                if is_blank_or_breakz(c) {
                    break;
                }
                if c == ':'
                    && (is_blank_or_breakz(self.input.peek_nth(1))
                        || (self.flow_level > 0 && is_flow(self.input.peek_nth(1))))
                {
                    break 'outer;
                }
                if self.flow_level > 0 && is_flow(c) {
                    break 'outer;
                }
                // about to take content: commit pending folded breaks or whitespace first, so
                // that whitespace before a terminating `:' never reaches the scalar
                if leading_blanks {
                    if trailing_breaks.is_empty() {
                        string.push(' ');
                    } else {
                        string.push_str(&trailing_breaks);
                    }
                    leading_break.clear();
                    trailing_breaks.clear();
                    leading_blanks = false;
                } else if !whitespaces.is_empty() {
                    string.push_str(&whitespaces);
                    whitespaces.clear();
                }
                string.push(c);
                self.skip_char();
            }
            // blanks and breaks
            loop {
                let c = self.input.look_ch();
                if is_blank(c) {
                    if leading_blanks && (self.mark.col as isize) < indent && c == '\t' {
                        return Err(ScanError::new(
                            start,
                            "while scanning a plain scalar, found a tab character that violates indentation",
                        ));
                    }
                    if !leading_blanks {
                        whitespaces.push(c);
                    }
                    self.skip_char();
                } else if is_break(c) {
                    self.input.lookahead(2);
                    if leading_blanks {
                        self.read_break(&mut trailing_breaks);
                    } else {
                        whitespaces.clear();
                        self.read_break(&mut leading_break);
                        leading_blanks = true;
                    }
                } else {
                    break;
                }
            }
            // a plain scalar in block context ends on the first less-indented line
            if self.flow_level == 0 && (self.mark.col as isize) < indent {
                break;
            }
        }
        // the scalar swallowed the line break; a simple key may start on the next line
        if leading_blanks {
            self.allow_simple_key();
            self.leading_whitespace = true;
        }
        Ok(Token(
            Span::new(start, self.mark),
            TokenType::Scalar(TScalarStyle::Plain, string),
        ))
    }

    /// Consume one non-break character, updating the position.
    fn skip_char(&mut self) {
        self.mark.index += 1;
        self.mark.col += 1;
        self.input.skip();
    }

    /// Consume `count` non-break characters.
    fn skip_n_chars(&mut self, count: usize) {
        self.mark.index += count;
        self.mark.col += count;
        self.input.skip_n(count);
    }

    /// Consume a line break. `\r\n` counts as a single break.
    ///
    /// The caller must have called `lookahead(2)` beforehand.
    fn skip_linebreak(&mut self) {
        if self.input.peek() == '\r' && self.input.peek_nth(1) == '\n' {
            self.mark.index += 2;
            self.input.skip_n(2);
        } else {
            self.mark.index += 1;
            self.input.skip();
        }
        self.mark.col = 0;
        self.mark.line += 1;
    }

    /// Consume a line break and push a normalized `\n` onto `out`.
    fn read_break(&mut self, out: &mut String) {
        self.input.lookahead(2);
        self.skip_linebreak();
        out.push('\n');
    }
}
