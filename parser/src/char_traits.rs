//! Holds functions to determine if a character belongs to a specific character set.

/// Check whether the character is nil (`\0`).
///
/// The scanner uses `\0` as a sentinel for the end of the input.
#[inline]
pub(crate) fn is_z(c: char) -> bool {
    c == '\0'
}

/// Check whether the character is a line break (`\n` or `\r`).
#[inline]
pub(crate) fn is_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Check whether the character is nil or a line break.
#[inline]
pub(crate) fn is_breakz(c: char) -> bool {
    is_break(c) || is_z(c)
}

/// Check whether the character is a whitespace (` ` or `\t`).
#[inline]
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Check whether the character is nil, a line break or a whitespace.
#[inline]
pub(crate) fn is_blank_or_breakz(c: char) -> bool {
    is_blank(c) || is_breakz(c)
}

/// Check whether the character is a flow indicator.
#[inline]
pub(crate) fn is_flow(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// Check whether the character may be part of an anchor or alias name.
#[inline]
pub(crate) fn is_anchor_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Check whether the character may appear in a tag shorthand suffix or a tag
/// directive prefix.
#[inline]
pub(crate) fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '%' | ';'
                | '/'
                | '?'
                | ':'
                | '@'
                | '&'
                | '='
                | '+'
                | '$'
                | '_'
                | '.'
                | '~'
                | '*'
                | '\''
                | '('
                | ')'
                | '-'
        )
}
