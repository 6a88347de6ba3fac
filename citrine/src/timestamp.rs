//! The YAML 1.1 timestamp grammar.
//!
//! Three surface forms are recognized, all resolving to a [`Timestamp`]:
//!   - canonical: `2001-12-15T02:59:43.1Z`, with a `T` separator and a `Z` or numeric offset;
//!   - space-separated: `2001-12-14 21:59:43.10 -5`, with optional fractional seconds and a
//!     loosely formatted offset (`-5`, `-0500` and `-05:00` are all accepted);
//!   - date only: `2002-12-14`, which denotes midnight UTC of that day.
//!
//! When no time zone is given, the timestamp is assumed to be specified in UTC.

use chrono::{FixedOffset, NaiveDate, TimeZone};

use crate::yaml::Timestamp;

/// Parse a scalar as a YAML 1.1 timestamp.
///
/// # Return
/// Returns `Some` with the instant the timestamp denotes, or `None` when `v` does not match the
/// grammar. Like the rest of implicit resolution, failing to match is not an error.
#[must_use]
pub fn parse_timestamp(v: &str) -> Option<Timestamp> {
    let mut cur = Cursor::new(v);
    let year = cur.digits_exact(4)?;
    cur.expect('-')?;
    let month = cur.digits_up_to_2()?;
    cur.expect('-')?;
    let day = cur.digits_up_to_2()?;

    if cur.at_end() {
        // a bare date is midnight UTC
        let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return FixedOffset::east_opt(0)?.from_local_datetime(&midnight).single();
    }

    match cur.peek()? {
        'T' | 't' => cur.bump(),
        ' ' | '\t' => cur.skip_blanks(),
        _ => return None,
    }

    let hour = cur.digits_up_to_2()?;
    cur.expect(':')?;
    let minute = cur.digits_exact(2)?;
    cur.expect(':')?;
    let second = cur.digits_exact(2)?;

    let mut nanos = 0u32;
    if cur.peek() == Some('.') {
        cur.bump();
        let mut scale = 100_000_000u32;
        while let Some(d) = cur.peek().and_then(|c| c.to_digit(10)) {
            nanos += d * scale;
            scale /= 10;
            cur.bump();
            if scale == 0 {
                // further digits are below nanosecond precision
                while cur.peek().is_some_and(|c| c.is_ascii_digit()) {
                    cur.bump();
                }
                break;
            }
        }
    }

    cur.skip_blanks();
    let offset_seconds = match cur.peek() {
        // no time zone: UTC
        None => 0,
        Some('Z' | 'z') => {
            cur.bump();
            0
        }
        Some(sign @ ('+' | '-')) => {
            cur.bump();
            let hours = i32::try_from(cur.digits_up_to_2()?).ok()?;
            let minutes = if cur.peek() == Some(':') {
                cur.bump();
                i32::try_from(cur.digits_exact(2)?).ok()?
            } else if cur.peek().is_some_and(|c| c.is_ascii_digit()) {
                i32::try_from(cur.digits_exact(2)?).ok()?
            } else {
                0
            };
            let total = hours * 3600 + minutes * 60;
            if sign == '-' {
                -total
            } else {
                total
            }
        }
        Some(_) => return None,
    };
    if !cur.at_end() {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = date.and_hms_nano_opt(hour, minute, second, nanos)?;
    FixedOffset::east_opt(offset_seconds)?.from_local_datetime(&time).single()
}

/// A byte cursor over the ASCII timestamp grammar.
///
/// Multi-byte characters never match any of the grammar's character classes, so inspecting raw
/// bytes is safe here.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(v: &'a str) -> Cursor<'a> {
        Cursor {
            bytes: v.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.bytes.get(self.pos).map(|&b| b as char)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn expect(&mut self, c: char) -> Option<()> {
        if self.peek() == Some(c) {
            self.bump();
            Some(())
        } else {
            None
        }
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    /// Read exactly `n` digits.
    fn digits_exact(&mut self, n: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..n {
            let d = self.peek()?.to_digit(10)?;
            value = value * 10 + d;
            self.bump();
        }
        Some(value)
    }

    /// Read one or two digits.
    fn digits_up_to_2(&mut self) -> Option<u32> {
        let mut value = self.peek()?.to_digit(10)?;
        self.bump();
        if let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value * 10 + d;
            self.bump();
        }
        Some(value)
    }
}
