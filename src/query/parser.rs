//! Parser for one line of `cscope -L` output.
//!
//! Lines have the shape `<file> <scope> <line> <context...>`. Fields are
//! taken in that order, each up to the next single space, and the context
//! runs to the end of the line. Every field has a fixed capacity; input past
//! the capacity is skipped rather than rejected, and the record is flagged
//! as truncated.
//!
//! The file field is kept as raw bytes so it can be joined onto the index
//! directory unchanged. Scope and context are decoded for display; the
//! decoded text never exceeds the field's byte capacity.

use super::types::QueryRecord;
use std::path::PathBuf;

/// File field capacity, including the terminator slot (1023 usable bytes)
pub const FILE_CAPACITY: usize = 1024;
/// Scope field capacity, including the terminator slot (255 usable bytes)
pub const SCOPE_CAPACITY: usize = 256;
/// Maximum digits collected for the line number
pub const LINE_DIGITS: usize = 7;
/// Context field capacity; an overflowing context keeps `CONTEXT_CAPACITY - 2` bytes
pub const CONTEXT_CAPACITY: usize = 1024;

/// Parse a single output line into a record.
///
/// Never fails: a short or malformed line yields empty fields and a zero
/// line number for whatever is missing.
pub fn parse_line(line: &[u8]) -> QueryRecord {
    let mut scanner = LineScanner::new(line);

    let (file, file_cut) = scanner.field(FILE_CAPACITY - 1);
    let (scope, scope_cut) = scanner.field(SCOPE_CAPACITY - 1);
    // Digits past the seventh are dropped without flagging, like any
    // non-digit tail of the number.
    let (digits, _) = scanner.field(LINE_DIGITS);
    let (context, context_cut) = scanner.rest(CONTEXT_CAPACITY);

    let (symbol_scope, scope_shrunk) = decode_bounded(scope, SCOPE_CAPACITY - 1);
    let (context, context_shrunk) = decode_bounded(context, CONTEXT_CAPACITY - 1);

    QueryRecord {
        file: path_from_bytes(file),
        symbol_scope,
        line: parse_line_number(digits),
        context,
        truncated: file_cut || scope_cut || context_cut || scope_shrunk || context_shrunk,
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Decode `bytes` lossily, then cut back to a char boundary if replacement
/// characters pushed the text past `max` bytes. Returns whether it was cut.
fn decode_bounded(bytes: &[u8], max: usize) -> (String, bool) {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() <= max {
        return (text, false);
    }

    let mut cut = max;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    (text, true)
}

/// atoi-style conversion: optional leading blanks and `+`, then leading
/// digits. Anything else, including a `-` sign, yields 0.
fn parse_line_number(digits: &[u8]) -> u32 {
    let digits = digits.trim_ascii_start();
    let digits = digits.strip_prefix(b"+").unwrap_or(digits);

    digits
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .fold(0u32, |n, b| n * 10 + u32::from(b - b'0'))
}

/// Forward-only cursor over a line
struct LineScanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> LineScanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Take bytes up to the next space (or end of input), keeping at most
    /// `max` of them. The cursor always moves past the whole token and its
    /// delimiter. Returns the kept bytes and whether any were dropped.
    fn field(&mut self, max: usize) -> (&'a [u8], bool) {
        let remaining = &self.input[self.pos..];
        let len = memchr::memchr(b' ', remaining).unwrap_or(remaining.len());
        let token = &remaining[..len];

        self.pos += len;
        if self.pos < self.input.len() {
            self.pos += 1;
        }

        if token.len() > max {
            (&token[..max], true)
        } else {
            (token, false)
        }
    }

    /// Take the remainder up to a newline, NUL or end of input.
    ///
    /// At most `capacity - 1` bytes fit. On overflow the field is cut one
    /// byte short of that, at `capacity - 2`.
    fn rest(&mut self, capacity: usize) -> (&'a [u8], bool) {
        let remaining = &self.input[self.pos..];
        let len = memchr::memchr2(b'\n', b'\0', remaining).unwrap_or(remaining.len());
        let text = &remaining[..len];

        self.pos = self.input.len();

        if text.len() > capacity - 1 {
            (&text[..capacity - 2], true)
        } else {
            (text, false)
        }
    }
}
