use bounded_static::ToStatic;
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;
use thiserror::Error;

/// Errors raised by the cursor primitives.
///
/// These signal caller misuse (an oversized input, a seek outside the
/// input, consuming past the end); the grammar never produces them when
/// driving the cursor through saved offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("input exceeds the maximum length of {max} codepoints")]
    InputTooLarge { max: usize },
    #[error("offset {offset} is outside the input of {len} bytes")]
    OutOfBounds { offset: usize, len: usize },
    #[error("cannot accept a codepoint at end of input")]
    AcceptEndOfInput,
}

/// A codepoint-level window over an immutable UTF-8 input.
///
/// The cursor exposes the current codepoint, one codepoint of lookahead,
/// and absolute seeks to previously observed offsets. Offsets are byte
/// positions into the input so that a saved offset always restores
/// exactly, including across codepoints above the BMP.
///
/// The position is interior-mutable: productions and transactions share
/// one cursor through `&Cursor`. End of input is signalled by `None`
/// from [`Cursor::cur`]; the cursor never reads past the input.
pub struct Cursor<'a> {
    input: &'a str,
    ofs: Cell<usize>,
}

impl<'a> Cursor<'a> {
    /// Open a cursor at offset 0, refusing inputs longer than `max_len`
    /// codepoints.
    pub fn new(input: &'a str, max_len: usize) -> Result<Self, CursorError> {
        if input.chars().count() > max_len {
            return Err(CursorError::InputTooLarge { max: max_len });
        }
        Ok(Self {
            input,
            ofs: Cell::new(0),
        })
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.ofs.get()
    }

    /// Codepoint at the current offset, `None` at end of input.
    pub fn cur(&self) -> Option<char> {
        self.input[self.ofs.get()..].chars().next()
    }

    /// Codepoint after the current one, `None` when fewer than two remain.
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.input[self.ofs.get()..].chars();
        chars.next();
        chars.next()
    }

    /// Absolute seek to a previously observed offset.
    pub fn jmp(&self, offset: usize) -> Result<(), CursorError> {
        if offset > self.input.len() || !self.input.is_char_boundary(offset) {
            return Err(CursorError::OutOfBounds {
                offset,
                len: self.input.len(),
            });
        }
        self.ofs.set(offset);
        Ok(())
    }

    /// Consume the current codepoint and return the one that takes its
    /// place (`None` when the end of input is reached).
    pub fn accept(&self) -> Result<Option<char>, CursorError> {
        let c = self.cur().ok_or(CursorError::AcceptEndOfInput)?;
        self.ofs.set(self.ofs.get() + c.len_utf8());
        Ok(self.cur())
    }

    /// Advance while `pred(cur, peek)` holds and return the first
    /// non-matching codepoint (`None` when the input is exhausted).
    pub fn skip<P>(&self, pred: P) -> Option<char>
    where
        P: Fn(char, Option<char>) -> bool,
    {
        while let Some(c) = self.cur() {
            if !pred(c, self.peek()) {
                return Some(c);
            }
            self.ofs.set(self.ofs.get() + c.len_utf8());
        }
        None
    }

    /// Borrowed slice of the input over the byte range `[start, end)`.
    /// Both bounds must be previously observed offsets.
    pub fn slice(&self, start: usize, end: usize) -> Substring<'a> {
        let input: &'a str = self.input;
        Substring {
            start,
            end,
            text: Cow::Borrowed(&input[start..end]),
        }
    }

    // Restore an offset previously returned by `pos`.
    pub(crate) fn restore(&self, offset: usize) {
        self.ofs.set(offset);
    }
}

/// A slice of the parsed input: byte range plus materialised text.
///
/// Equality compares the text only; the range records where in the
/// original input the text came from and is informational. This keeps
/// canonical round-trips (`parse(node.to_string())`) structurally equal
/// to the original node even when the original input carried comments
/// or folding whitespace.
#[derive(Clone, ToStatic)]
pub struct Substring<'a> {
    pub start: usize,
    pub end: usize,
    pub text: Cow<'a, str>,
}

impl<'a> Substring<'a> {
    pub(crate) fn owned(start: usize, end: usize, text: String) -> Self {
        Self {
            start,
            end,
            text: Cow::Owned(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the text in octets (UTF-8).
    pub fn octets(&self) -> usize {
        self.text.len()
    }
}

impl PartialEq for Substring<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}
impl Eq for Substring<'_> {}

impl fmt::Display for Substring<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&self.text)
    }
}

impl fmt::Debug for Substring<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Substring")
            .field(&format_args!("\"{}\" [{}..{}]", self.text, self.start, self.end))
            .finish()
    }
}
