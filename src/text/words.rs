//! Atoms, dot-atoms, words and phrases (RFC 5322 §3.2.3, §3.2.5).

use crate::cursor::{Cursor, Substring};
use crate::text::{ascii, classes};
use crate::text::quoted::quoted_string;
use crate::text::whitespace::cfws;
use crate::transaction::Transaction;

/// Atom
///
/// ```abnf
/// atom = [CFWS] 1*atext [CFWS]
/// ```
pub fn atom<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let txn = Transaction::new(cur);
    let _ = cfws(cur);
    let start = cur.pos();
    if !cur.cur().is_some_and(|c| classes::is(c, classes::ATEXT)) {
        return None;
    }
    cur.skip(|c, _| classes::is(c, classes::ATEXT));
    let end = cur.pos();
    let _ = cfws(cur);
    Some(txn.accept(cur.slice(start, end)))
}

/// dot-atom-text
///
/// ```abnf
/// dot-atom-text = 1*atext *("." 1*atext)
/// ```
///
/// A dot is consumed only when the codepoint after it is atext again, so
/// `a.` leaves the cursor on the dot.
pub fn dot_atom_text<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let start = cur.pos();
    if !cur.cur().is_some_and(|c| classes::is(c, classes::ATEXT)) {
        return None;
    }
    cur.skip(|c, next| {
        classes::is(c, classes::ATEXT)
            || (c == ascii::PERIOD && next.is_some_and(|n| classes::is(n, classes::ATEXT)))
    });
    Some(cur.slice(start, cur.pos()))
}

/// dot-atom
///
/// ```abnf
/// dot-atom = [CFWS] dot-atom-text [CFWS]
/// ```
pub fn dot_atom<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let txn = Transaction::new(cur);
    let _ = cfws(cur);
    let text = dot_atom_text(cur)?;
    let _ = cfws(cur);
    Some(txn.accept(text))
}

/// word = atom / quoted-string
pub fn word<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    if let Some(a) = atom(cur) {
        return Some(a);
    }
    quoted_string(cur)
}

/// A non-empty sequence of words; the raw material of a display name.
pub struct Phrase<'a>(pub Vec<Substring<'a>>);

/// phrase = 1*word
pub fn phrase<'a>(cur: &Cursor<'a>) -> Option<Phrase<'a>> {
    let mut words = Vec::new();
    while let Some(w) = word(cur) {
        words.push(w);
    }
    if words.is_empty() {
        None
    } else {
        Some(Phrase(words))
    }
}

impl<'a> Phrase<'a> {
    /// Collapse the phrase into a display label: words joined by a
    /// single space, quoted-string delimiters kept verbatim.
    pub fn to_label(&self) -> Substring<'a> {
        if self.0.len() == 1 {
            return self.0[0].clone();
        }
        let text = self
            .0
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Substring::owned(self.0[0].start, self.0[self.0.len() - 1].end, text)
    }
}
