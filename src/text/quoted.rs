//! Quoted strings (RFC 5322 §3.2.4).

use crate::cursor::{Cursor, Substring};
use crate::text::{ascii, classes};
use crate::text::whitespace::{cfws, fws};
use crate::transaction::Transaction;

/// Quoted pair
///
/// ```abnf
/// quoted-pair = "\" (VCHAR / WSP)
/// ```
///
/// The escaped codepoint must be printable US-ASCII (0x20..0x7E) or HT.
pub fn quoted_pair(cur: &Cursor) -> Option<char> {
    let txn = Transaction::new(cur);
    if cur.cur() != Some(ascii::BACKSLASH) {
        return None;
    }
    cur.accept().ok()?;
    let c = cur.cur()?;
    if !(('\x20'..='\x7e').contains(&c) || c == ascii::HT) {
        return None;
    }
    cur.accept().ok()?;
    Some(txn.accept(c))
}

/// qcontent = qtext / quoted-pair
fn qcontent(cur: &Cursor) -> Option<()> {
    let c = cur.cur()?;
    if classes::is(c, classes::QTEXT) {
        cur.skip(|c, _| classes::is(c, classes::QTEXT));
        return Some(());
    }
    if c == ascii::BACKSLASH {
        return quoted_pair(cur).map(|_| ());
    }
    None
}

/// Quoted string
///
/// ```abnf
/// quoted-string = [CFWS] DQUOTE *([FWS] qcontent) [FWS] DQUOTE [CFWS]
/// ```
///
/// Returns the slice between the quotes inclusive; the surrounding CFWS
/// is consumed but left out of the slice.
pub fn quoted_string<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let txn = Transaction::new(cur);
    let _ = cfws(cur);
    let start = cur.pos();
    if cur.cur() != Some(ascii::DQUOTE) {
        return None;
    }
    cur.accept().ok()?;
    loop {
        let attempt = Transaction::new(cur);
        let _ = fws(cur);
        if qcontent(cur).is_some() {
            attempt.commit();
        } else {
            break;
        }
    }
    let _ = fws(cur);
    if cur.cur() != Some(ascii::DQUOTE) {
        return None;
    }
    cur.accept().ok()?;
    let end = cur.pos();
    let _ = cfws(cur);
    Some(txn.accept(cur.slice(start, end)))
}
