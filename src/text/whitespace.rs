//! Folding whitespace and comments (RFC 5322 §3.2.2).

use crate::cursor::{Cursor, Substring};
use crate::text::{ascii, classes};
use crate::transaction::Transaction;

pub fn is_wsp(c: char) -> bool {
    c == ascii::SP || c == ascii::HT
}

// Skip a run of WSP; true when at least one codepoint was consumed.
fn wsp_run(cur: &Cursor) -> bool {
    let start = cur.pos();
    cur.skip(|c, _| is_wsp(c));
    cur.pos() != start
}

/// Folding white space
///
/// ```abnf
/// FWS = ([*WSP] CRLF) 1*WSP / 1*WSP
/// ```
///
/// The line ending is lenient (`CRLF := ([CR] LF) / CR`): CR LF, bare CR
/// and bare LF are all accepted, provided WSP follows. A CR LF pair that
/// is not followed by WSP is rolled back as a whole, two codepoints.
pub fn fws(cur: &Cursor) -> Option<()> {
    let txn = Transaction::new(cur);
    let lead = wsp_run(cur);
    if fold(cur).is_some() {
        return Some(txn.accept(()));
    }
    if lead {
        Some(txn.accept(()))
    } else {
        None
    }
}

// One lenient line ending followed by its mandatory whitespace.
fn fold(cur: &Cursor) -> Option<()> {
    let txn = Transaction::new(cur);
    match cur.cur() {
        Some(ascii::LF) => {
            cur.accept().ok()?;
        }
        Some(ascii::CR) => {
            if cur.peek() == Some(ascii::LF) {
                cur.accept().ok()?;
                cur.accept().ok()?;
            } else if cur.peek().is_some_and(is_wsp) {
                cur.accept().ok()?;
            } else {
                return None;
            }
        }
        _ => return None,
    }
    if !wsp_run(cur) {
        return None;
    }
    Some(txn.accept(()))
}

/// Comment or folding white space
///
/// ```abnf
/// CFWS = (1*([FWS] comment) [FWS]) / FWS
/// ```
pub fn cfws(cur: &Cursor) -> Option<()> {
    {
        let txn = Transaction::new(cur);
        let mut seen = false;
        loop {
            let attempt = Transaction::new(cur);
            let _ = fws(cur);
            if comment(cur).is_some() {
                attempt.commit();
                seen = true;
            } else {
                break;
            }
        }
        if seen {
            let _ = fws(cur);
            return Some(txn.accept(()));
        }
    }
    fws(cur)
}

/// Comment
///
/// ```abnf
/// comment  = "(" *([FWS] ccontent) [FWS] ")"
/// ccontent = ctext / quoted-pair / comment
/// ```
///
/// The comment text is discarded; the returned slice spans the whole
/// comment, parentheses included.
pub fn comment<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let txn = Transaction::new(cur);
    let start = cur.pos();
    if cur.cur() != Some(ascii::LEFT_PAR) {
        return None;
    }
    cur.accept().ok()?;
    loop {
        let attempt = Transaction::new(cur);
        let _ = fws(cur);
        if ccontent(cur).is_some() {
            attempt.commit();
        } else {
            break;
        }
    }
    let _ = fws(cur);
    if cur.cur() != Some(ascii::RIGHT_PAR) {
        return None;
    }
    cur.accept().ok()?;
    Some(txn.accept(cur.slice(start, cur.pos())))
}

fn ccontent(cur: &Cursor) -> Option<()> {
    let c = cur.cur()?;
    if classes::is(c, classes::CTEXT) {
        cur.skip(|c, _| classes::is(c, classes::CTEXT));
        return Some(());
    }
    if c == ascii::BACKSLASH {
        return crate::text::quoted::quoted_pair(cur).map(|_| ());
    }
    if c == ascii::LEFT_PAR {
        return comment(cur).map(|_| ());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(input: &str, production: fn(&Cursor) -> Option<()>) -> Option<usize> {
        let cur = Cursor::new(input, 1024).unwrap();
        production(&cur).map(|_| cur.pos())
    }

    #[test]
    fn test_fws_plain() {
        assert_eq!(after("  x", fws), Some(2));
        assert_eq!(after("\tx", fws), Some(1));
        assert_eq!(after("x", fws), None);
        assert_eq!(after("", fws), None);
    }

    #[test]
    fn test_fws_crlf() {
        assert_eq!(after("\r\n x", fws), Some(3));
        assert_eq!(after(" \r\n\tx", fws), Some(4));
        // CR LF not followed by WSP: the pair is rolled back whole
        assert_eq!(after(" \r\nx", fws), Some(1));
        assert_eq!(after("\r\nx", fws), None);
    }

    #[test]
    fn test_fws_bare_cr() {
        assert_eq!(after("\r x", fws), Some(2));
        assert_eq!(after(" \r\t x", fws), Some(4));
        assert_eq!(after("\rx", fws), None);
    }

    #[test]
    fn test_fws_bare_lf() {
        assert_eq!(after("\n x", fws), Some(2));
        assert_eq!(after(" \n x", fws), Some(3));
        assert_eq!(after("\nx", fws), None);
        // leading WSP still parses when the fold is refused
        assert_eq!(after(" \nx", fws), Some(1));
    }

    #[test]
    fn test_fws_fold_at_end_of_input() {
        assert_eq!(after(" \r\n", fws), Some(1));
        assert_eq!(after(" \r", fws), Some(1));
        assert_eq!(after("\n", fws), None);
    }

    #[test]
    fn test_comment() {
        let cur = Cursor::new("(a comment) rest", 1024).unwrap();
        let span = comment(&cur).unwrap();
        assert_eq!(span.as_str(), "(a comment)");
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn test_comment_nested_and_escaped() {
        let cur = Cursor::new(r"(a (nested) \) comment)x", 1024).unwrap();
        let span = comment(&cur).unwrap();
        assert_eq!(span.as_str(), r"(a (nested) \) comment)");
        assert_eq!(cur.cur(), Some('x'));
    }

    #[test]
    fn test_comment_unterminated() {
        let cur = Cursor::new("(dangling", 1024).unwrap();
        assert!(comment(&cur).is_none());
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn test_cfws() {
        assert_eq!(after("(skip) x", cfws), Some(7));
        assert_eq!(after(" (one)(two) x", cfws), Some(12));
        assert_eq!(after(" \r\n (folded comment) x", cfws), Some(21));
        assert_eq!(after("  x", cfws), Some(2));
        assert_eq!(after("x", cfws), None);
    }

    #[test]
    fn test_cfws_folded_between_comments() {
        assert_eq!(after("(a)\r\n (b) x", cfws), Some(10));
    }
}
