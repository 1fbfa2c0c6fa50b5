//! The RFC 5322 address grammar (§3.4) and its parse tree.

pub mod address;
pub mod mailbox;

use crate::cursor::Cursor;
use crate::text::ascii;
use crate::transaction::Transaction;

// item *("," item)
//
// One outer transaction, committed after each good element; a trailing
// "," followed by a malformed element is rolled back so the cursor ends
// just after the last good one.
pub(crate) fn list_of<'a, T>(
    cur: &Cursor<'a>,
    item: impl Fn(&Cursor<'a>) -> Option<T>,
) -> Option<Vec<T>> {
    let txn = Transaction::new(cur);
    let mut items = vec![item(cur)?];
    txn.commit();
    while cur.cur() == Some(ascii::COMMA) {
        cur.accept().ok()?;
        match item(cur) {
            Some(next) => {
                items.push(next);
                txn.commit();
            }
            None => break,
        }
    }
    Some(items)
}
