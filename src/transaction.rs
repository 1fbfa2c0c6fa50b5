use crate::cursor::Cursor;
use std::cell::Cell;

/// A scoped save of the cursor offset with rollback on unresolved exit.
///
/// Every grammar alternative is bracketed by a transaction: open one,
/// attempt the production, and either finish with [`Transaction::accept`]
/// or let the transaction drop, which restores the saved offset on any
/// exit path (normal return, early `return None`, `?`-propagation).
///
/// [`Transaction::commit`] re-saves the offset at the current position.
/// List productions call it once per successfully parsed element so that
/// a trailing malformed element leaves the cursor just after the last
/// good one. Transactions nest freely; each rollback only restores its
/// own saved offset.
pub struct Transaction<'c, 'a> {
    cursor: &'c Cursor<'a>,
    saved: Cell<usize>,
}

impl<'c, 'a> Transaction<'c, 'a> {
    pub fn new(cursor: &'c Cursor<'a>) -> Self {
        Self {
            cursor,
            saved: Cell::new(cursor.pos()),
        }
    }

    /// Move the saved offset up to the current position. Idempotent.
    pub fn commit(&self) {
        self.saved.set(self.cursor.pos());
    }

    /// Commit and return `value` unchanged; the closing expression of a
    /// successful production.
    pub fn accept<T>(self, value: T) -> T {
        self.commit();
        value
    }
}

impl Drop for Transaction<'_, '_> {
    fn drop(&mut self) {
        self.cursor.restore(self.saved.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_on_drop() {
        let cur = Cursor::new("abcd", 16).unwrap();
        {
            let _txn = Transaction::new(&cur);
            cur.accept().unwrap();
            cur.accept().unwrap();
            assert_eq!(cur.pos(), 2);
        }
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn test_accept_keeps_position() {
        let cur = Cursor::new("abcd", 16).unwrap();
        let out = {
            let txn = Transaction::new(&cur);
            cur.accept().unwrap();
            txn.accept(42)
        };
        assert_eq!(out, 42);
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn test_rollback_on_early_return() {
        fn production(cur: &Cursor) -> Option<()> {
            let _txn = Transaction::new(cur);
            cur.accept().ok()?;
            None
        }
        let cur = Cursor::new("abcd", 16).unwrap();
        assert_eq!(production(&cur), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn test_nesting() {
        let cur = Cursor::new("abcd", 16).unwrap();
        let txn = Transaction::new(&cur);
        cur.accept().unwrap();
        {
            let _inner = Transaction::new(&cur);
            cur.accept().unwrap();
            assert_eq!(cur.pos(), 2);
        }
        // the inner rollback only undoes the inner consumption
        assert_eq!(cur.pos(), 1);
        drop(txn);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn test_commit_moves_the_restore_point() {
        // the list idiom: commit after each good element, then a failed
        // tail rolls back to just after the last one
        let cur = Cursor::new("ab", 16).unwrap();
        {
            let txn = Transaction::new(&cur);
            cur.accept().unwrap();
            txn.commit();
            cur.accept().unwrap();
            assert_eq!(cur.pos(), 2);
        }
        assert_eq!(cur.pos(), 1);
    }
}
