//! Entry points into the address grammar.

use log::trace;

use crate::addr::address::{address, address_list, Address, AddressList};
use crate::addr::mailbox::{addr_spec, mailbox, mailbox_list, AddrSpec};
use crate::cursor::Cursor;
use crate::transaction::Transaction;

/// Maximum accepted input, in codepoints.
pub const MAX_INPUT: usize = 131_072;

/// A reusable parser over one input string.
///
/// Each entry point resets the cursor to offset 0, parses, and succeeds
/// only when the whole input is consumed; any trailing codepoint yields
/// `None` and the cursor is rolled back to 0. The instance is reusable
/// serially but not safe for concurrent use: callers wanting parallelism
/// create one instance per input.
pub struct Path<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Path<'a> {
    /// `None` when the input exceeds [`MAX_INPUT`] codepoints.
    pub fn of(text: &'a str) -> Option<Self> {
        Cursor::new(text, MAX_INPUT)
            .ok()
            .map(|cursor| Self { cursor })
    }

    /// Parse the input as a bare `addr-spec` (`local@domain`).
    pub fn as_addr_spec(&self) -> Option<AddrSpec<'a>> {
        self.whole("addr-spec", addr_spec)
    }

    /// Parse the input as a sender: a single mailbox, or any address
    /// (groups included) when `allow_rfc6854` is set.
    pub fn for_sender(&self, allow_rfc6854: bool) -> Option<Address<'a>> {
        if allow_rfc6854 {
            self.whole("sender address", address)
        } else {
            self.whole("sender mailbox", mailbox)
        }
    }

    /// Parse the input as a `mailbox-list`.
    pub fn as_mailbox_list(&self) -> Option<AddressList<'a>> {
        self.whole("mailbox-list", mailbox_list)
            .map(AddressList::new)
    }

    /// Parse the input as an `address-list`.
    pub fn as_address_list(&self) -> Option<AddressList<'a>> {
        self.whole("address-list", address_list)
            .map(AddressList::new)
    }

    // Run one production against the whole input.
    fn whole<T>(&self, rule: &str, production: impl Fn(&Cursor<'a>) -> Option<T>) -> Option<T> {
        self.cursor.jmp(0).ok()?;
        let txn = Transaction::new(&self.cursor);
        let node = match production(&self.cursor) {
            Some(node) => node,
            None => {
                trace!("{rule}: no parse");
                return None;
            }
        };
        if self.cursor.cur().is_some() {
            trace!("{rule}: trailing input at byte {}", self.cursor.pos());
            return None;
        }
        Some(txn.accept(node))
    }
}
