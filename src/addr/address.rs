//! Addresses, groups and address lists (RFC 5322 §3.4).

use bounded_static::ToStatic;
use std::fmt;

use crate::cursor::{Cursor, Substring};
use crate::text::ascii;
use crate::text::whitespace::cfws;
use crate::transaction::Transaction;

use super::list_of;
use super::mailbox::{display_name, mailbox, mailbox_list, AddrSpec};

/// A single deliverable mailbox or a named group of mailboxes.
///
/// `Group.members` only ever holds `Mailbox` nodes: a group list is a
/// mailbox list, so the grammar cannot nest groups.
#[derive(Clone, Debug, PartialEq, Eq, ToStatic)]
pub enum Address<'a> {
    Mailbox {
        label: Option<Substring<'a>>,
        mailbox: AddrSpec<'a>,
    },
    Group {
        label: Substring<'a>,
        members: Vec<Address<'a>>,
    },
}

impl Address<'_> {
    pub fn is_valid(&self) -> bool {
        match self {
            Address::Mailbox { mailbox, .. } => mailbox.valid,
            Address::Group { members, .. } => members.iter().all(Address::is_valid),
        }
    }
}

impl fmt::Display for Address<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Mailbox {
                label: None,
                mailbox,
            } => write!(fmt, "{mailbox}"),
            Address::Mailbox {
                label: Some(label),
                mailbox,
            } => write!(fmt, "{label} <{mailbox}>"),
            Address::Group { label, members } => {
                if members.is_empty() {
                    write!(fmt, "{label}:;")
                } else {
                    write!(fmt, "{label}: {};", join(members))
                }
            }
        }
    }
}

/// An address list or a mailbox list, with its aggregate validity.
#[derive(Clone, Debug, PartialEq, Eq, ToStatic)]
pub struct AddressList<'a> {
    pub items: Vec<Address<'a>>,
    /// True iff the list is non-empty and every item is valid.
    pub valid: bool,
    /// True iff any item is a group.
    pub is_address_list: bool,
}

impl<'a> AddressList<'a> {
    pub(crate) fn new(items: Vec<Address<'a>>) -> Self {
        let valid = !items.is_empty() && items.iter().all(Address::is_valid);
        let is_address_list = items
            .iter()
            .any(|item| matches!(item, Address::Group { .. }));
        Self {
            items,
            valid,
            is_address_list,
        }
    }

    /// The invalid items, rendered like the list itself; `None` when
    /// every item is valid. Diagnostic only; check `valid` first.
    pub fn invalids_to_string(&self) -> Option<String> {
        let invalids: Vec<&Address<'a>> = self
            .items
            .iter()
            .filter(|item| !item.is_valid())
            .collect();
        if invalids.is_empty() {
            return None;
        }
        Some(
            invalids
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl fmt::Display for AddressList<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(&join(&self.items))
    }
}

fn join(items: &[Address<'_>]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Address
///
/// ```abnf
/// address = mailbox / group
/// ```
pub fn address<'a>(cur: &Cursor<'a>) -> Option<Address<'a>> {
    if let Some(single) = mailbox(cur) {
        return Some(single);
    }
    group(cur)
}

/// Group
///
/// ```abnf
/// group      = display-name ":" [group-list] ";" [CFWS]
/// group-list = mailbox-list / CFWS
/// ```
fn group<'a>(cur: &Cursor<'a>) -> Option<Address<'a>> {
    let txn = Transaction::new(cur);
    let label = display_name(cur)?.to_label();
    if cur.cur() != Some(ascii::COL) {
        return None;
    }
    cur.accept().ok()?;
    let members = group_list(cur).unwrap_or_default();
    if cur.cur() != Some(ascii::SEM_COL) {
        return None;
    }
    cur.accept().ok()?;
    let _ = cfws(cur);
    Some(txn.accept(Address::Group { label, members }))
}

// An empty group is legal: its list degenerates to CFWS or to nothing.
fn group_list<'a>(cur: &Cursor<'a>) -> Option<Vec<Address<'a>>> {
    if let Some(members) = mailbox_list(cur) {
        return Some(members);
    }
    cfws(cur).map(|_| Vec::new())
}

/// Address list
///
/// ```abnf
/// address-list = address *("," address)
/// ```
pub fn address_list<'a>(cur: &Cursor<'a>) -> Option<Vec<Address<'a>>> {
    list_of(cur, address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn whole_list(input: &str) -> AddressList<'_> {
        let cur = Cursor::new(input, 1024).unwrap();
        let items = address_list(&cur).unwrap();
        assert_eq!(cur.cur(), None, "input not fully consumed");
        AddressList::new(items)
    }

    #[test]
    fn test_group() {
        let list = whole_list("Group:a@x.tld, b@y.tld;");
        assert_eq!(list.items.len(), 1);
        assert!(list.valid);
        assert!(list.is_address_list);
        match &list.items[0] {
            Address::Group { label, members } => {
                assert_eq!(label.as_str(), "Group");
                assert_eq!(members.len(), 2);
            }
            Address::Mailbox { .. } => panic!("expected a group"),
        }
        assert_eq!(list.to_string(), "Group: a@x.tld, b@y.tld;");
    }

    #[test]
    fn test_empty_group() {
        for input in ["undisclosed-recipients:;", "undisclosed-recipients: ;"] {
            let list = whole_list(input);
            assert!(list.is_address_list);
            assert_eq!(
                list.items[0],
                Address::Group {
                    label: Substring::owned(0, 0, "undisclosed-recipients".into()),
                    members: vec![],
                }
            );
            assert_eq!(list.to_string(), "undisclosed-recipients:;");
        }
    }

    #[test]
    fn test_mixed_list() {
        let list = whole_list(
            r#"A Group:Ed Jones <c@a.test>,joe@where.test;, Mary Smith <mary@x.test>"#,
        );
        assert_eq!(list.items.len(), 2);
        assert!(list.valid);
        assert!(list.is_address_list);
        assert_eq!(
            list.to_string(),
            "A Group: Ed Jones <c@a.test>, joe@where.test;, Mary Smith <mary@x.test>"
        );
    }

    #[test]
    fn test_mailbox_only_list_is_not_address_list() {
        let list = whole_list("a@x.tld, b@y.tld");
        assert!(!list.is_address_list);
        assert!(list.valid);
    }

    #[test]
    fn test_group_with_folded_whitespace() {
        let list = whole_list("group: \r\n ;");
        assert_eq!(
            list.items[0],
            Address::Group {
                label: Substring::owned(0, 0, "group".into()),
                members: vec![],
            }
        );
    }

    #[test]
    fn test_validity_aggregation() {
        let list = whole_list("ok@x.tld, bad@-y.tld");
        assert!(!list.valid);
        assert_eq!(list.invalids_to_string().unwrap(), "bad@-y.tld");

        let list = whole_list("ok@x.tld");
        assert!(list.valid);
        assert_eq!(list.invalids_to_string(), None);
    }

    #[test]
    fn test_group_validity() {
        let list = whole_list("Team:ok@x.tld, bad@-y.tld;");
        assert!(!list.valid);
        assert_eq!(
            list.invalids_to_string().unwrap(),
            "Team: ok@x.tld, bad@-y.tld;"
        );
    }
}
