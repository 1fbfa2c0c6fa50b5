//! Mailboxes and addr-specs (RFC 5322 §3.4) with the RFC 5321
//! post-conditions attached.

use bounded_static::ToStatic;
use std::fmt;

use crate::cursor::{Cursor, Substring};
use crate::text::ascii;
use crate::text::classes;
use crate::text::quoted::quoted_string;
use crate::text::whitespace::{cfws, fws};
use crate::text::words::{dot_atom, phrase, Phrase};
use crate::transaction::Transaction;
use crate::{fqdn, ip};

use super::address::Address;
use super::list_of;

// RFC 5321 §4.5.3.1.1 and §4.5.3.1.2
const MAX_LOCAL_PART: usize = 64;
const MAX_DOMAIN: usize = 255;

/// The bare email address: `local-part "@" domain`.
#[derive(Clone, PartialEq, Eq, ToStatic)]
pub struct AddrSpec<'a> {
    /// Text before the `@`, surrounding CFWS excluded; quoted-string
    /// delimiters are kept verbatim.
    pub local_part: Substring<'a>,
    /// Text after the `@`, surrounding CFWS excluded; a domain literal
    /// keeps its brackets.
    pub domain: Substring<'a>,
    /// RFC 5321 post-conditions: the length limits hold and the domain
    /// is a syntactic FQDN or a bracketed IPv4/IPv6 literal.
    pub valid: bool,
}

impl<'a> AddrSpec<'a> {
    fn new(local_part: Substring<'a>, domain: Substring<'a>) -> Self {
        let valid = local_part.octets() <= MAX_LOCAL_PART
            && domain.octets() <= MAX_DOMAIN
            && domain_deliverable(domain.as_str());
        Self {
            local_part,
            domain,
            valid,
        }
    }
}

fn domain_deliverable(domain: &str) -> bool {
    if domain.starts_with(ascii::LEFT_BRACKET) {
        ip::address_literal(domain).is_some()
    } else {
        fqdn::is_fqdn(domain)
    }
}

impl fmt::Display for AddrSpec<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}@{}", self.local_part, self.domain)
    }
}

impl fmt::Debug for AddrSpec<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("AddrSpec")
            .field(&format_args!("\"{}\" valid={}", self, self.valid))
            .finish()
    }
}

/// AddrSpec
///
/// ```abnf
/// addr-spec = local-part "@" domain
/// ```
pub fn addr_spec<'a>(cur: &Cursor<'a>) -> Option<AddrSpec<'a>> {
    let txn = Transaction::new(cur);
    let local = local_part(cur)?;
    if cur.cur() != Some(ascii::AT) {
        return None;
    }
    cur.accept().ok()?;
    let dom = domain(cur)?;
    Some(txn.accept(AddrSpec::new(local, dom)))
}

/// local-part = dot-atom / quoted-string
fn local_part<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    if let Some(plain) = dot_atom(cur) {
        return Some(plain);
    }
    quoted_string(cur)
}

/// domain = dot-atom / domain-literal
fn domain<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    if let Some(name) = dot_atom(cur) {
        return Some(name);
    }
    domain_literal(cur)
}

/// Domain literal
///
/// ```abnf
/// domain-literal = [CFWS] "[" *([FWS] dtext) [FWS] "]" [CFWS]
/// ```
///
/// The returned slice keeps the brackets; whether the content denotes an
/// IPv4 or IPv6 address is the literal validators' concern.
fn domain_literal<'a>(cur: &Cursor<'a>) -> Option<Substring<'a>> {
    let txn = Transaction::new(cur);
    let _ = cfws(cur);
    let start = cur.pos();
    if cur.cur() != Some(ascii::LEFT_BRACKET) {
        return None;
    }
    cur.accept().ok()?;
    loop {
        let attempt = Transaction::new(cur);
        let _ = fws(cur);
        let run = cur.pos();
        cur.skip(|c, _| classes::is(c, classes::DTEXT));
        if cur.pos() != run {
            attempt.commit();
        } else {
            break;
        }
    }
    let _ = fws(cur);
    if cur.cur() != Some(ascii::RIGHT_BRACKET) {
        return None;
    }
    cur.accept().ok()?;
    let end = cur.pos();
    let _ = cfws(cur);
    Some(txn.accept(cur.slice(start, end)))
}

/// Mailbox
///
/// ```abnf
/// mailbox = name-addr / addr-spec
/// ```
pub fn mailbox<'a>(cur: &Cursor<'a>) -> Option<Address<'a>> {
    if let Some(named) = name_addr(cur) {
        return Some(named);
    }
    addr_spec(cur).map(|spec| Address::Mailbox {
        label: None,
        mailbox: spec,
    })
}

/// name-addr = [display-name] angle-addr
fn name_addr<'a>(cur: &Cursor<'a>) -> Option<Address<'a>> {
    let txn = Transaction::new(cur);
    let label = display_name(cur).map(|name| name.to_label());
    let spec = angle_addr(cur)?;
    Some(txn.accept(Address::Mailbox {
        label,
        mailbox: spec,
    }))
}

/// angle-addr = [CFWS] "<" addr-spec ">" [CFWS]
fn angle_addr<'a>(cur: &Cursor<'a>) -> Option<AddrSpec<'a>> {
    let txn = Transaction::new(cur);
    let _ = cfws(cur);
    if cur.cur() != Some(ascii::LT) {
        return None;
    }
    cur.accept().ok()?;
    let spec = addr_spec(cur)?;
    if cur.cur() != Some(ascii::GT) {
        return None;
    }
    cur.accept().ok()?;
    let _ = cfws(cur);
    Some(txn.accept(spec))
}

/// display-name = phrase
pub(super) fn display_name<'a>(cur: &Cursor<'a>) -> Option<Phrase<'a>> {
    phrase(cur)
}

/// Mailbox list
///
/// ```abnf
/// mailbox-list = mailbox *("," mailbox)
/// ```
pub fn mailbox_list<'a>(cur: &Cursor<'a>) -> Option<Vec<Address<'a>>> {
    list_of(cur, mailbox)
}
