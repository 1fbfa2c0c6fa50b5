#![doc = include_str!("../README.md")]

/// Codepoint-level window over the input with position save/restore
pub mod cursor;

/// Scoped commit/rollback of the cursor position for backtracking
pub mod transaction;

/// Low-level email-specific text productions (whitespace, atoms, quotes)
pub mod text;

/// The RFC 5322 address grammar and its parse tree
pub mod addr;

/// Entry points into the address grammar
pub mod path;

/// Syntactic FQDN validation (RFC 5321)
pub mod fqdn;

/// IPv4/IPv6 literal validation and the bracketed address-literal forms
pub mod ip;

pub use addr::address::{Address, AddressList};
pub use addr::mailbox::AddrSpec;
pub use cursor::{Cursor, CursorError, Substring};
pub use fqdn::Fqdn;
pub use ip::{IpAddress, IpOctets};
pub use path::Path;
pub use transaction::Transaction;

/// Parse one bare email address (`local@domain`).
///
/// # Examples
///
/// ```
/// let spec = addr_codec::parse_addr_spec("jdoe@example.com").unwrap();
/// assert!(spec.valid);
/// assert_eq!(spec.domain.as_str(), "example.com");
/// ```
pub fn parse_addr_spec(input: &str) -> Option<AddrSpec<'_>> {
    Path::of(input)?.as_addr_spec()
}

/// Parse a comma-separated address list, groups included.
///
/// # Examples
///
/// ```
/// let list = addr_codec::parse_address_list("Team: a@x.tld, b@y.tld;").unwrap();
/// assert!(list.valid && list.is_address_list);
/// ```
pub fn parse_address_list(input: &str) -> Option<AddressList<'_>> {
    Path::of(input)?.as_address_list()
}
