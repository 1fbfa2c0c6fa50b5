//! Syntactic validation of fully qualified domain names (RFC 5321
//! §4.1.2, §4.5.3.1.2). No DNS resolution is involved.

use crate::text::classes;

/// Maximum accepted input, in codepoints: a maximal name plus the
/// optional root dot.
pub const MAX_INPUT: usize = 254;

// RFC 1035 §2.3.4 octet limits
const MAX_NAME: usize = 253;
const MAX_LABEL: usize = 63;

/// A candidate domain name.
pub struct Fqdn<'a> {
    text: &'a str,
}

impl<'a> Fqdn<'a> {
    /// `None` when the input exceeds [`MAX_INPUT`] codepoints.
    pub fn of(text: &'a str) -> Option<Self> {
        if text.chars().count() > MAX_INPUT {
            return None;
        }
        Some(Self { text })
    }

    /// Does the text satisfy the FQDN label syntax?
    ///
    /// A single label is accepted; callers wanting a dotted name must
    /// impose their own two-label rule.
    pub fn is_domain(&self) -> bool {
        let valid = is_fqdn(self.text);
        log::trace!("fqdn: {:?} -> {}", self.text, valid);
        valid
    }
}

pub(crate) fn is_fqdn(name: &str) -> bool {
    // a trailing root dot is accepted; its empty label is ignored
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() || name.len() > MAX_NAME {
        return false;
    }
    name.split('.').all(label_ok)
}

// 1..63 octets, starts with ALPHA, ends with ALPHA or DIGIT, contains
// only ALPHA, DIGIT or '-'.
fn label_ok(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL {
        return false;
    }
    let mut chars = label.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    classes::is(first, classes::ALPHA)
        && label
            .chars()
            .last()
            .is_some_and(|c| classes::is(c, classes::ALPHA | classes::DIGIT))
        && label
            .chars()
            .all(|c| classes::is(c, classes::ALPHA | classes::DIGIT) || c == '-')
}
