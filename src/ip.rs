//! IPv4 and IPv6 literal validation (RFC 5321 §4.1.3) and the bracketed
//! address-literal forms a domain may take.
//!
//! Only the dotted-quad and `IPv6:` tagged forms exist here; the
//! General-address-literal and IPv6 zone identifiers are rejected.

use crate::text::classes;
use std::net::IpAddr;

/// Maximum accepted input, in codepoints: an IPv6 address with every
/// group written out and an embedded dotted-quad.
pub const MAX_INPUT: usize = 45;

/// A candidate IP address in textual form.
pub struct IpAddress<'a> {
    text: &'a str,
}

/// A parsed address as raw network-order octets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IpOctets {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl From<IpOctets> for IpAddr {
    fn from(octets: IpOctets) -> Self {
        match octets {
            IpOctets::V4(o) => IpAddr::from(o),
            IpOctets::V6(o) => IpAddr::from(o),
        }
    }
}

impl<'a> IpAddress<'a> {
    /// `None` when the input exceeds [`MAX_INPUT`] codepoints.
    pub fn of(text: &'a str) -> Option<Self> {
        if text.chars().count() > MAX_INPUT {
            return None;
        }
        Some(Self { text })
    }

    /// The address as a dotted quad, or `None`.
    pub fn v4(&self) -> Option<[u8; 4]> {
        parse_v4(self.text)
    }

    /// The address as IPv6, or `None`.
    pub fn v6(&self) -> Option<[u8; 16]> {
        parse_v6(self.text)
    }

    /// The address in whichever family matches.
    pub fn from(&self) -> Option<IpOctets> {
        if let Some(quad) = self.v4() {
            return Some(IpOctets::V4(quad));
        }
        self.v6().map(IpOctets::V6)
    }
}

/// The bracketed domain-literal forms: `[IPv6:`…`]` holds an IPv6
/// address, plain `[`…`]` a dotted quad. Nothing else validates.
pub(crate) fn address_literal(literal: &str) -> Option<IpOctets> {
    let body = literal.strip_prefix('[')?.strip_suffix(']')?;
    match body.strip_prefix("IPv6:") {
        Some(v6_body) => parse_v6(v6_body).map(IpOctets::V6),
        None => parse_v4(body).map(IpOctets::V4),
    }
}

/// Exactly four decimal groups; 1..3 digits each, no leading zero other
/// than `"0"` itself, value 0..255.
pub(crate) fn parse_v4(text: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    for group in text.split('.') {
        if count == 4 {
            return None;
        }
        octets[count] = v4_group(group)?;
        count += 1;
    }
    (count == 4).then_some(octets)
}

fn v4_group(group: &str) -> Option<u8> {
    if group.is_empty() || group.len() > 3 {
        return None;
    }
    if group.len() > 1 && group.starts_with('0') {
        return None;
    }
    let mut value: u32 = 0;
    for c in group.chars() {
        if !classes::is(c, classes::DIGIT) {
            return None;
        }
        value = value * 10 + (c as u32 - '0' as u32);
    }
    u8::try_from(value).ok()
}

/// 1..8 hexadecimal groups of 1..4 digits separated by `:`; at most one
/// `::` standing for one or more zero groups; the last two groups may be
/// an embedded dotted quad; a bare `::` is all zeros. Zone identifiers
/// are rejected.
pub(crate) fn parse_v6(text: &str) -> Option<[u8; 16]> {
    if text.contains('%') {
        return None;
    }
    let mut head = Vec::with_capacity(8);
    let mut tail = Vec::new();
    match text.find("::") {
        Some(gap) => {
            let after = &text[gap + 2..];
            if after.contains("::") {
                return None;
            }
            v6_side(&text[..gap], &mut head, false)?;
            v6_side(after, &mut tail, true)?;
            // "::" must stand for at least one zero group
            if head.len() + tail.len() >= 8 {
                return None;
            }
        }
        None => {
            v6_side(text, &mut head, true)?;
            if head.len() != 8 {
                return None;
            }
        }
    }
    let mut groups = [0u16; 8];
    for (i, g) in head.iter().enumerate() {
        groups[i] = *g;
    }
    for (i, g) in tail.iter().enumerate() {
        groups[8 - tail.len() + i] = *g;
    }
    let mut octets = [0u8; 16];
    for (i, g) in groups.iter().enumerate() {
        octets[2 * i] = (g >> 8) as u8;
        octets[2 * i + 1] = (g & 0xff) as u8;
    }
    Some(octets)
}

// One colon-separated run of hex groups; the final group may be an
// embedded dotted quad when `allow_v4` (it counts as two groups). An
// empty side contributes nothing: that is how `::` touches an edge.
fn v6_side(side: &str, groups: &mut Vec<u16>, allow_v4: bool) -> Option<()> {
    if side.is_empty() {
        return Some(());
    }
    let parts: Vec<&str> = side.split(':').collect();
    for (i, part) in parts.iter().enumerate() {
        let last = i + 1 == parts.len();
        if last && allow_v4 && part.contains('.') {
            let quad = parse_v4(part)?;
            groups.push(u16::from(quad[0]) << 8 | u16::from(quad[1]));
            groups.push(u16::from(quad[2]) << 8 | u16::from(quad[3]));
        } else {
            groups.push(hex_group(part)?);
        }
    }
    Some(())
}

fn hex_group(group: &str) -> Option<u16> {
    if group.is_empty() || group.len() > 4 {
        return None;
    }
    let mut value: u32 = 0;
    for c in group.chars() {
        value = value * 16 + hex_digit(c)?;
    }
    Some(value as u16)
}

fn hex_digit(c: char) -> Option<u32> {
    if classes::is(c, classes::DIGIT) {
        Some(c as u32 - '0' as u32)
    } else if classes::is(c, classes::ABISF) {
        Some(c.to_ascii_lowercase() as u32 - 'a' as u32 + 10)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(text: &str) -> Option<[u8; 4]> {
        IpAddress::of(text).unwrap().v4()
    }
    fn v6(text: &str) -> Option<[u8; 16]> {
        IpAddress::of(text).unwrap().v6()
    }

    #[test]
    fn test_v4() {
        assert_eq!(v4("192.0.2.1"), Some([192, 0, 2, 1]));
        assert_eq!(v4("0.0.0.0"), Some([0, 0, 0, 0]));
        assert_eq!(v4("255.255.255.255"), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_v4_rejects() {
        assert_eq!(v4("256.0.0.1"), None);
        assert_eq!(v4("1.2.3"), None);
        assert_eq!(v4("1.2.3.4.5"), None);
        assert_eq!(v4("01.2.3.4"), None); // leading zero
        assert_eq!(v4("1.2.3."), None);
        assert_eq!(v4("1.2.3.x"), None);
        assert_eq!(v4(""), None);
        assert_eq!(v4("1.2.3.+4"), None);
    }

    #[test]
    fn test_v6_full() {
        assert_eq!(
            v6("2001:db8:0:0:0:0:0:1"),
            Some([0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1])
        );
        assert_eq!(
            v6("2001:DB8:0:0:0:0:0:1"), // hex digits in either case
            v6("2001:db8:0:0:0:0:0:1")
        );
    }

    #[test]
    fn test_v6_double_colon() {
        assert_eq!(
            v6("2001:db8::1"),
            Some([0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1])
        );
        assert_eq!(v6("::"), Some([0u8; 16]));
        assert_eq!(
            v6("::1"),
            Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1])
        );
        assert_eq!(
            v6("1::"),
            Some([0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])
        );
    }

    #[test]
    fn test_v6_embedded_v4() {
        assert_eq!(
            v6("::ffff:192.168.0.1"),
            Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 192, 168, 0, 1])
        );
        assert_eq!(
            v6("1:2:3:4:5:6:7.8.9.10"),
            Some([0, 1, 0, 2, 0, 3, 0, 4, 0, 5, 0, 6, 7, 8, 9, 10])
        );
        // the quad may only stand in the last two groups
        assert_eq!(v6("1.2.3.4:5:6:7:8:9"), None);
        assert_eq!(v6("1.2.3.4"), None);
    }

    #[test]
    fn test_v6_rejects() {
        assert_eq!(v6("1:2:3:4:5:6:7"), None); // 7 groups
        assert_eq!(v6("1:2:3:4:5:6:7:8:9"), None); // 9 groups
        assert_eq!(v6("1:2:3:4:5:6:7:8::"), None); // :: stands for nothing
        assert_eq!(v6("1::2::3"), None); // two gaps
        assert_eq!(v6(":1:2:3:4:5:6:7"), None); // bare leading colon
        assert_eq!(v6("1:2:3:4:5:6:7:"), None); // bare trailing colon
        assert_eq!(v6("12345::"), None); // group too wide
        assert_eq!(v6("g::"), None);
        assert_eq!(v6(""), None);
    }

    #[test]
    fn test_v6_zone_id() {
        assert_eq!(v6("2001:db8::1%eth0"), None);
        assert_eq!(v6("fe80::1%25en1"), None);
    }

    #[test]
    fn test_from_picks_the_family() {
        assert_eq!(
            IpAddress::of("192.0.2.1").unwrap().from(),
            Some(IpOctets::V4([192, 0, 2, 1]))
        );
        let dual = IpAddress::of("2001:db8::1").unwrap();
        assert_eq!(dual.v4(), None);
        assert!(matches!(dual.from(), Some(IpOctets::V6(_))));
        assert_eq!(IpAddress::of("not-an-ip").unwrap().from(), None);
    }

    #[test]
    fn test_factory_bound() {
        let widest = "0000:0000:0000:0000:0000:ffff:255.255.255.255";
        assert_eq!(widest.len(), 45);
        assert!(IpAddress::of(widest).unwrap().v6().is_some());
        assert!(IpAddress::of(&format!(" {widest}")).is_none());
    }

    #[test]
    fn test_address_literal() {
        assert_eq!(
            address_literal("[192.0.2.1]"),
            Some(IpOctets::V4([192, 0, 2, 1]))
        );
        assert!(matches!(
            address_literal("[IPv6:2001:db8::1]"),
            Some(IpOctets::V6(_))
        ));
        // v6 without the tag, or any other tag, does not validate
        assert_eq!(address_literal("[2001:db8::1]"), None);
        assert_eq!(address_literal("[Other:foo]"), None);
        assert_eq!(address_literal("192.0.2.1"), None);
    }

    #[test]
    fn test_std_conversion() {
        let addr: IpAddr = IpOctets::V4([192, 0, 2, 1]).into();
        assert_eq!(addr.to_string(), "192.0.2.1");
        let addr: IpAddr = IpOctets::V6([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]).into();
        assert_eq!(addr.to_string(), "::1");
    }
}
