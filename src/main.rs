use clap::Parser as _;
use log::debug;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::process::ExitCode;

use addr_codec::{Fqdn, IpAddress, Path};

const EXIT_VALID: u8 = 0;
const EXIT_NO_KIND: u8 = 40;
const EXIT_UNPARSABLE: u8 = 41;
const EXIT_INVALID: u8 = 42;
const EXIT_BAD_LITERAL: u8 = 43;

#[derive(clap::Parser)]
#[command(
    name = "addr-codec",
    version,
    about = "Check RFC 5322 / RFC 5321 email addresses, domains and IP literals"
)]
struct Arguments {
    /// Check a bare addr-spec (local@domain)
    #[arg(long, group = "kind")]
    addrspec: bool,
    /// Check a single mailbox (name-addr or addr-spec)
    #[arg(long, group = "kind")]
    mailbox: bool,
    /// Check a single address (mailbox or group)
    #[arg(long, group = "kind")]
    address: bool,
    /// Check a comma-separated mailbox list
    #[arg(long, group = "kind")]
    mailboxlist: bool,
    /// Check a comma-separated address list, groups included
    #[arg(long, group = "kind")]
    addresslist: bool,
    /// Check a fully qualified domain name
    #[arg(long, group = "kind")]
    domain: bool,
    /// Check a dotted-quad IPv4 address
    #[arg(long, group = "kind")]
    ipv4: bool,
    /// Check an IPv6 address
    #[arg(long, group = "kind")]
    ipv6: bool,
    /// Inputs to check; without a type flag each input is dumped
    /// diagnostically
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,
}

enum Kind {
    AddrSpec,
    Mailbox,
    Address,
    MailboxList,
    AddressList,
    Domain,
    Ipv4,
    Ipv6,
}

impl Arguments {
    fn kind(&self) -> Option<Kind> {
        match () {
            _ if self.addrspec => Some(Kind::AddrSpec),
            _ if self.mailbox => Some(Kind::Mailbox),
            _ if self.address => Some(Kind::Address),
            _ if self.mailboxlist => Some(Kind::MailboxList),
            _ if self.addresslist => Some(Kind::AddressList),
            _ if self.domain => Some(Kind::Domain),
            _ if self.ipv4 => Some(Kind::Ipv4),
            _ if self.ipv6 => Some(Kind::Ipv6),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let arguments = Arguments::parse();

    let Some(kind) = arguments.kind() else {
        for input in &arguments.inputs {
            dump(input);
        }
        return ExitCode::from(EXIT_NO_KIND);
    };

    let mut code = EXIT_VALID;
    for input in &arguments.inputs {
        match check(&kind, input) {
            Ok(canonical) => println!("{canonical}"),
            Err(failure) => {
                debug!("{input:?}: exit {failure}");
                if code == EXIT_VALID {
                    code = failure;
                }
            }
        }
    }
    ExitCode::from(code)
}

// On success the canonical form; on failure the exit code and no output.
fn check(kind: &Kind, input: &str) -> Result<String, u8> {
    match kind {
        Kind::AddrSpec => {
            let spec = Path::of(input)
                .and_then(|p| p.as_addr_spec())
                .ok_or(EXIT_UNPARSABLE)?;
            if spec.valid {
                Ok(spec.to_string())
            } else {
                Err(EXIT_INVALID)
            }
        }
        Kind::Mailbox | Kind::Address => {
            let allow_groups = matches!(kind, Kind::Address);
            let sender = Path::of(input)
                .and_then(|p| p.for_sender(allow_groups))
                .ok_or(EXIT_UNPARSABLE)?;
            if sender.is_valid() {
                Ok(sender.to_string())
            } else {
                Err(EXIT_INVALID)
            }
        }
        Kind::MailboxList | Kind::AddressList => {
            let path = Path::of(input).ok_or(EXIT_UNPARSABLE)?;
            let list = match kind {
                Kind::MailboxList => path.as_mailbox_list(),
                _ => path.as_address_list(),
            }
            .ok_or(EXIT_UNPARSABLE)?;
            if list.valid {
                Ok(list.to_string())
            } else {
                Err(EXIT_INVALID)
            }
        }
        Kind::Domain => {
            let fqdn = Fqdn::of(input).ok_or(EXIT_BAD_LITERAL)?;
            if fqdn.is_domain() {
                Ok(input.to_string())
            } else {
                Err(EXIT_BAD_LITERAL)
            }
        }
        Kind::Ipv4 => {
            let quad = IpAddress::of(input)
                .and_then(|ip| ip.v4())
                .ok_or(EXIT_BAD_LITERAL)?;
            Ok(Ipv4Addr::from(quad).to_string())
        }
        Kind::Ipv6 => {
            let octets = IpAddress::of(input)
                .and_then(|ip| ip.v6())
                .ok_or(EXIT_BAD_LITERAL)?;
            Ok(Ipv6Addr::from(octets).to_string())
        }
    }
}

// The no-flag mode: report everything the input could be.
fn dump(input: &str) {
    println!("{input:?}:");
    match Path::of(input).and_then(|p| p.as_addr_spec()) {
        Some(spec) => println!("  addr-spec:    {} (valid: {})", spec, spec.valid),
        None => println!("  addr-spec:    no"),
    }
    match Path::of(input).and_then(|p| p.as_mailbox_list()) {
        Some(list) => println!("  mailbox-list: {} (valid: {})", list, list.valid),
        None => println!("  mailbox-list: no"),
    }
    match Path::of(input).and_then(|p| p.as_address_list()) {
        Some(list) => println!(
            "  address-list: {} (valid: {}, groups: {})",
            list, list.valid, list.is_address_list
        ),
        None => println!("  address-list: no"),
    }
    let is_domain = Fqdn::of(input).map(|f| f.is_domain()).unwrap_or(false);
    println!("  domain:       {}", if is_domain { "yes" } else { "no" });
    if let Some(ip) = IpAddress::of(input) {
        if let Some(quad) = ip.v4() {
            println!("  ipv4:         {}", Ipv4Addr::from(quad));
        }
        if let Some(octets) = ip.v6() {
            println!("  ipv6:         {}", Ipv6Addr::from(octets));
        }
    }
}
