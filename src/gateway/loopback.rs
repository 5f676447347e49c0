//! Loopback-address equivalence.
//!
//! Hosts are compared by exact, case-insensitive equality against the alias
//! set (or by IP loopback range), never by prefix: `localhost.example.com`
//! is not loopback.

use url::{Host, Url};

/// Host spellings that denote this machine.
pub const LOOPBACK_ALIASES: [&str; 4] = ["localhost", "loopback", "127.0.0.1", "[::1]"];

/// True if the URL's host is a loopback address.
pub fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        Some(Host::Domain(domain)) => LOOPBACK_ALIASES
            .iter()
            .any(|alias| domain.eq_ignore_ascii_case(alias)),
        None => false,
    }
}

/// Both URLs point at this machine on the same port.
pub fn same_loopback(a: &Url, b: &Url) -> bool {
    is_loopback(a) && is_loopback(b) && a.port_or_known_default() == b.port_or_known_default()
}
