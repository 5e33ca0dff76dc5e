//! `ipv4`, `ipv6`, `uri` and `uuid`.

use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use uuid::Uuid;

static URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:(?:[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9A-Fa-f]{2})*$")
        .expect("valid uri regex")
});

pub(super) fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

/// Zone identifiers (`fe80::1%eth0`) are rejected.
pub(super) fn is_ipv6(value: &str) -> bool {
    !value.contains('%') && value.parse::<Ipv6Addr>().is_ok()
}

/// An absolute URI: a scheme followed by URI characters only.
pub(super) fn is_uri(value: &str) -> bool {
    URI.is_match(value) && Url::parse(value).is_ok()
}

/// Only the hyphenated 8-4-4-4-12 form is accepted.
pub(super) fn is_uuid(value: &str) -> bool {
    let bytes = value.as_bytes();
    value.len() == 36
        && [8, 13, 18, 23].iter().all(|&i| bytes[i] == b'-')
        && Uuid::parse_str(value).is_ok()
}
