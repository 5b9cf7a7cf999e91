//! String format grammars for the `format` constraint
//!
//! Copyright (c) 2025 Reshape Team
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use std::net::Ipv6Addr;
use std::sync::OnceLock;

static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
static DATE_TIME_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Named string formats understood by the string validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Date,
    DateTime,
    Email,
    Uuid,
    Uri,
    Hostname,
    Ipv4,
    Ipv6,
}

impl StringFormat {
    /// Every supported format
    pub const ALL: [StringFormat; 8] = [
        StringFormat::Date,
        StringFormat::DateTime,
        StringFormat::Email,
        StringFormat::Uuid,
        StringFormat::Uri,
        StringFormat::Hostname,
        StringFormat::Ipv4,
        StringFormat::Ipv6,
    ];

    /// Look up a format by its constraint name; unknown names yield `None`
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.name() == name)
    }

    /// Constraint name of this format
    pub fn name(&self) -> &'static str {
        match self {
            StringFormat::Date => "date",
            StringFormat::DateTime => "date-time",
            StringFormat::Email => "email",
            StringFormat::Uuid => "uuid",
            StringFormat::Uri => "uri",
            StringFormat::Hostname => "hostname",
            StringFormat::Ipv4 => "ipv4",
            StringFormat::Ipv6 => "ipv6",
        }
    }

    /// Whether `value` conforms to this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            StringFormat::Date => is_date(value),
            StringFormat::DateTime => is_date_time(value),
            StringFormat::Email => is_email(value),
            StringFormat::Uuid => is_uuid(value),
            StringFormat::Uri => is_uri(value),
            StringFormat::Hostname => is_hostname(value),
            StringFormat::Ipv4 => is_ipv4(value),
            StringFormat::Ipv6 => is_ipv6(value),
        }
    }
}

impl std::fmt::Display for StringFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict `YYYY-MM-DD` naming a real calendar day
pub fn is_date(value: &str) -> bool {
    let shape = DATE_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date regex is valid")
    });
    shape.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// `YYYY-MM-DDTHH:mm:ss[.fraction](Z|±HH:MM)` naming a real instant
pub fn is_date_time(value: &str) -> bool {
    let shape = DATE_TIME_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$")
            .expect("date-time regex is valid")
    });
    shape.is_match(value) && DateTime::parse_from_rfc3339(value).is_ok()
}

/// Permissive local part, `@`, and a host with at least one dot
pub fn is_email(value: &str) -> bool {
    let shape = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email regex is valid")
    });
    shape.is_match(value)
}

/// Canonical 8-4-4-4-12 hex groups, any case
pub fn is_uuid(value: &str) -> bool {
    let shape = UUID_REGEX.get_or_init(|| {
        Regex::new(
            r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
        )
        .expect("uuid regex is valid")
    });
    shape.is_match(value)
}

/// Leading `scheme:`; `http` and `https` URIs must also parse with a host
pub fn is_uri(value: &str) -> bool {
    let scheme = SCHEME_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("uri scheme regex is valid")
    });
    let Some(captures) = scheme.captures(value) else {
        return false;
    };

    let scheme = captures[1].to_ascii_lowercase();
    if scheme == "http" || scheme == "https" {
        return url::Url::parse(value)
            .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
            .unwrap_or(false);
    }
    true
}

/// RFC 1123 host name: dot-separated labels of 1-63 alphanumerics or
/// hyphens, never starting or ending with a hyphen, 253 characters at most
pub fn is_hostname(value: &str) -> bool {
    if value.is_empty() || value.len() > 253 {
        return false;
    }
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Four dot-separated decimal octets, each 0-255
pub fn is_ipv4(value: &str) -> bool {
    let octets: Vec<&str> = value.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            (1..=3).contains(&octet.len())
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u16>().is_ok_and(|n| n <= 255)
        })
}

/// Full or compressed colon-hex groups
pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}
