use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::str::{self, FromStr};

use crate::errors::{NetError, NetParseError, NetResult};
use crate::utils::{self, Trim};

/// A header field name, case-insensitive on comparison.
///
/// Only the small set of names this crate actually emits or reads gets a
/// `Standard` variant; everything else round-trips through `Custom` in its
/// original-but-titlecased form, the same split the teacher's header table
/// uses for the full IANA registry.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum HeaderName {
    Standard(StandardHeaderName),
    Custom(String),
}

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum StandardHeaderName {
    Connection,
    ContentLength,
    ContentType,
    Host,
    UserAgent,
    Server,
}

impl StandardHeaderName {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "Connection",
            Self::ContentLength => "Content-Length",
            Self::ContentType => "Content-Type",
            Self::Host => "Host",
            Self::UserAgent => "User-Agent",
            Self::Server => "Server",
        }
    }
}

impl FromStr for StandardHeaderName {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "connection" => Self::Connection,
            "content-length" => Self::ContentLength,
            "content-type" => Self::ContentType,
            "host" => Self::Host,
            "user-agent" => Self::UserAgent,
            "server" => Self::Server,
            _ => return Err(()),
        })
    }
}

impl Display for HeaderName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<&str> for HeaderName {
    fn from(name: &str) -> Self {
        match StandardHeaderName::from_str(name) {
            Ok(std) => Self::Standard(std),
            Err(()) => Self::Custom(utils::to_titlecase(name.trim().as_bytes())),
        }
    }
}

impl TryFrom<&[u8]> for HeaderName {
    type Error = NetParseError;

    fn try_from(name: &[u8]) -> Result<Self, Self::Error> {
        str::from_utf8(name)
            .map_err(|_| NetParseError::Header)
            .map(Into::into)
    }
}

impl HeaderName {
    pub const CONNECTION: Self = Self::Standard(StandardHeaderName::Connection);
    pub const CONTENT_LENGTH: Self = Self::Standard(StandardHeaderName::ContentLength);
    pub const CONTENT_TYPE: Self = Self::Standard(StandardHeaderName::ContentType);
    pub const HOST: Self = Self::Standard(StandardHeaderName::Host);
    pub const USER_AGENT: Self = Self::Standard(StandardHeaderName::UserAgent);
    pub const SERVER: Self = Self::Standard(StandardHeaderName::Server);

    /// Returns the `HeaderName` as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Standard(std) => std.as_str(),
            Self::Custom(ref raw) => raw.as_str(),
        }
    }

    fn eq_ignore_case(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

/// A header field value, kept as raw bytes (values are not guaranteed UTF-8
/// on the wire, though every value this crate produces is ASCII).
#[derive(Clone, Default, Hash, Eq, PartialEq)]
pub struct HeaderValue(pub Vec<u8>);

impl Display for HeaderValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl Debug for HeaderValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self.as_str())
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        Self(Vec::from(value.trim()))
    }
}

impl From<&[u8]> for HeaderValue {
    fn from(value: &[u8]) -> Self {
        Self(value.trim().to_vec())
    }
}

impl From<u64> for HeaderValue {
    fn from(value: u64) -> Self {
        Self(value.to_string().into_bytes())
    }
}

impl HeaderValue {
    /// Returns the `HeaderValue` as a copy-on-write string slice.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Returns the `HeaderValue` as a bytes slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// A single header field.
#[derive(Clone, Debug)]
pub struct Header(pub HeaderName, pub HeaderValue);

impl TryFrom<&[u8]> for Header {
    type Error = NetError;

    fn try_from(line: &[u8]) -> NetResult<Self> {
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(NetError::Parse(NetParseError::Header))?;

        let (name, value) = line.split_at(colon);
        let value = value[1..].trim_start();

        let name = HeaderName::try_from(name.trim())?;
        let value = HeaderValue::from(value);

        Ok(Self(name, value))
    }
}

/// An ordered multimap of header fields.
///
/// A `BTreeMap<HeaderName, HeaderValue>` (the obvious choice) cannot
/// represent a header repeated under the same name, and loses insertion
/// order; both are observable on the wire, so headers are kept as a plain
/// `Vec` of pairs instead.
#[derive(Clone, Debug, Default)]
pub struct Headers(pub Vec<Header>);

impl Display for Headers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for header in &self.0 {
            writeln!(f, "{}: {}", header.0, header.1)?;
        }

        Ok(())
    }
}

impl Headers {
    /// Returns a new, empty `Headers` collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of the *first* header with the given name, if any.
    #[must_use]
    pub fn get(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.0
            .iter()
            .find(|header| header.0.eq_ignore_case(name))
            .map(|header| &header.1)
    }

    /// Returns true if a header with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &HeaderName) -> bool {
        self.get(name).is_some()
    }

    /// Appends a new header entry, preserving any existing entry under the
    /// same name (headers are allowed to repeat on the wire).
    pub fn push(&mut self, name: HeaderName, value: HeaderValue) {
        self.0.push(Header(name, value));
    }

    /// Inserts a header entry, replacing any existing entries under the same
    /// name. Used for the handful of headers this crate sets exactly once.
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        self.0.retain(|header| !header.0.eq_ignore_case(&name));
        self.push(name, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses one `name: value` line (without its trailing CRLF) and
    /// appends it to this collection.
    pub fn insert_parsed_line(&mut self, line: &[u8]) -> NetResult<()> {
        let Header(name, value) = Header::try_from(line)?;
        self.push(name, value);
        Ok(())
    }

    /// Returns the parsed `Content-Length` value, or 0 if absent/invalid.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.get(&HeaderName::CONTENT_LENGTH)
            .and_then(|v| v.as_str().trim().parse::<u64>().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_header_line() {
        let Header(name, value) = Header::try_from(&b"Content-Type: image/png"[..]).unwrap();
        assert_eq!(name.as_str(), "Content-Type");
        assert_eq!(value.as_str(), "image/png");
    }

    #[test]
    fn preserves_repeated_header_names_in_order() {
        let mut headers = Headers::new();
        headers.push(HeaderName::from("X-Trace"), "a".into());
        headers.push(HeaderName::from("X-Trace"), "b".into());

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(&HeaderName::from("x-trace")).unwrap().as_str(), "a");
    }

    #[test]
    fn set_replaces_all_prior_entries() {
        let mut headers = Headers::new();
        headers.push(HeaderName::CONTENT_LENGTH, "1".into());
        headers.set(HeaderName::CONTENT_LENGTH, "2".into());

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.content_length(), 2);
    }
}
