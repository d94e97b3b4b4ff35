use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::errors::{NetError, NetParseError, NetResult};
use crate::headers::Headers;
use crate::http::{Method, Version};
use crate::utils::Trim;

/// The first line of an HTTP request: method, target, and version.
#[derive(Clone, Debug)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: Version,
}

impl Display for RequestLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {} {}", self.method, self.target, self.version)
    }
}

impl TryFrom<&[u8]> for RequestLine {
    type Error = NetError;

    fn try_from(line: &[u8]) -> NetResult<Self> {
        let line = line.trim();
        let mut tokens = line.splitn(3, |&b| b == b' ');

        let method = tokens
            .next()
            .ok_or(NetError::Parse(NetParseError::Method))
            .and_then(|bytes| Method::try_from(bytes).map_err(NetError::from))?;

        let target = tokens
            .next()
            .ok_or(NetError::Parse(NetParseError::Path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())?;

        let version = tokens
            .next()
            .ok_or(NetError::Parse(NetParseError::Version))
            .and_then(|bytes| Version::try_from(bytes).map_err(NetError::from))?;

        Ok(Self { method, target, version })
    }
}

/// A fully-read HTTP request: request line, headers, and raw body.
#[derive(Clone, Debug)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    /// Returns a reference to the request's `Method`.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.request_line.method
    }

    /// Returns the request target (path, plus any embedded operation tail).
    #[must_use]
    pub fn target(&self) -> &str {
        self.request_line.target.as_str()
    }

    /// Returns the request body length in bytes.
    #[must_use]
    pub fn body_len(&self) -> u64 {
        self.body.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_post_request_line() {
        let line = RequestLine::try_from(&b"POST /rotate,90 HTTP/1.1"[..]).unwrap();
        assert_eq!(line.method, Method::Post);
        assert_eq!(line.target, "/rotate,90");
        assert_eq!(line.version, Version::OneDotOne);
    }

    #[test]
    fn rejects_a_truncated_request_line() {
        assert!(RequestLine::try_from(&b"GET /"[..]).is_err());
    }
}
