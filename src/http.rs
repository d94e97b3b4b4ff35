use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::num::NonZeroU16;
use std::str::{self, FromStr};

use crate::NetParseError;

/// The HTTP method named on a request line.
///
/// Unlike a strict parser, this never fails to parse: any token that is not
/// one of the standard verbs is kept as `Other` so the request validator can
/// still apply its "method not in {GET, POST}" gate to it.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Trace,
    Options,
    Connect,
    Other(String),
}

impl Default for Method {
    fn default() -> Self {
        Self::Get
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = NetParseError;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        Ok(match method {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "TRACE" => Self::Trace,
            "OPTIONS" => Self::Options,
            "CONNECT" => Self::Connect,
            other => Self::Other(other.to_string()),
        })
    }
}

impl TryFrom<&[u8]> for Method {
    type Error = NetParseError;

    fn try_from(method: &[u8]) -> Result<Self, Self::Error> {
        str::from_utf8(method)
            .map_err(|_| NetParseError::Method)
            .and_then(Self::from_str)
    }
}

impl Method {
    /// Returns the `Method` as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Trace => "TRACE",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Other(ref raw) => raw.as_str(),
        }
    }

    /// True for exactly the two verbs this server's request grammar accepts.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Get | Self::Post)
    }
}

/// The HTTP response status.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Status(pub NonZeroU16);

impl Default for Status {
    fn default() -> Self {
        Self(NonZeroU16::new(200).unwrap())
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u16> for Status {
    type Error = NetParseError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        if !matches!(code, 100..=999) {
            return Err(NetParseError::Status);
        }

        NonZeroU16::new(code).map(Self).ok_or(NetParseError::Status)
    }
}

impl TryFrom<&[u8]> for Status {
    type Error = NetParseError;

    fn try_from(code: &[u8]) -> Result<Self, Self::Error> {
        str::from_utf8(code)
            .map_err(|_| NetParseError::Status)
            .and_then(|s| s.parse::<u16>().map_err(|_| NetParseError::Status))
            .and_then(Self::try_from)
    }
}

macro_rules! impl_status_methods {
    ($( $num:literal, $reason:literal; )+) => {
        impl Status {
            /// Returns the `Status` as a copy-on-write string slice, e.g.
            /// `"404 Not Found"` (code and reason phrase together, as they
            /// appear on the wire).
            #[must_use]
            pub fn as_str(&self) -> Cow<'static, str> {
                match self.code() {
                    $( $num => concat!($num, " ", $reason).into(), )+
                    code => format!("{code}").into(),
                }
            }

            /// Returns this status's fixed reason phrase, without the code.
            #[must_use]
            pub const fn reason(&self) -> Option<&'static str> {
                match self.code() {
                    $( $num => Some($reason), )+
                    _ => None,
                }
            }

            /// Returns the status code as a `u16`.
            #[must_use]
            pub const fn code(&self) -> u16 {
                self.0.get()
            }
        }
    };
}

impl_status_methods! {
    200, "OK";
    400, "Bad Request";
    404, "Not Found";
    405, "Method Not Allowed";
    413, "Payload Too Large";
    422, "Unprocessable Content";
    500, "Internal Server Error";
    501, "Not Implemented";
}

impl Status {
    /// Returns true if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.code(), 200..=299)
    }
}

/// The HTTP protocol version.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Version {
    OneDotZero,
    OneDotOne,
}

impl Default for Version {
    fn default() -> Self {
        Self::OneDotOne
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = NetParseError;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        match version {
            "HTTP/1.0" => Ok(Self::OneDotZero),
            "HTTP/1.1" => Ok(Self::OneDotOne),
            _ => Err(NetParseError::Version),
        }
    }
}

impl TryFrom<&[u8]> for Version {
    type Error = NetParseError;

    fn try_from(version: &[u8]) -> Result<Self, Self::Error> {
        str::from_utf8(version)
            .map_err(|_| NetParseError::Version)
            .and_then(Self::from_str)
    }
}

impl Version {
    /// Returns the protocol `Version` as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneDotZero => "HTTP/1.0",
            Self::OneDotOne => "HTTP/1.1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_allows_only_get_and_post() {
        assert!(Method::Get.is_allowed());
        assert!(Method::Post.is_allowed());
        assert!(!Method::Put.is_allowed());
        assert!(!Method::from_str("WHATEVER").unwrap().is_allowed());
    }

    #[test]
    fn status_display_matches_reason_table() {
        assert_eq!(Status::try_from(422u16).unwrap().as_str(), "422 Unprocessable Content");
        assert_eq!(Status::try_from(405u16).unwrap().as_str(), "405 Method Not Allowed");
        assert_eq!(Status::try_from(422u16).unwrap().reason(), Some("Unprocessable Content"));
    }

    #[test]
    fn version_parses_1_0_and_1_1_only() {
        assert_eq!(Version::from_str("HTTP/1.1").unwrap(), Version::OneDotOne);
        assert!(Version::from_str("HTTP/2").is_err());
    }
}
