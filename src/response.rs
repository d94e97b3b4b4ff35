use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::headers::{HeaderName, Headers};
use crate::http::{Status, Version};

/// A complete HTTP response: status line, headers, and body bytes.
#[derive(Clone, Debug)]
pub struct Response {
    pub version: Version,
    pub status: Status,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{} {}", self.version, self.status)?;
        write!(f, "{}", self.headers)
    }
}

impl Response {
    /// Builds a response with the given status, content type, and body,
    /// with `Content-Length` set from the body's length.
    #[must_use]
    pub fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        let status = Status::try_from(status).unwrap_or_else(|_| {
            Status::try_from(500u16).expect("500 is a valid status code")
        });

        let mut headers = Headers::new();
        headers.set(HeaderName::CONTENT_TYPE, content_type.into());
        headers.set(HeaderName::CONTENT_LENGTH, (body.len() as u64).into());

        Self { version: Version::OneDotOne, status, headers, body }
    }

    /// Builds a plain-text error response whose body is `message` verbatim
    /// (the caller supplies the trailing newline per the wire contract).
    #[must_use]
    pub fn text_error(status: u16, message: String) -> Self {
        Self::new(status, "text/plain", message.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_content_length_from_body() {
        let res = Response::new(200, "image/png", vec![1, 2, 3]);
        assert_eq!(res.headers.content_length(), 3);
    }

    #[test]
    fn text_error_carries_message_verbatim() {
        let res = Response::text_error(404, "Invalid address in GET request\n".to_string());
        assert_eq!(res.body, b"Invalid address in GET request\n");
        assert_eq!(res.status.code(), 404);
    }
}
