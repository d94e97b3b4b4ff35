/// Byte-slice trimming helpers used while parsing request/response framing.
pub trait Trim {
    fn trim_start(&self) -> &[u8];
    fn trim_end(&self) -> &[u8];
    fn trim(&self) -> &[u8];
}

impl Trim for [u8] {
    /// Trim whitespace from the beginning of a bytes slice.
    fn trim_start(&self) -> &[u8] {
        let mut bytes = self;

        while let [first, rest @ ..] = bytes {
            if first.is_ascii_whitespace() {
                bytes = rest;
            } else {
                break;
            }
        }

        bytes
    }

    /// Trim whitespace from the end of a bytes slice.
    fn trim_end(&self) -> &[u8] {
        let mut bytes = self;

        while let [rest @ .., last] = bytes {
            if last.is_ascii_whitespace() {
                bytes = rest;
            } else {
                break;
            }
        }

        bytes
    }

    /// Trim whitespace from the beginning and the end of a bytes slice.
    fn trim(&self) -> &[u8] {
        self.trim_start().trim_end()
    }
}

/// Converts a slice of bytes to a titlecase `String` (`content-type` ->
/// `Content-Type`), used when rendering a custom (non-standard) header name.
#[must_use]
pub fn to_titlecase(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    let mut title = String::with_capacity(bytes.len());

    bytes
        .split(|&b| b == b'-')
        .filter(|&part| !part.is_empty())
        .for_each(|part| {
            if let Some((first, rest)) = part.split_first() {
                if !title.is_empty() {
                    title.push('-');
                }

                title.push(first.to_ascii_uppercase() as char);

                if !rest.is_empty() {
                    title.push_str(&String::from_utf8_lossy(rest));
                }
            }
        });

    title
}
