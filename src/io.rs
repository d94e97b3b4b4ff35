use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::net::{SocketAddr, TcpStream};

use crate::errors::{NetError, NetParseError, NetResult};
use crate::headers::Headers;
use crate::request::{Request, RequestLine};
use crate::response::Response;
use crate::{MAX_HEADERS, READER_BUFSIZE, WRITER_BUFSIZE};

/// The TCP connection between a client and a server, split into an
/// independently-buffered read half and write half.
///
/// This is the sole component that touches a raw socket; everything above
/// it in the call stack reads and writes typed `Request`/`Response` values.
#[derive(Debug)]
pub struct Connection {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    pub local_addr: SocketAddr,
    pub remote_addr: SocketAddr,
}

impl TryFrom<TcpStream> for Connection {
    type Error = NetError;

    fn try_from(stream: TcpStream) -> NetResult<Self> {
        let local_addr = stream.local_addr()?;
        let remote_addr = stream.peer_addr()?;

        let read_half = stream.try_clone()?;
        let reader = BufReader::with_capacity(READER_BUFSIZE, read_half);
        let writer = BufWriter::with_capacity(WRITER_BUFSIZE, stream);

        Ok(Self { reader, writer, local_addr, remote_addr })
    }
}

impl TryFrom<&str> for Connection {
    type Error = NetError;

    fn try_from(addr: &str) -> NetResult<Self> {
        TcpStream::connect(addr)
            .map_err(|_| NetError::ConnectFailure)
            .and_then(Self::try_from)
    }
}

impl Connection {
    /// Reads and parses one `RequestLine`.
    ///
    /// Returns `Ok(None)` on a clean peer close (zero bytes read), which the
    /// worker treats as end-of-connection rather than an error to report.
    fn recv_request_line(&mut self, buf: &mut Vec<u8>) -> NetResult<Option<RequestLine>> {
        match self.reader.read_until(b'\n', buf) {
            Ok(0) => Ok(None),
            Ok(_) => RequestLine::try_from(&buf[..]).map(Some),
            Err(e) => Err(NetError::Read(e.kind())),
        }
    }

    fn recv_headers(&mut self, buf: &mut Vec<u8>) -> NetResult<Headers> {
        let mut headers = Headers::new();
        let mut count: u16 = 0;

        loop {
            if count >= MAX_HEADERS {
                return Err(NetParseError::TooManyHeaders.into());
            }

            buf.clear();

            match self.reader.read_until(b'\n', buf) {
                Err(e) => return Err(NetError::Read(e.kind())),
                Ok(0) => return Err(NetError::UnexpectedEof),
                Ok(_) => {
                    let trimmed = crate::utils::Trim::trim(&buf[..]);

                    if trimmed.is_empty() {
                        break;
                    }

                    headers.insert_parsed_line(trimmed)?;
                },
            }

            count += 1;
        }

        Ok(headers)
    }

    fn recv_body(&mut self, content_len: u64) -> NetResult<Vec<u8>> {
        if content_len == 0 {
            return Ok(Vec::new());
        }

        let mut body = Vec::with_capacity(content_len.min(1 << 20) as usize);
        self.reader.by_ref().take(content_len).read_to_end(&mut body)?;

        Ok(body)
    }

    /// Reads one full `Request` off the wire.
    ///
    /// Returns `Ok(None)` when the peer closed the connection cleanly before
    /// sending a new request, which is the normal end of a keep-alive loop.
    pub fn recv_request(&mut self) -> NetResult<Option<Request>> {
        let mut buf = Vec::with_capacity(1024);

        let Some(request_line) = self.recv_request_line(&mut buf)? else {
            return Ok(None);
        };
        buf.clear();

        let headers = self.recv_headers(&mut buf)?;
        let content_len = headers.content_length();
        let body = self.recv_body(content_len)?;

        Ok(Some(Request { request_line, headers, body }))
    }

    /// Reads one full `Response` off the wire (used by the client).
    pub fn recv_response(&mut self) -> NetResult<Response> {
        use crate::http::{Status, Version};

        let mut buf = Vec::with_capacity(1024);

        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => return Err(NetError::UnexpectedEof),
            Ok(_) => {},
            Err(e) => return Err(NetError::Read(e.kind())),
        }

        let line = crate::utils::Trim::trim(&buf[..]);
        let mut parts = line.splitn(3, |&b| b == b' ');

        let version = parts
            .next()
            .ok_or(NetError::Parse(NetParseError::StatusLine))
            .and_then(|b| Version::try_from(b).map_err(NetError::from))?;

        let status = parts
            .next()
            .ok_or(NetError::Parse(NetParseError::StatusLine))
            .and_then(|b| Status::try_from(b).map_err(NetError::from))?;

        buf.clear();
        let headers = self.recv_headers(&mut buf)?;
        let content_len = headers.content_length();
        let body = self.recv_body(content_len)?;

        Ok(Response { version, status, headers, body })
    }

    /// Writes one `Response`, flushing before returning.
    pub fn send_response(&mut self, res: &Response) -> NetResult<()> {
        let status_line = format!("{} {}\r\n", res.version, res.status);
        self.writer.write_all(status_line.as_bytes())?;
        self.writer.write_all(res.headers.to_string().as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.write_all(&res.body)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Writes one request line, headers, and body (used by the client).
    pub fn send_request(&mut self, request_line: &str, headers: &Headers, body: &[u8]) -> NetResult<()> {
        self.writer.write_all(request_line.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.write_all(headers.to_string().as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.write_all(body)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    #[test]
    fn round_trips_a_request_and_response() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut conn = Connection::try_from(stream).unwrap();
            let req = conn.recv_request().unwrap().unwrap();
            assert_eq!(req.target(), "/rotate,0");
            let res = Response::new(200, "image/png", vec![9, 9, 9]);
            conn.send_response(&res).unwrap();
        });

        let stream = TcpStream::connect(addr).unwrap();
        let mut conn = Connection::try_from(stream).unwrap();
        let headers = Headers::new();
        conn.send_request("POST /rotate,0 HTTP/1.1", &headers, &[]).unwrap();

        let res = conn.recv_response().unwrap();
        assert_eq!(res.status.code(), 200);
        assert_eq!(res.body, vec![9, 9, 9]);

        server.join().unwrap();
    }
}
