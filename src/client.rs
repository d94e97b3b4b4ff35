//! Client top-level wiring: read input, send one request, write output.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use log::debug;

use crate::cli::ClientArgs;
use crate::config::ClientConfig;
use crate::consts::{
    EXIT_CLIENT_CANNOT_CONNECT, EXIT_CLIENT_CONNECTION_CLOSED, EXIT_CLIENT_EMPTY_IMAGE,
    EXIT_CLIENT_INPUT_OPEN_ERROR, EXIT_CLIENT_NON_200, EXIT_CLIENT_OUTPUT_OPEN_ERROR, EXIT_CLIENT_SUCCESS,
    EXIT_CLIENT_WRITE_ERROR,
};
use crate::headers::{HeaderName, Headers};
use crate::io::Connection;

/// Drives one client run end to end, exiting the process with the
/// appropriate code from §6 rather than returning.
pub struct Client {
    config: ClientConfig,
}

impl Client {
    #[must_use]
    pub fn new(args: &ClientArgs) -> Self {
        let operation = args.operation();
        Self {
            config: ClientConfig {
                port: args.portno,
                input: args.input.clone(),
                output: args.output.clone(),
                operation,
            },
        }
    }

    pub fn run(self) -> ! {
        let body = read_input(self.config.input.as_deref());

        if body.is_empty() {
            eprintln!("Image is empty");
            process::exit(EXIT_CLIENT_EMPTY_IMAGE);
        }

        let Some(operation) = self.config.operation else {
            eprintln!("At most one transform option may be given");
            process::exit(crate::consts::EXIT_CLIENT_CLI_ERROR);
        };

        let mut conn = match self.config.connect() {
            Ok(stream) => Connection::try_from(stream).unwrap_or_else(|e| {
                eprintln!("cannot connect: {e}");
                process::exit(EXIT_CLIENT_CANNOT_CONNECT);
            }),
            Err(e) => {
                eprintln!("cannot connect: {e}");
                process::exit(EXIT_CLIENT_CANNOT_CONNECT);
            },
        };

        let target = format!("/{operation}");
        let request_line = format!("POST {target} HTTP/1.1");

        let mut headers = Headers::new();
        headers.set(HeaderName::CONTENT_LENGTH, (body.len() as u64).into());

        if let Err(e) = conn.send_request(&request_line, &headers, &body) {
            debug!("write failed: {e}");
            eprintln!("connection closed before request could be sent");
            process::exit(EXIT_CLIENT_CONNECTION_CLOSED);
        }

        let response = match conn.recv_response() {
            Ok(response) => response,
            Err(e) => {
                debug!("read failed: {e}");
                eprintln!("server closed connection before response complete");
                process::exit(EXIT_CLIENT_CONNECTION_CLOSED);
            },
        };

        if !response.status.is_success() {
            // A non-2xx response with an empty body exits silently: the
            // redesigned contract treats "no diagnostic body" as nothing
            // worth printing, not as success.
            if !response.body.is_empty() {
                let _ = io::stderr().write_all(&response.body);
            }
            process::exit(EXIT_CLIENT_NON_200);
        }

        write_output(self.config.output.as_deref(), &response.body);
        process::exit(EXIT_CLIENT_SUCCESS);
    }
}

/// Reads the full input image into memory, from `--input` or stdin.
/// Exits with the input-open exit code on any I/O failure.
fn read_input(path: Option<&str>) -> Vec<u8> {
    let result = match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map(|_| buf)
        },
    };

    result.unwrap_or_else(|e| {
        eprintln!("failed to read input: {e}");
        process::exit(EXIT_CLIENT_INPUT_OPEN_ERROR);
    })
}

/// Writes the response body to `--output` or stdout. Exits with the
/// appropriate exit code on open or write failure.
fn write_output(path: Option<&str>, body: &[u8]) {
    let result = match path {
        Some(path) => fs::write(path, body).map_err(|e| (EXIT_CLIENT_OUTPUT_OPEN_ERROR, e)),
        None => io::stdout().write_all(body).map_err(|e| (EXIT_CLIENT_WRITE_ERROR, e)),
    };

    if let Err((code, e)) = result {
        eprintln!("failed to write output: {e}");
        process::exit(code);
    }
}
