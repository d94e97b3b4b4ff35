//! # picnet
//!
//! A concurrent HTTP server and client for applying image transformations
//! (rotate, flip, scale) to images sent over the wire, always returning PNG.

#![deny(clippy::all)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod client;
pub mod config;
pub mod consts;
pub mod dispatcher;
pub mod errors;
pub mod headers;
pub mod http;
pub mod io;
pub mod operation;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;
pub mod stats;
pub mod utils;
pub mod validate;
pub mod worker;

pub use cli::{ClientArgs, ServerArgs};
pub use client::Client;
pub use config::{ClientConfig, ServerConfig};
pub use errors::{NetError, NetParseError, NetResult};
pub use headers::{Header, HeaderName, HeaderValue, Headers};
pub use http::{Method, Status, Version};
pub use io::Connection;
pub use operation::{Operation, Plan};
pub use request::{Request, RequestLine};
pub use response::Response;
pub use server::Server;
pub use stats::Stats;

pub const MAX_HEADERS: u16 = 1024;
pub const READER_BUFSIZE: usize = 2048;
pub const WRITER_BUFSIZE: usize = 2048;
pub const DEFAULT_NAME: &str = concat!(
    env!("CARGO_CRATE_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);
