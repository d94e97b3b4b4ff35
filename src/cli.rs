//! Command-line argument definitions for both binaries.
//!
//! Parsing, range-checking, and usage-error reporting are handled entirely
//! by `clap`'s derive macros; this module only states the shapes.

use clap::{Args, Parser};

use crate::consts::{MAX_CONNECTIONS_CAP, PORT_MAX};
use crate::operation::{FlipDirection, Operation};

/// Image-processing HTTP server.
#[derive(Parser, Clone, Copy, Debug)]
#[command(name = "imgserver")]
pub struct ServerArgs {
    /// Port to listen on; 0 requests an ephemeral port from the OS.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u16).range(0..=i64::from(PORT_MAX)))]
    pub port: u16,

    /// Maximum number of concurrent connections; unbounded if omitted.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_CONNECTIONS_CAP)))]
    pub max: Option<u32>,
}

/// Image-processing HTTP client.
#[derive(Parser, Clone, Debug)]
#[command(name = "imgclient")]
pub struct ClientArgs {
    /// Port the server is listening on.
    pub portno: u16,

    /// Path to the input image; standard input if omitted.
    #[arg(long)]
    pub input: Option<String>,

    /// Path to write the response body to; standard output if omitted.
    #[arg(long)]
    pub output: Option<String>,

    #[command(flatten)]
    pub transform: TransformArgs,
}

/// At most one of these may be given; `clap` enforces mutual exclusion.
#[derive(Args, Clone, Debug, Default)]
#[group(multiple = false)]
pub struct TransformArgs {
    /// Rotate by this many degrees, in [-359, 359].
    #[arg(long, allow_hyphen_values = true)]
    pub rotate: Option<i32>,

    /// Scale to WIDTH HEIGHT, each in [1, 10000].
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    pub scale: Option<Vec<u32>>,

    /// Flip direction: "h" or "v".
    #[arg(long)]
    pub flip: Option<String>,
}

impl ClientArgs {
    /// Translates the mutually-exclusive transform flags into a single
    /// `Operation`, defaulting to an identity `Rotate { angle: 0 }` when
    /// none were given.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        if let Some(angle) = self.transform.rotate {
            return Some(Operation::Rotate { angle });
        }

        if let Some(dims) = &self.transform.scale {
            if let [width, height] = dims[..] {
                return Some(Operation::Scale { width, height });
            }
        }

        if let Some(direction) = &self.transform.flip {
            let direction = match direction.as_str() {
                "h" => FlipDirection::Horizontal,
                "v" => FlipDirection::Vertical,
                _ => return None,
            };
            return Some(Operation::Flip { direction });
        }

        Some(Operation::Rotate { angle: 0 })
    }
}
