//! Shared constants drawn directly from the wire contract.

/// Maximum accepted request body size: 8 MiB.
pub const MAX_BODY_LEN: u64 = 8 * 1024 * 1024;

/// Fixed path of the static home-page asset served for `GET /`.
pub const HOME_PAGE_PATH: &str = "/local/courses/csse2310/resources/a4/home.html";

/// Default listen backlog used when `--max` is not given.
pub const DEFAULT_BACKLOG: i32 = 128;

pub const ROTATE_ANGLE_MIN: i32 = -359;
pub const ROTATE_ANGLE_MAX: i32 = 359;
pub const SCALE_DIM_MIN: u32 = 1;
pub const SCALE_DIM_MAX: u32 = 10_000;

pub const PORT_MIN: u16 = 1024;
pub const PORT_MAX: u16 = 65535;
pub const MAX_CONNECTIONS_CAP: u32 = 10_000;

// Server exit codes.
pub const EXIT_SERVER_CLI_ERROR: i32 = 15;
pub const EXIT_SERVER_LISTEN_ERROR: i32 = 3;
pub const EXIT_SERVER_ACCEPT_ERROR: i32 = 4;

// Client exit codes.
pub const EXIT_CLIENT_CLI_ERROR: i32 = 7;
pub const EXIT_CLIENT_OUTPUT_OPEN_ERROR: i32 = 2;
pub const EXIT_CLIENT_NON_200: i32 = 4;
pub const EXIT_CLIENT_WRITE_ERROR: i32 = 5;
pub const EXIT_CLIENT_INPUT_OPEN_ERROR: i32 = 8;
pub const EXIT_CLIENT_EMPTY_IMAGE: i32 = 17;
pub const EXIT_CLIENT_CONNECTION_CLOSED: i32 = 15;
pub const EXIT_CLIENT_CANNOT_CONNECT: i32 = 19;
pub const EXIT_CLIENT_SUCCESS: i32 = 0;
