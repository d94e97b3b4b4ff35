//! The connection worker (C7): the per-connection keep-alive loop that
//! orchestrates framing, validation, the plan builder, and the pipeline.

use std::net::TcpStream;

use log::{debug, warn};

use crate::io::Connection;
use crate::pipeline::{self, PipelineOutcome};
use crate::request::Request;
use crate::response::Response;
use crate::stats::Stats;
use crate::validate::{self, Verdict};

/// Services one accepted connection until the peer closes it or a read
/// fails. Never panics on a per-request error; those become responses.
pub fn serve(stream: TcpStream, stats: Stats) {
    stats.worker_connected();

    let mut conn = match Connection::try_from(stream) {
        Ok(conn) => conn,
        Err(e) => {
            warn!("failed to set up connection: {e}");
            stats.worker_released();
            return;
        },
    };

    loop {
        match conn.recv_request() {
            Ok(Some(req)) => {
                let response = handle(&req, &stats);
                let success = response.status.is_success();

                if let Err(e) = conn.send_response(&response) {
                    debug!("write failed, ending connection: {e}");
                    stats.response_sent(success);
                    break;
                }

                stats.response_sent(success);
            },
            Ok(None) => break,
            Err(e) => {
                debug!("read failed, ending connection: {e}");
                break;
            },
        }
    }

    stats.worker_released();
}

/// Runs one request through validation and, if accepted, the pipeline.
fn handle(req: &Request, stats: &Stats) -> Response {
    match validate::validate(req) {
        Verdict::Rejected(response) => response,
        Verdict::Accepted(plan) => match pipeline::run(&req.body, &plan) {
            PipelineOutcome::Success { response, stages_completed } => {
                stats.stages_completed(stages_completed);
                response
            },
            PipelineOutcome::DecodeFailed(response) => response,
            PipelineOutcome::StageFailed { response, stages_completed } => {
                stats.stages_completed(stages_completed);
                response
            },
        },
    }
}
