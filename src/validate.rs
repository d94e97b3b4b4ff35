//! The request validator (C3): a strict, terminal sequence of gates that
//! decides what the worker must send back before the pipeline ever runs.

use std::fs;

use crate::consts::{HOME_PAGE_PATH, MAX_BODY_LEN};
use crate::http::Method;
use crate::operation::Plan;
use crate::request::Request;
use crate::response::Response;

/// The outcome of validating one request.
///
/// `Rejected` carries a fully-formed error `Response` ready to send as-is;
/// `Accepted` carries the parsed `Plan` for the pipeline to run.
pub enum Verdict {
    Rejected(Response),
    Accepted(Plan),
}

/// Runs the four gates from the request validator in order, stopping at
/// the first one that fails.
#[must_use]
pub fn validate(req: &Request) -> Verdict {
    if !req.method().is_allowed() {
        return Verdict::Rejected(Response::text_error(405, "Invalid method on request list\n".to_string()));
    }

    if *req.method() == Method::Get {
        return Verdict::Rejected(get_response(req.target()));
    }

    let Some(plan) = Plan::try_parse(req.target()) else {
        return Verdict::Rejected(Response::text_error(400, "Invalid image operation\n".to_string()));
    };

    if req.body_len() > MAX_BODY_LEN {
        let message = format!("Image is too large: {} bytes\n", req.body_len());
        return Verdict::Rejected(Response::text_error(413, message));
    }

    Verdict::Accepted(plan)
}

/// Handles the GET branch: either the home page or a 404, both terminal.
fn get_response(target: &str) -> Response {
    if target != "/" {
        return Response::text_error(404, "Invalid address in GET request\n".to_string());
    }

    match fs::read(HOME_PAGE_PATH) {
        Ok(body) => Response::new(200, "text/html", body),
        Err(_) => Response::text_error(404, "Invalid address in GET request\n".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::Headers;
    use crate::http::Version;
    use crate::request::RequestLine;

    fn request(method: Method, target: &str, body: Vec<u8>) -> Request {
        Request {
            request_line: RequestLine { method, target: target.to_string(), version: Version::OneDotOne },
            headers: Headers::new(),
            body,
        }
    }

    #[test]
    fn rejects_disallowed_methods() {
        let req = request(Method::Put, "/", Vec::new());
        let Verdict::Rejected(res) = validate(&req) else { panic!("expected rejection") };
        assert_eq!(res.status.code(), 405);
        assert_eq!(res.body, b"Invalid method on request list\n");
    }

    #[test]
    fn rejects_get_on_unknown_path() {
        let req = request(Method::Get, "/foo", Vec::new());
        let Verdict::Rejected(res) = validate(&req) else { panic!("expected rejection") };
        assert_eq!(res.status.code(), 404);
        assert_eq!(res.body, b"Invalid address in GET request\n");
    }

    #[test]
    fn rejects_bad_operation_grammar() {
        let req = request(Method::Post, "/rotate,400", Vec::new());
        let Verdict::Rejected(res) = validate(&req) else { panic!("expected rejection") };
        assert_eq!(res.status.code(), 400);
        assert_eq!(res.body, b"Invalid image operation\n");
    }

    #[test]
    fn rejects_oversized_bodies() {
        let req = request(Method::Post, "/rotate,0", vec![0u8; (MAX_BODY_LEN + 1) as usize]);
        let Verdict::Rejected(res) = validate(&req) else { panic!("expected rejection") };
        assert_eq!(res.status.code(), 413);
        assert_eq!(res.body, format!("Image is too large: {} bytes\n", MAX_BODY_LEN + 1).into_bytes());
    }

    #[test]
    fn accepts_an_exact_cap_sized_body() {
        let req = request(Method::Post, "/rotate,0", vec![0u8; MAX_BODY_LEN as usize]);
        assert!(matches!(validate(&req), Verdict::Accepted(_)));
    }

    #[test]
    fn accepts_a_valid_post_plan() {
        let req = request(Method::Post, "/scale,1,1/flip,v/rotate,90", vec![1, 2, 3]);
        let Verdict::Accepted(plan) = validate(&req) else { panic!("expected acceptance") };
        assert_eq!(plan.len(), 3);
    }
}
