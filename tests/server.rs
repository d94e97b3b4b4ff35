//! Integration tests for the connection worker (C7) running against a real
//! in-process `TcpListener`, one ephemeral port per test.

use std::io::{Cursor, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::{fs, thread};

use image::{DynamicImage, ImageFormat};
use picnet::consts::HOME_PAGE_PATH;
use picnet::operation::{Operation, Plan};
use picnet::pipeline::{self, PipelineOutcome};
use picnet::{worker, Stats};

/// Spawns a listener on an ephemeral port and services exactly one
/// accepted connection with the real worker loop. Returns the port.
fn spawn_worker() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();

    thread::spawn(move || {
        let stats = Stats::new();
        if let Ok((stream, _)) = listener.accept() {
            worker::serve(stream, stats);
        }
    });

    port
}

fn send_request(port: u16, request_line: &str, body: &[u8]) -> (String, Vec<u8>) {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).expect("connect");

    let head = format!("{request_line}\r\nContent-Length: {}\r\n\r\n", body.len());
    stream.write_all(head.as_bytes()).unwrap();
    stream.write_all(body).unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).unwrap();

    let split_at = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap() + 4;
    let head = String::from_utf8_lossy(&raw[..split_at]).into_owned();
    let resp_body = raw[split_at..].to_vec();

    (head, resp_body)
}

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::new_rgba8(width, height);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[test]
fn rejects_disallowed_method() {
    let port = spawn_worker();
    let (head, body) = send_request(port, "PUT / HTTP/1.1", b"");
    assert!(head.starts_with("HTTP/1.1 405"));
    assert_eq!(body, b"Invalid method on request list\n");
}

#[test]
fn rejects_unknown_get_path() {
    let port = spawn_worker();
    let (head, body) = send_request(port, "GET /foo HTTP/1.1", b"");
    assert!(head.starts_with("HTTP/1.1 404"));
    assert_eq!(body, b"Invalid address in GET request\n");
}

#[test]
fn rejects_bad_operation_grammar() {
    let port = spawn_worker();
    let (head, body) = send_request(port, "POST /rotate,400 HTTP/1.1", b"");
    assert!(head.starts_with("HTTP/1.1 400"));
    assert_eq!(body, b"Invalid image operation\n");
}

#[test]
fn rejects_oversized_body() {
    let port = spawn_worker();
    let oversized = vec![0u8; 8 * 1024 * 1024 + 1];
    let (head, body) = send_request(port, "POST /rotate,0 HTTP/1.1", &oversized);
    assert!(head.starts_with("HTTP/1.1 413"));
    assert_eq!(body, format!("Image is too large: {} bytes\n", oversized.len()).into_bytes());
}

#[test]
fn rejects_undecodable_body() {
    let port = spawn_worker();
    let (head, body) = send_request(port, "POST /rotate,0 HTTP/1.1", b"not an image");
    assert!(head.starts_with("HTTP/1.1 422"));
    assert_eq!(body, b"Invalid image received\n");
}

#[test]
fn scales_a_real_image() {
    let port = spawn_worker();
    let input = sample_png(100, 50);
    let (head, body) = send_request(port, "POST /scale,200,50 HTTP/1.1", &input);

    assert!(head.starts_with("HTTP/1.1 200"));
    assert!(head.contains("Content-Type: image/png"));

    let decoded = image::load_from_memory(&body).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 50));
}

#[test]
fn rotate_zero_round_trips_pixels() {
    let port = spawn_worker();
    let input = sample_png(100, 50);
    let (head, body) = send_request(port, "POST /rotate,0 HTTP/1.1", &input);

    assert!(head.starts_with("HTTP/1.1 200"));
    let decoded = image::load_from_memory(&body).unwrap();
    let original = image::load_from_memory(&input).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (100, 50));
    assert_eq!(decoded.to_rgba8(), original.to_rgba8());
}

#[test]
fn double_horizontal_flip_round_trips_pixels() {
    let port = spawn_worker();
    let input = sample_png(100, 50);
    let (head, body) = send_request(port, "POST /flip,h/flip,h HTTP/1.1", &input);

    assert!(head.starts_with("HTTP/1.1 200"));
    let decoded = image::load_from_memory(&body).unwrap();
    let original = image::load_from_memory(&input).unwrap();
    assert_eq!(decoded.to_rgba8(), original.to_rgba8());
}

#[test]
fn home_page_served_on_root() {
    let original = fs::read(HOME_PAGE_PATH).ok();
    fs::create_dir_all(std::path::Path::new(HOME_PAGE_PATH).parent().unwrap()).unwrap();
    fs::write(HOME_PAGE_PATH, b"<html>home</html>").unwrap();

    let port = spawn_worker();
    let (head, body) = send_request(port, "GET / HTTP/1.1", b"");

    match original {
        Some(contents) => fs::write(HOME_PAGE_PATH, contents).unwrap(),
        None => fs::remove_file(HOME_PAGE_PATH).unwrap(),
    }

    assert!(head.starts_with("HTTP/1.1 200"));
    assert!(head.contains("Content-Type: text/html"));
    assert_eq!(body, b"<html>home</html>");
}

#[test]
fn stage_failure_emits_501() {
    // Grammar never lets a 0-dimension scale reach the pipeline; this
    // drives C5's own degenerate-output guard directly, the same path a
    // codec that legitimately failed a stage would take.
    let plan = Plan(vec![Operation::Scale { width: 0, height: 5 }]);
    let body = sample_png(4, 4);

    let outcome = pipeline::run(&body, &plan);
    let PipelineOutcome::StageFailed { response, stages_completed } = outcome else {
        panic!("expected stage failure")
    };

    assert_eq!(stages_completed, 0);
    assert_eq!(response.status.code(), 501);
    assert_eq!(response.body, b"Operation did not complete: scale,0,5\n");
}
