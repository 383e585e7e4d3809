//! Segment client against a local one-shot HTTP server, plus GPX files on
//! disk.

use segcomp_routes::{
    load_gpx_route, parse_identifier_list, RouteError, RouteLoader, SegmentClient,
};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Client talking to the local server directly, ignoring any proxy settings.
fn local_client(base: String) -> SegmentClient {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    SegmentClient::with_http_client(base, "secret", http)
}

/// Serve a single request with `status` and `body`, returning the base URL
/// and a handle yielding the request line.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).expect("header");
            if n == 0 || header == "\r\n" {
                break;
            }
        }
        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).expect("write");
        request_line
    });
    (format!("http://{}", addr), handle)
}

#[test]
fn test_fetch_decodes_segment() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"name":"Old La Honda","map":{"polyline":"_p~iF~ps|U_ulLnnqC_mqNvxq`@"}}"#,
    );
    let client = local_client(base);
    let route = client.fetch("638886").unwrap();
    assert_eq!(route.name, "Old La Honda");
    assert_eq!(route.points.len(), 3);

    let request_line = server.join().unwrap();
    assert!(request_line.starts_with("GET /segments/638886?access_token=secret "));
}

#[test]
fn test_non_success_status_is_fetch_failure() {
    let (base, server) = serve_once("404 Not Found", r#"{"message":"Record Not Found"}"#);
    let client = local_client(base);
    let err = client.fetch("1").unwrap_err();
    assert!(matches!(
        err,
        RouteError::FetchFailed { ref id, status: 404 } if id == "1"
    ));
    server.join().unwrap();
}

const CLIMB_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="segcomp-test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="51.0000" lon="3.0000"></trkpt>
      <trkpt lat="51.0010" lon="3.0000"></trkpt>
      <trkpt lat="51.0020" lon="3.0005"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

#[test]
fn test_gpx_route_named_after_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Kemmelberg.gpx");
    fs::write(&path, CLIMB_GPX).unwrap();

    let route = load_gpx_route(&path).unwrap();
    assert_eq!(route.name, "Kemmelberg.gpx");
    assert_eq!(route.points.len(), 3);
    assert_eq!(route.points[2].lon, 3.0005);
}

#[test]
fn test_loader_mixes_files_and_missing_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("climb.gpx");
    fs::write(&path, CLIMB_GPX).unwrap();

    let input = format!("638886, {}, {}", path.display(), path.display());
    let ids = parse_identifier_list(&input);
    assert_eq!(ids.len(), 3);

    let report = RouteLoader::offline().load(&ids);
    let names: Vec<&str> = report.routes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["climb.gpx", "climb.gpx (2)"]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].1, RouteError::MissingToken { .. }));
}
