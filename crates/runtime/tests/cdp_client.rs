//! CdpClient against a stub debugging server.

use std::sync::Arc;

use dev_browser_runtime::{CdpClient, RuntimeError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

struct StubServer {
	base_url: String,
	requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
	async fn request_lines(&self) -> Vec<String> {
		self.requests.lock().await.clone()
	}
}

/// Answers one connection per scripted `(status, body)` pair, recording request lines.
async fn stub(responses: Vec<(u16, &'static str)>) -> StubServer {
	let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	let requests = Arc::new(Mutex::new(Vec::new()));
	let seen = Arc::clone(&requests);

	tokio::spawn(async move {
		for (status, body) in responses {
			let (mut stream, _) = listener.accept().await.unwrap();
			let mut buf = vec![0u8; 8192];
			let n = stream.read(&mut buf).await.unwrap();
			let request = String::from_utf8_lossy(&buf[..n]).to_string();
			seen.lock().await.push(request.lines().next().unwrap_or_default().to_string());

			let reason = match status {
				200 => "OK",
				404 => "Not Found",
				_ => "Internal Server Error",
			};
			let response = format!(
				"HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
				body.len()
			);
			stream.write_all(response.as_bytes()).await.unwrap();
			let _ = stream.shutdown().await;
		}
	});

	StubServer {
		base_url: format!("http://{}", addr),
		requests,
	}
}

#[tokio::test]
async fn list_pages_skips_non_page_targets() {
	let server = stub(vec![(
		200,
		r#"[
			{"id": "P1", "type": "page", "title": "one", "url": "about:blank"},
			{"id": "W1", "type": "worker", "url": "blob:x"},
			{"id": "P2", "type": "page", "title": "two", "url": "https://example.com/"}
		]"#,
	)])
	.await;

	let client = CdpClient::with_base_url(&server.base_url).unwrap();
	let pages = client.list_pages().await.unwrap();

	let ids: Vec<_> = pages.iter().map(|t| t.id.as_str()).collect();
	assert_eq!(ids, ["P1", "P2"]);
	assert_eq!(server.request_lines().await, ["GET /json/list HTTP/1.1"]);
}

#[tokio::test]
async fn new_page_uses_put() {
	let server = stub(vec![(
		200,
		r#"{"id": "NEW1", "type": "page", "title": "", "url": "about:blank",
		    "webSocketDebuggerUrl": "ws://127.0.0.1:9223/devtools/page/NEW1"}"#,
	)])
	.await;

	let client = CdpClient::with_base_url(&server.base_url).unwrap();
	let target = client.new_page().await.unwrap();

	assert_eq!(target.id, "NEW1");
	assert_eq!(server.request_lines().await, ["PUT /json/new?about:blank HTTP/1.1"]);
}

#[tokio::test]
async fn close_page_treats_unknown_target_as_already_closed() {
	let server = stub(vec![(200, "Target is closing"), (404, "No such target id: GONE")]).await;
	let client = CdpClient::with_base_url(&server.base_url).unwrap();

	assert!(client.close_page("T1").await.unwrap());
	assert!(!client.close_page("GONE").await.unwrap());
	assert_eq!(
		server.request_lines().await,
		["GET /json/close/T1 HTTP/1.1", "GET /json/close/GONE HTTP/1.1"]
	);
}

#[tokio::test]
async fn server_errors_surface_as_cdp_errors() {
	let server = stub(vec![(500, "boom")]).await;
	let client = CdpClient::with_base_url(&server.base_url).unwrap();

	let err = client.list_pages().await.unwrap_err();
	assert!(
		matches!(&err, RuntimeError::Cdp(msg) if msg.contains("500") && msg.contains("boom")),
		"unexpected error: {err}"
	);
}
