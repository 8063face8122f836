//! Live-reload dev server
//!
//! Serves the output root over HTTP. HTML responses get the reload client
//! injected; the client long-polls [`POLL_PATH`] and the [`ReloadHub`]
//! answers with every signal newer than the sequence number it sends.

mod hub;
mod static_files;

pub use hub::{PollResponse, ReloadHub, Signal, POLL_TIMEOUT};
pub use static_files::{content_type, inject_client, resolve, Resolved, CLIENT_PATH, POLL_PATH};

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Method, Request, Response, Server};

use crate::error::{BuildError, BuildResult};

const CLIENT_JS: &str = include_str!("client.js");

/// A running dev server; stops accepting when dropped.
pub struct DevServer {
    server: Arc<Server>,
    url: String,
    acceptor: Option<JoinHandle<()>>,
}

impl DevServer {
    /// Bind `host:port` and serve `root` on a background thread.
    pub fn start(host: &str, port: u16, root: PathBuf, hub: Arc<ReloadHub>) -> BuildResult<Self> {
        let server = Server::http((host, port))
            .map_err(|e| BuildError::Server(format!("cannot bind {host}:{port}: {e}")))?;
        let server = Arc::new(server);

        let bound = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(port);
        let url = format!("http://{host}:{bound}");

        let acceptor = {
            let server = server.clone();
            thread::Builder::new()
                .name("assetline-server".to_string())
                .spawn(move || {
                    for request in server.incoming_requests() {
                        let root = root.clone();
                        let hub = hub.clone();
                        thread::spawn(move || handle(request, &root, &hub));
                    }
                })
                .map_err(|e| BuildError::Server(format!("cannot spawn server thread: {e}")))?
        };

        Ok(Self {
            server,
            url,
            acceptor: Some(acceptor),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for DevServer {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.acceptor.take() {
            let _ = handle.join();
        }
    }
}

type Body = Response<Cursor<Vec<u8>>>;

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn with_type(response: Body, content_type: &str) -> Body {
    let mut response = response;
    if let Some(h) = header("Content-Type", content_type) {
        response = response.with_header(h);
    }
    if let Some(h) = header("Cache-Control", "no-store") {
        response = response.with_header(h);
    }
    response
}

fn status(code: u16, text: &str) -> Body {
    with_type(
        Response::from_string(text).with_status_code(code),
        "text/plain; charset=utf-8",
    )
}

fn handle(request: Request, root: &Path, hub: &ReloadHub) {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

    let response = if !matches!(request.method(), Method::Get | Method::Head) {
        status(405, "Method Not Allowed")
    } else {
        match path {
            CLIENT_PATH => with_type(
                Response::from_string(CLIENT_JS),
                "application/javascript; charset=utf-8",
            ),
            POLL_PATH => poll(query, hub),
            _ => serve_file(root, path),
        }
    };

    // The browser may have gone away; nothing to do about it
    let _ = request.respond(response);
}

fn poll(query: &str, hub: &ReloadHub) -> Body {
    let since = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "since")
        .and_then(|(_, value)| value.parse::<u64>().ok());

    let body = match since {
        Some(since) => hub.wait_since(since),
        None => hub.since(hub.latest()),
    };
    match serde_json::to_vec(&body) {
        Ok(json) => with_type(Response::from_data(json), "application/json"),
        Err(e) => status(500, &e.to_string()),
    }
}

fn serve_file(root: &Path, path: &str) -> Body {
    match resolve(root, path) {
        Resolved::Forbidden => status(403, "Forbidden"),
        Resolved::NotFound => status(404, "Not Found"),
        Resolved::File(file) => match std::fs::read(&file) {
            Ok(bytes) => {
                let content_type = content_type(&file);
                let bytes = if content_type.starts_with("text/html") {
                    inject_client(&String::from_utf8_lossy(&bytes)).into_bytes()
                } else {
                    bytes
                };
                with_type(Response::from_data(bytes), content_type)
            }
            Err(e) => status(500, &e.to_string()),
        },
    }
}
