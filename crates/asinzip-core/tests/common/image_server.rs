//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses per request path; unknown paths get 404. A route
//! can delay its response to exercise client timeouts. Request header lines are
//! recorded so tests can check what the client sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl Route {
    pub fn image(content_type: Option<&'static str>, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: b"nope".to_vec(),
            delay: None,
        }
    }

    pub fn stalled(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::image(Some("image/jpeg"), b"late")
        }
    }
}

pub struct ImageServer {
    pub base: String,
    requests: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ImageServer {
    /// Absolute URL for `path` (no leading slash).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Header lines of every request received so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (format!("/{}", p), r))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    ImageServer {
        base: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<Vec<String>>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let lines: Vec<String> = request
        .lines()
        .take_while(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect();
    let path = lines
        .first()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(lines);

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    if let Some(d) = route.delay {
        thread::sleep(d);
    }
    let content_type = route
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        route.body.len(),
        content_type
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
}
