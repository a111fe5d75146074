//! Scripted stand-in for the compare-commits backend.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use commitdiff::core::CompareClient;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `GET /api/compare-commits?workspace=... HTTP/1.1`
    pub request_line: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == &name.to_ascii_lowercase())
            .map(|(_, v)| v.as_str())
    }

    pub fn target(&self) -> &str {
        self.request_line.split(' ').nth(1).unwrap_or("")
    }
}

struct Canned {
    status: u16,
    body: String,
}

/// HTTP/1.1 server on an ephemeral port. Each accepted request waits for the
/// test to queue a response with [`FixtureServer::respond`].
pub struct FixtureServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Option<Sender<Canned>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FixtureServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();

        let handle = {
            let requests = Arc::clone(&requests);
            let shutdown = Arc::clone(&shutdown);
            std::thread::spawn(move || serve(listener, requests, rx, shutdown))
        };

        Self {
            addr,
            requests,
            responses: Some(tx),
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client for this server that ignores proxy settings from the environment.
    pub fn client(&self) -> CompareClient {
        self.client_with_prefix("")
    }

    pub fn client_with_prefix(&self, prefix: &str) -> CompareClient {
        let http = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .unwrap();
        CompareClient::with_client(&format!("{}{}", self.base_url(), prefix), http).unwrap()
    }

    pub fn respond(&self, status: u16, body: &str) {
        if let Some(tx) = &self.responses {
            tx.send(Canned {
                status,
                body: body.to_string(),
            })
            .unwrap();
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Block until `n` requests have arrived.
    pub fn wait_for_requests(&self, n: usize) {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if self.request_count() >= n {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("expected {} requests, saw {}", n, self.request_count());
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Unblocks a handler waiting for a response.
        self.responses.take();
        // Unblocks accept().
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn serve(
    listener: TcpListener,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Receiver<Canned>,
    shutdown: Arc<AtomicBool>,
) {
    for stream in listener.incoming() {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        let Ok(mut stream) = stream else {
            continue;
        };

        let Some(request) = read_request(&stream) else {
            continue;
        };
        requests.lock().unwrap().push(request);

        let Ok(canned) = responses.recv() else {
            break;
        };
        let reason = match canned.status {
            200 => "OK",
            401 => "Unauthorized",
            404 => "Not Found",
            _ => "Error",
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            canned.status,
            reason,
            canned.body.len(),
            canned.body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    if request_line.trim().is_empty() {
        return None;
    }

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    Some(RecordedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
    })
}
