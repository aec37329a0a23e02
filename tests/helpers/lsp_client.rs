//! Minimal JSON-RPC client for driving the voyager-ls binary over stdio.

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

use serde_json::{Value, json};

const RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Drives one spawned server process. Frames outgoing messages with
/// Content-Length headers and matches responses to request ids, skipping
/// server-initiated traffic such as `window/logMessage`.
pub struct LspClient {
    server: Child,
    writer: ChildStdin,
    reader: BufReader<ChildStdout>,
    next_id: i64,
}

impl LspClient {
    /// Spawn the binary Cargo built for this test run.
    pub fn start() -> Self {
        let mut server = Command::new(env!("CARGO_BIN_EXE_voyager-ls"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn voyager-ls");

        let writer = server.stdin.take().expect("server stdin");
        let reader = BufReader::new(server.stdout.take().expect("server stdout"));

        Self {
            server,
            writer,
            reader,
            next_id: 0,
        }
    }

    /// Send a request and block until its response arrives.
    pub fn request(&mut self, method: &str, params: Value) -> Value {
        self.next_id += 1;
        let id = self.next_id;
        self.write_frame(payload(method, Some(id), params));

        let deadline = Instant::now() + RESPONSE_TIMEOUT;
        loop {
            assert!(
                Instant::now() < deadline,
                "no response to {} (id {}) within {:?}",
                method,
                id,
                RESPONSE_TIMEOUT
            );
            let message = self.read_frame();
            // Responses carry an id but no method
            if message.get("method").is_none()
                && message.get("id").and_then(Value::as_i64) == Some(id)
            {
                return message;
            }
        }
    }

    /// Send a notification; nothing is awaited.
    pub fn notify(&mut self, method: &str, params: Value) {
        self.write_frame(payload(method, None, params));
    }

    /// The server process, for liveness checks.
    pub fn server(&mut self) -> &mut Child {
        &mut self.server
    }

    fn write_frame(&mut self, message: Value) {
        let body = message.to_string();
        write!(
            self.writer,
            "Content-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
        .expect("failed to write to server stdin");
        self.writer.flush().expect("failed to flush server stdin");
    }

    fn read_frame(&mut self) -> Value {
        let mut content_length: Option<usize> = None;
        loop {
            let mut line = String::new();
            self.reader
                .read_line(&mut line)
                .expect("failed to read frame header");
            let line = line.trim_end();

            if line.is_empty() {
                if let Some(len) = content_length {
                    let mut body = vec![0u8; len];
                    self.reader
                        .read_exact(&mut body)
                        .expect("failed to read frame body");
                    return serde_json::from_slice(&body).expect("frame body should be JSON");
                }
                continue;
            }

            if let Some(value) = line.strip_prefix("Content-Length:") {
                content_length = Some(value.trim().parse().expect("numeric Content-Length"));
            }
        }
    }
}

fn payload(method: &str, id: Option<i64>, params: Value) -> Value {
    let mut message = json!({ "jsonrpc": "2.0", "method": method });
    if let Some(id) = id {
        message["id"] = json!(id);
    }
    // Methods like shutdown and exit take no params at all
    if !params.is_null() {
        message["params"] = params;
    }
    message
}

impl Drop for LspClient {
    fn drop(&mut self) {
        let _ = self.server.kill();
        let _ = self.server.wait();
    }
}
