//! Delivery of new records to the remote injuries endpoint.
//!
//! The UI never waits on the network directly: a [`Submitter`] hands back a [`Pending`] that the
//! frame loop polls until it settles.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::error::{SubmitError, SubmitResult};
use crate::model::Record;

/// Something that can report a record to the outside world.
pub trait Submitter {
    fn submit(&self, record: &Record) -> Pending;
}

/// A submission that settles exactly once.
#[derive(Debug)]
pub struct Pending {
    rx: Receiver<SubmitResult>,
}

/// Write half of a [`Pending`]. Dropping it unsettled settles the pending side as
/// [`SubmitError::Abandoned`].
#[derive(Debug)]
pub struct Settle {
    tx: Sender<SubmitResult>,
}

impl Pending {
    pub fn channel() -> (Settle, Self) {
        let (tx, rx) = mpsc::channel();
        (Settle { tx }, Self { rx })
    }

    /// Already settled with `result`.
    pub fn ready(result: SubmitResult) -> Self {
        let (settle, pending) = Self::channel();
        settle.settle(result);
        pending
    }

    /// Non-blocking; `None` while still in flight.
    pub fn try_settle(&self) -> Option<SubmitResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(SubmitError::Abandoned)),
        }
    }
}

impl Settle {
    pub fn settle(self, result: SubmitResult) {
        // The receiver is gone only if the tracker itself was dropped.
        let _ = self.tx.send(result);
    }
}

/// POSTs each record as JSON to a fixed endpoint.
pub struct HttpSubmitter {
    endpoint: String,
    repaint: Option<egui::Context>,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            repaint: None,
        }
    }

    /// Wake the UI up when a submission settles.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Submitter for HttpSubmitter {
    #[cfg(not(target_arch = "wasm32"))]
    fn submit(&self, record: &Record) -> Pending {
        let (settle, pending) = Pending::channel();
        let endpoint = self.endpoint.clone();
        let record = record.clone();
        let repaint = self.repaint.clone();
        log::debug!("POST {endpoint} for record {}", record.id);

        let spawned = std::thread::Builder::new()
            .name("injury-submit".to_owned())
            .spawn(move || {
                settle.settle(post_blocking(&endpoint, &record));
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        if let Err(err) = spawned {
            log::error!("could not start submission thread: {err}");
        }
        pending
    }

    #[cfg(target_arch = "wasm32")]
    fn submit(&self, record: &Record) -> Pending {
        let (settle, pending) = Pending::channel();
        let endpoint = self.endpoint.clone();
        let record = record.clone();
        let repaint = self.repaint.clone();
        log::debug!("POST {endpoint} for record {}", record.id);

        wasm_bindgen_futures::spawn_local(async move {
            settle.settle(post_async(&endpoint, &record).await);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
        pending
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn post_blocking(endpoint: &str, record: &Record) -> SubmitResult {
    // No timeout: a submission runs until the remote answers or the transport gives up.
    let client = reqwest::blocking::Client::builder().timeout(None).build()?;
    let response = client.post(endpoint).json(record).send()?;
    check_status(response.status())
}

#[cfg(target_arch = "wasm32")]
async fn post_async(endpoint: &str, record: &Record) -> SubmitResult {
    let response = reqwest::Client::new()
        .post(endpoint)
        .json(record)
        .send()
        .await?;
    check_status(response.status())
}

fn check_status(status: reqwest::StatusCode) -> SubmitResult {
    if status.is_success() {
        Ok(())
    } else {
        Err(SubmitError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyPart, Gender};
    use std::io::{Read as _, Write as _};
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    fn record() -> Record {
        Record {
            id: 99,
            part: BodyPart::Head,
            description: "bruise".to_owned(),
            gender: Gender::Female,
        }
    }

    fn wait(pending: &Pending) -> SubmitResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = pending.try_settle() {
                return result;
            }
            assert!(Instant::now() < deadline, "submission never settled");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    /// Accepts one request, answers with `status_line` and returns the raw request text.
    fn serve_once(status_line: &'static str) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/injuries", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!("{status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });
        (url, handle)
    }

    #[test]
    fn test_ready_settles_immediately() {
        let pending = Pending::ready(Ok(()));
        assert!(matches!(pending.try_settle(), Some(Ok(()))));
    }

    #[test]
    fn test_channel_stays_pending_until_settled() {
        let (settle, pending) = Pending::channel();
        assert!(pending.try_settle().is_none());
        settle.settle(Err(SubmitError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        assert!(matches!(
            pending.try_settle(),
            Some(Err(SubmitError::Status(s))) if s == reqwest::StatusCode::BAD_GATEWAY
        ));
    }

    #[test]
    fn test_dropped_settle_is_abandoned() {
        let (settle, pending) = Pending::channel();
        drop(settle);
        assert!(matches!(pending.try_settle(), Some(Err(SubmitError::Abandoned))));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(reqwest::StatusCode::OK).is_ok());
        assert!(check_status(reqwest::StatusCode::CREATED).is_ok());
        assert!(matches!(
            check_status(reqwest::StatusCode::NOT_FOUND),
            Err(SubmitError::Status(_))
        ));
    }

    #[test]
    fn test_posts_json_and_accepts_2xx() {
        let (url, server) = serve_once("HTTP/1.1 201 Created");
        let submitter = HttpSubmitter::new(url);
        let result = wait(&submitter.submit(&record()));
        assert!(result.is_ok(), "{result:?}");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/injuries "), "{request}");
        assert!(
            request
                .to_ascii_lowercase()
                .contains("content-type: application/json"),
            "{request}"
        );
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 99, "part": "Head", "description": "bruise", "gender": "Female"})
        );
    }

    #[test]
    fn test_server_error_is_a_failure() {
        let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error");
        let submitter = HttpSubmitter::new(url);
        let result = wait(&submitter.submit(&record()));
        assert!(
            matches!(result, Err(SubmitError::Status(s)) if s.as_u16() == 500),
            "{result:?}"
        );
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_endpoint_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/injuries", listener.local_addr().unwrap());
        drop(listener);
        let submitter = HttpSubmitter::new(url);
        let result = wait(&submitter.submit(&record()));
        assert!(matches!(result, Err(SubmitError::Transport(_))), "{result:?}");
    }
}
