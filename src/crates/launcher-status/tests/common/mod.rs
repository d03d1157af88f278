//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use launcher_status::{Result, ServiceStatus, StatusClient, StatusColor, StatusError};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Shorthand for building a service entry
pub fn svc(id: &str, essential: bool, color: StatusColor) -> ServiceStatus {
    ServiceStatus::new(id, id, essential, color)
}

/// A typical healthy response
pub fn healthy() -> Vec<ServiceStatus> {
    vec![
        svc("authserver.mojang.com", true, StatusColor::Green),
        svc("api.mojang.com", false, StatusColor::Green),
    ]
}

/// Client that replays queued responses, then repeats a fallback list.
///
/// When gated, every call waits for a permit before answering.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<Vec<ServiceStatus>>>>,
    fallback: Vec<ServiceStatus>,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedClient {
    pub fn new(fallback: Vec<ServiceStatus>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Gated client plus the semaphore that releases its calls
    pub fn gated(fallback: Vec<ServiceStatus>) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let mut client = Self::new(fallback);
        client.gate = Some(Arc::clone(&gate));
        (client, gate)
    }

    pub fn push_ok(&self, statuses: Vec<ServiceStatus>) {
        self.responses.lock().unwrap().push_back(Ok(statuses));
    }

    pub fn push_err(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(StatusError::ClientError(message.to_string())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusClient for ScriptedClient {
    async fn fetch_statuses(&self) -> Result<Vec<ServiceStatus>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .expect("gate semaphore closed")
                .forget();
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Yield until the client has seen `calls` requests
pub async fn wait_for_calls(client: &ScriptedClient, calls: usize) {
    while client.calls() < calls {
        tokio::task::yield_now().await;
    }
}

/// Captured formatted log output
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's tracing events into a buffer until the guard drops.
///
/// Only covers tasks polled on the current thread, which is every task under
/// the default `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
