//! Test doubles shared by the unit tests.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::agent::Agent;
use crate::core::store::BlobStore;
use crate::error::{AgentError, FetchError};

/// In-memory writer whose contents can be inspected after the fact.
#[derive(Clone, Default)]
pub struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that always fails.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Blob store with scripted responses and per-key latency.
#[derive(Default)]
pub struct MockStore {
    objects: HashMap<String, Result<Vec<u8>, FetchError>>,
    delays: HashMap<String, Duration>,
    bucket: Option<Result<bool, FetchError>>,
    gets: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            bucket: Some(Ok(true)),
            ..Default::default()
        }
    }

    pub fn with(mut self, key: &str, data: &str) -> Self {
        self.objects
            .insert(key.to_string(), Ok(data.as_bytes().to_vec()));
        self
    }

    pub fn with_error(mut self, key: &str, err: FetchError) -> Self {
        self.objects.insert(key.to_string(), Err(err));
        self
    }

    pub fn delay(mut self, key: &str, ms: u64) -> Self {
        self.delays
            .insert(key.to_string(), Duration::from_millis(ms));
        self
    }

    pub fn bucket(mut self, exists: Result<bool, FetchError>) -> Self {
        self.bucket = Some(exists);
        self
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for MockStore {
    async fn get(&self, _bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.objects
            .get(key)
            .cloned()
            .unwrap_or(Err(FetchError::NotFound))
    }

    async fn bucket_exists(&self, _bucket: &str) -> Result<bool, FetchError> {
        self.bucket.clone().unwrap_or(Ok(false))
    }
}

/// Agent that records every key it is given.
#[derive(Default)]
pub struct RecordingAgent {
    pub keys: Mutex<Vec<Vec<u8>>>,
    pub fail: bool,
}

impl RecordingAgent {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn added(&self) -> Vec<String> {
        self.keys
            .lock()
            .unwrap()
            .iter()
            .map(|k| String::from_utf8_lossy(k).to_string())
            .collect()
    }
}

#[async_trait]
impl Agent for RecordingAgent {
    async fn add(&self, key: &[u8]) -> Result<(), AgentError> {
        if self.fail {
            return Err(AgentError::Add("agent refused key".to_string()));
        }
        self.keys.lock().unwrap().push(key.to_vec());
        Ok(())
    }

    fn pid(&self) -> u32 {
        4242
    }
}
