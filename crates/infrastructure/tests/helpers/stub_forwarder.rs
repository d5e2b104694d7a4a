#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::DnsForwarder;
use ferrous_doh_application::use_cases::ForwardDnsQueryUseCase;
use ferrous_doh_domain::{DomainError, ListenAdmission};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Forwarder answering from a fixed table, echoing anything it does not know.
pub struct StubForwarder {
    answers: Vec<(Vec<u8>, Vec<u8>)>,
    delay: Option<Duration>,
    fail: bool,
    call_count: Arc<AtomicU64>,
}

impl StubForwarder {
    pub fn echo() -> Self {
        Self {
            answers: Vec::new(),
            delay: None,
            fail: false,
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::echo()
        }
    }

    pub fn with_answer(mut self, query: &[u8], answer: &[u8]) -> Self {
        self.answers.push((query.to_vec(), answer.to_vec()));
        self
    }

    /// Holds every query for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.call_count)
    }
}

#[async_trait]
impl DnsForwarder for StubForwarder {
    async fn forward(&self, request: &[u8]) -> Result<Bytes, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(DomainError::UpstreamConnect {
                server: "127.0.0.1:443".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let answer = self
            .answers
            .iter()
            .find(|(query, _)| query.as_slice() == request)
            .map(|(_, answer)| Bytes::copy_from_slice(answer))
            .unwrap_or_else(|| Bytes::copy_from_slice(request));
        Ok(answer)
    }
}

pub fn use_case_with(forwarder: StubForwarder, listen_address: &str) -> Arc<ForwardDnsQueryUseCase> {
    Arc::new(ForwardDnsQueryUseCase::new(
        Arc::new(forwarder),
        ListenAdmission::new(listen_address),
    ))
}
