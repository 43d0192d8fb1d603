#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use gameshow::evaluator::{AnswerEvaluator, EvaluationError, EvaluationRequest, EvaluationResult};
use gameshow::websockets::{SocketError, SocketWrapper};

// ============================================================================
// Mock Evaluator
// ============================================================================

#[derive(Debug, Clone)]
enum Verdict {
    /// Correct when the selected option matches
    AnswerKey { correct_option_id: String, score: u32 },
    Fail(EvaluationError),
}

/// Evaluator that records every request and answers from a fixed verdict
#[derive(Clone)]
pub struct MockEvaluator {
    verdict: Verdict,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<EvaluationRequest>>>,
}

impl MockEvaluator {
    /// Option `a` is correct and worth `score` points
    pub fn correct_is_a(score: u32) -> Self {
        Self::with_verdict(Verdict::AnswerKey {
            correct_option_id: "a".to_string(),
            score,
        })
    }

    pub fn failing(error: EvaluationError) -> Self {
        Self::with_verdict(Verdict::Fail(error))
    }

    fn with_verdict(verdict: Verdict) -> Self {
        Self {
            verdict,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Answer only after `delay`
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<EvaluationRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl AnswerEvaluator for MockEvaluator {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.verdict {
            Verdict::AnswerKey {
                correct_option_id,
                score,
            } => {
                let is_correct = request.selected_option_id == *correct_option_id;
                Ok(EvaluationResult {
                    is_correct,
                    score_awarded: if is_correct { *score } else { 0 },
                    correct_option_id: Some(correct_option_id.clone()),
                    message: None,
                })
            }
            Verdict::Fail(error) => Err(error.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "MockEvaluator"
    }
}

// ============================================================================
// Mock Socket
// ============================================================================

/// Server side of an in-memory WebSocket
pub struct MockSocket {
    inbound: mpsc::UnboundedReceiver<String>,
    outbound: mpsc::UnboundedSender<String>,
    closed: Arc<AtomicBool>,
}

/// Client side of an in-memory WebSocket
pub struct MockClient {
    to_server: Option<mpsc::UnboundedSender<String>>,
    from_server: mpsc::UnboundedReceiver<String>,
    closed: Arc<AtomicBool>,
}

pub fn mock_socket_pair() -> (MockSocket, MockClient) {
    let (to_server, inbound) = mpsc::unbounded_channel();
    let (outbound, from_server) = mpsc::unbounded_channel();
    let closed = Arc::new(AtomicBool::new(false));

    (
        MockSocket {
            inbound,
            outbound,
            closed: closed.clone(),
        },
        MockClient {
            to_server: Some(to_server),
            from_server,
            closed,
        },
    )
}

#[async_trait]
impl SocketWrapper for MockSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.outbound
            .send(message)
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        Ok(self.inbound.recv().await)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl MockClient {
    pub fn send_raw(&self, message: &str) {
        if let Some(sender) = &self.to_server {
            sender.send(message.to_string()).unwrap();
        }
    }

    /// Next raw message from the server, `None` once the server side is gone
    pub async fn recv_raw(&mut self) -> Option<String> {
        tokio::time::timeout(Duration::from_secs(60), self.from_server.recv())
            .await
            .expect("timed out waiting for a server message")
    }

    /// Simulate the browser going away
    pub fn disconnect(&mut self) {
        self.to_server = None;
    }

    pub fn was_closed_by_server(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
