use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::client::{AnswerEvaluator, EvaluationError, EvaluationRequest, EvaluationResult};
use crate::remote::{endpoint, ApiEnvelope};

/// Body of `POST /gameshow-quiz/{gameId}/evaluate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerPayload<'a> {
    question_id: &'a str,
    selected_option_id: &'a str,
    time_taken: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckAnswerResponse {
    is_correct: bool,
    #[serde(default, alias = "scoreAwarded")]
    score: i64,
    #[serde(default)]
    correct_option_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl From<CheckAnswerResponse> for EvaluationResult {
    fn from(response: CheckAnswerResponse) -> Self {
        Self {
            is_correct: response.is_correct,
            score_awarded: u32::try_from(response.score.max(0)).unwrap_or(u32::MAX),
            correct_option_id: response.correct_option_id,
            message: response.message,
        }
    }
}

/// Evaluator backed by the remote gameshow API
#[derive(Clone)]
pub struct HttpAnswerEvaluator {
    client: Client,
    base_url: String,
}

impl HttpAnswerEvaluator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AnswerEvaluator for HttpAnswerEvaluator {
    #[instrument(skip(self, request), fields(session_id = %request.session_id, question_id = %request.question_id))]
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        let url = endpoint(
            &self.base_url,
            &format!("gameshow-quiz/{}/evaluate", request.session_id),
        );
        let payload = CheckAnswerPayload {
            question_id: &request.question_id,
            selected_option_id: &request.selected_option_id,
            time_taken: request.time_taken_seconds,
        };

        debug!(url = %url, "Submitting answer for evaluation");

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Evaluation request failed");
                EvaluationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Evaluator returned an error status");
            return Err(EvaluationError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EvaluationError::Transport(e.to_string()))?;
        let parsed: ApiEnvelope<CheckAnswerResponse> =
            serde_json::from_str(&body).map_err(|e| EvaluationError::Decode(e.to_string()))?;

        Ok(parsed.into_inner().into())
    }

    fn name(&self) -> &'static str {
        "HttpAnswerEvaluator"
    }
}
