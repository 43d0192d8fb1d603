use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::repository::{GameCatalog, PlayMode};
use crate::quiz::{GameSession, LoadError, Question, QuizOption};
use crate::remote::{endpoint, ApiEnvelope};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameDto {
    id: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    questions: Option<Vec<QuestionDto>>,
    /// Creator-side payloads nest the questions here
    #[serde(default)]
    game_data: Option<GameDataDto>,
    #[serde(default)]
    randomize_questions: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameDataDto {
    #[serde(default)]
    questions: Vec<QuestionDto>,
    #[serde(default)]
    randomize_questions: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDto {
    id: String,
    text: String,
    #[serde(default)]
    image_url: Option<String>,
    time_limit: u32,
    points: u32,
    options: Vec<OptionDto>,
}

#[derive(Debug, Deserialize)]
struct OptionDto {
    id: String,
    text: String,
}

impl From<QuestionDto> for Question {
    fn from(dto: QuestionDto) -> Self {
        Question {
            id: dto.id,
            text: dto.text,
            image_url: dto.image_url.filter(|url| !url.is_empty()),
            time_limit_seconds: dto.time_limit,
            point_value: dto.points,
            options: dto
                .options
                .into_iter()
                .map(|o| QuizOption::new(o.id, o.text))
                .collect(),
        }
    }
}

impl From<GameDto> for GameSession {
    fn from(dto: GameDto) -> Self {
        let (questions, nested_randomize) = match (dto.questions, dto.game_data) {
            (Some(questions), data) => (
                questions,
                data.map(|d| d.randomize_questions).unwrap_or(false),
            ),
            (None, Some(data)) => (data.questions, data.randomize_questions),
            (None, None) => (Vec::new(), false),
        };

        GameSession {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            thumbnail: dto.thumbnail,
            questions: questions.into_iter().map(Question::from).collect(),
            randomize_questions: dto.randomize_questions || nested_randomize,
        }
    }
}

/// Catalog backed by the remote gameshow API
#[derive(Clone)]
pub struct HttpGameCatalog {
    client: Client,
    base_url: String,
}

impl HttpGameCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, game_id: &str, mode: PlayMode) -> String {
        let path = match mode {
            PlayMode::Public => format!("gameshow-quiz/play/{}", game_id),
            PlayMode::Preview => format!("gameshow-quiz/preview/{}", game_id),
        };
        endpoint(&self.base_url, &path)
    }
}

#[async_trait]
impl GameCatalog for HttpGameCatalog {
    #[instrument(skip(self))]
    async fn load_session(&self, game_id: &str, mode: PlayMode) -> Result<GameSession, LoadError> {
        let url = self.url_for(game_id, mode);
        debug!(url = %url, "Fetching game");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Game request failed");
            LoadError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(game_id.to_string()));
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "Game service returned an error status");
            return Err(LoadError::Unavailable(format!(
                "Game service returned status {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Unavailable(e.to_string()))?;
        let parsed: ApiEnvelope<GameDto> =
            serde_json::from_str(&body).map_err(|e| LoadError::Malformed(e.to_string()))?;

        let game = GameSession::from(parsed.into_inner());
        if game.questions.is_empty() {
            return Err(LoadError::NoQuestions);
        }

        debug!(questions = game.questions.len(), "Game fetched");
        Ok(game)
    }
}
