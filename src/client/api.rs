//! Board API Client
//!
//! [`BoardBackend`] is the seam between the optimistic store and the
//! server: the store only ever reads the board and sends batch order
//! updates. [`HttpBoardBackend`] implements it over `reqwest` and also
//! carries the thin CRUD calls a board view needs.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::client::config::Config;
use crate::client::error::ClientError;
use crate::shared::board::{CreateBoardRequest, CreateCardRequest, CreateListRequest};
use crate::shared::{BatchOrderRequest, BatchOrderResponse, Board, BoardId, Card, List, ListId, ListWithCards};

/// Server operations the optimistic store depends on
#[async_trait]
pub trait BoardBackend: Send + Sync {
    /// Authoritative lists with cards, ordered at both levels
    async fn fetch_lists_with_cards(&self, board_id: BoardId) -> Result<Vec<ListWithCards>, ClientError>;

    /// Persist a complete sibling renumbering in one transaction
    async fn batch_update_order(
        &self,
        board_id: BoardId,
        request: &BatchOrderRequest,
    ) -> Result<BatchOrderResponse, ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP implementation of [`BoardBackend`]
#[derive(Debug, Clone)]
pub struct HttpBoardBackend {
    config: Config,
    client: Client,
}

impl HttpBoardBackend {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn with_identity(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        Ok(request
            .header("x-org-id", self.config.org_id()?)
            .header("x-user-id", self.config.user_id()?))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.with_identity(request)?.send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error)
                .unwrap_or_else(|_| if text.is_empty() { status.to_string() } else { text });
            tracing::debug!("Request failed: {} - {}", status, message);
            return Err(ClientError::status(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn list_boards(&self) -> Result<Vec<Board>, ClientError> {
        let url = self.config.api_url("/api/boards");
        self.send(self.client.get(&url)).await
    }

    pub async fn create_board(&self, title: &str) -> Result<Board, ClientError> {
        let url = self.config.api_url("/api/boards");
        let body = CreateBoardRequest { title: title.to_string() };
        self.send(self.client.post(&url).json(&body)).await
    }

    pub async fn create_list(&self, board_id: BoardId, title: &str) -> Result<List, ClientError> {
        let url = self.config.api_url(&format!("/api/boards/{}/lists", board_id));
        let body = CreateListRequest { title: title.to_string() };
        self.send(self.client.post(&url).json(&body)).await
    }

    pub async fn create_card(
        &self,
        list_id: ListId,
        title: &str,
        description: Option<&str>,
    ) -> Result<Card, ClientError> {
        let url = self.config.api_url(&format!("/api/lists/{}/cards", list_id));
        let body = CreateCardRequest {
            title: title.to_string(),
            description: description.map(str::to_string),
        };
        self.send(self.client.post(&url).json(&body)).await
    }

    pub async fn copy_list(&self, list_id: ListId) -> Result<ListWithCards, ClientError> {
        let url = self.config.api_url(&format!("/api/lists/{}/copy", list_id));
        self.send(self.client.post(&url)).await
    }
}

#[async_trait]
impl BoardBackend for HttpBoardBackend {
    async fn fetch_lists_with_cards(&self, board_id: BoardId) -> Result<Vec<ListWithCards>, ClientError> {
        let url = self.config.api_url(&format!("/api/boards/{}/lists", board_id));
        self.send(self.client.get(&url)).await
    }

    async fn batch_update_order(
        &self,
        board_id: BoardId,
        request: &BatchOrderRequest,
    ) -> Result<BatchOrderResponse, ClientError> {
        let url = self.config.api_url(&format!("/api/boards/{}/order", board_id));
        self.send(self.client.put(&url).json(request)).await
    }
}
