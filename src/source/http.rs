use std::{sync::Arc, time::Duration};

use futures::future::BoxFuture;
use reqwest::Client;

use crate::{
    dto::game_state::GameState,
    source::{
        GameStateSource,
        error::{SourceError, SourceResult},
    },
};

/// Polls the game state over HTTP GET.
#[derive(Clone)]
pub struct HttpGameStateSource {
    client: Client,
    url: Arc<str>,
    auth_token: Option<Arc<str>>,
}

impl HttpGameStateSource {
    /// Build a source for `url`; every request is bounded by `timeout`.
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::ClientBuilder { source })?;

        Ok(Self {
            client,
            url: Arc::from(url.into()),
            auth_token: auth_token.map(Arc::from),
        })
    }

    /// Endpoint being polled.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_once(self) -> SourceResult<GameState> {
        let url = self.url.to_string();
        let mut builder = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|source| SourceError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::RequestStatus { url, status });
        }

        response
            .json::<GameState>()
            .await
            .map_err(|source| SourceError::DecodeResponse { url, source })
    }
}

impl GameStateSource for HttpGameStateSource {
    fn fetch(&self) -> BoxFuture<'static, SourceResult<GameState>> {
        let this = self.clone();
        Box::pin(this.fetch_once())
    }
}
