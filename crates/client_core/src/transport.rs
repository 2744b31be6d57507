use async_trait::async_trait;
use reqwest::{header, Client};
use shared::{
    error::ApiError,
    protocol::{SaveRequest, SaveResponse},
};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const SAVE_PATH: &str = "save";

/// Network boundary that persists the list and answers with the server's
/// version of it.
#[async_trait]
pub trait SaveTransport: Send + Sync {
    async fn save(&self, request: SaveRequest) -> ClientResult<SaveResponse>;
}

pub struct MissingSaveTransport;

#[async_trait]
impl SaveTransport for MissingSaveTransport {
    async fn save(&self, _request: SaveRequest) -> ClientResult<SaveResponse> {
        Err(ClientError::TransportUnavailable)
    }
}

pub struct HttpSaveTransport {
    http: Client,
    save_url: Url,
}

impl HttpSaveTransport {
    pub fn new(server_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> ClientResult<Self> {
        let save_url = save_url(server_url)?;
        Ok(Self { http, save_url })
    }

    pub fn save_url(&self) -> &Url {
        &self.save_url
    }
}

fn save_url(server_url: &str) -> ClientResult<Url> {
    let invalid = |source| ClientError::InvalidServerUrl {
        url: server_url.to_string(),
        source,
    };
    let mut base = Url::parse(server_url.trim()).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(SAVE_PATH).map_err(invalid)
}

#[async_trait]
impl SaveTransport for HttpSaveTransport {
    async fn save(&self, request: SaveRequest) -> ClientResult<SaveResponse> {
        debug!(url = %self.save_url, artists = request.artist_ids.len(), "posting save request");
        let res = self
            .http
            .post(self.save_url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        if !status.is_success() {
            return Err(match ApiError::from_body(&body) {
                Some(api_error) => ClientError::Rejected(api_error),
                None => ClientError::Status {
                    status: status.as_u16(),
                },
            });
        }

        serde_json::from_slice::<SaveResponse>(&body).map_err(|err| {
            match ApiError::from_body(&body) {
                Some(api_error) => ClientError::Rejected(api_error),
                None => ClientError::Decode(err.to_string()),
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
