//! reqwest implementation of the `BazaarClient` port.
//!
//! Every call is a GET with query parameters against the Bazaar server.
//! Any non-2xx response becomes `ClientError::Status` carrying the body.

use bazaar_core::actor::BazaarClient;
use bazaar_types::error::ClientError;
use bazaar_types::listing::Listing;
use bazaar_types::message::{Message, NewMessage};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to a Bazaar server at `base_url` (e.g. `http://127.0.0.1:5000`).
#[derive(Clone)]
pub struct HttpBazaarClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpBazaarClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bazaar-bot/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Build from a host and port, e.g. `("127.0.0.1", 5000)`.
    pub fn for_server(host: &str, port: u16) -> Self {
        Self::new(format!("http://{host}:{port}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ClientError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "bazaar request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let body = self.get(path, query).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl BazaarClient for HttpBazaarClient {
    async fn is_silenced(&self) -> Result<bool, ClientError> {
        let body = self.get("/get_silence", &[]).await?;
        match body.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ClientError::Decode(format!("unexpected silence flag '{other}'"))),
        }
    }

    async fn register(&self, name: &str, port: Option<&str>) -> Result<(), ClientError> {
        let mut query = vec![("name", name)];
        if let Some(port) = port {
            query.push(("port", port));
        }
        self.get("/register", &query).await.map(drop)
    }

    async fn list(&self, item: &str, price: f64, seller: &str) -> Result<(), ClientError> {
        let price = price.to_string();
        self.get("/list", &[("item", item), ("price", &price), ("seller", seller)])
            .await
            .map(drop)
    }

    async fn available(&self, item: &str) -> Result<Vec<Listing>, ClientError> {
        self.get_json("/available", &[("item", item)]).await
    }

    async fn settle(&self, item: &str, buyer: &str) -> Result<(), ClientError> {
        self.get("/sold", &[("item", item), ("buyer", buyer)])
            .await
            .map(drop)
    }

    async fn inventory(&self, buyer: &str) -> Result<Vec<Listing>, ClientError> {
        self.get_json("/inventory", &[("buyer", buyer)]).await
    }

    async fn messages(&self, bot: &str) -> Result<Vec<Message>, ClientError> {
        self.get_json("/get_messages", &[("bot", bot)]).await
    }

    async fn post(&self, message: &NewMessage) -> Result<(), ClientError> {
        let kind = message.kind.to_string();
        self.get(
            "/message",
            &[
                ("sender", message.sender.as_str()),
                ("recipient", message.recipient.as_str()),
                ("content", message.content.as_str()),
                ("type", kind.as_str()),
            ],
        )
        .await
        .map(drop)
    }
}
