//! Command client for the external document service.
//!
//! The delete capability sits behind the [`DocumentApi`] trait so callers
//! and tests inject the client explicitly instead of reaching for a shared
//! global one.

use crate::config::DocumentServiceSettings;
use crate::models::document::DocumentId;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Failure classification for a delete request.
///
/// `NotFound` stays distinguishable from `Server` so the caller can resolve
/// the UI to "already gone" instead of surfacing an error for a document
/// the service no longer has.
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("document not found on the document service")]
    NotFound,

    #[error("delete request timed out")]
    Timeout,

    #[error("network error reaching the document service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("document service rejected the delete with status {status}")]
    Server { status: StatusCode },
}

impl DeleteError {
    /// Whether a manual retry could plausibly succeed. Retrying is always
    /// the caller's decision; this client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeleteError::NotFound => false,
            DeleteError::Timeout | DeleteError::Network(_) => true,
            DeleteError::Server { status } => status.is_server_error(),
        }
    }
}

/// Acknowledgement body the document service returns on a successful
/// delete. Parsed leniently: an empty or minimal response still counts as
/// success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteReceipt {
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub document_id: String,
    /// Conversations the service removed along with the document.
    #[serde(default)]
    pub conversation_ids: Vec<String>,
}

/// Mutating operations this crate issues against the document service.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Delete the document with the given id. Issues exactly one request
    /// per call; never retries.
    async fn delete(&self, id: &DocumentId) -> Result<DeleteReceipt, DeleteError>;
}

/// reqwest-backed [`DocumentApi`] implementation.
pub struct HttpDocumentClient {
    client: Client,
    settings: DocumentServiceSettings,
}

impl HttpDocumentClient {
    pub fn new(settings: DocumentServiceSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentClient {
    async fn delete(&self, id: &DocumentId) -> Result<DeleteReceipt, DeleteError> {
        let url = format!("{}/doc/delete/{}", self.settings.url, id);

        let mut request = self.client.delete(&url);
        if let Some(token) = &self.settings.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(document_id = %id, "Delete request timed out");
                DeleteError::Timeout
            } else {
                tracing::error!(document_id = %id, error = %e, "Delete request failed to reach document service");
                DeleteError::Network(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            // The service replies with a small JSON acknowledgement; an
            // empty body is still a successful delete.
            let receipt = response.json::<DeleteReceipt>().await.unwrap_or_default();
            tracing::info!(
                document_id = %id,
                conversations_removed = receipt.conversation_ids.len(),
                "Document deleted"
            );
            Ok(receipt)
        } else if status == StatusCode::NOT_FOUND {
            tracing::info!(document_id = %id, "Delete target already gone");
            Err(DeleteError::NotFound)
        } else {
            tracing::error!(document_id = %id, status = %status, "Document service rejected delete");
            Err(DeleteError::Server { status })
        }
    }
}
