//! View model for a single document's detail panel.
//!
//! Everything the UI needs is derived from the document's status: which
//! badge to show, whether delete is offered, and where the title links.
//! The embedding view supplies the `Document` and owns list eviction once
//! a delete resolves.

use crate::models::document::{Document, DocumentStatus};
use crate::services::document_client::{DeleteError, DocumentApi};
use std::sync::atomic::{AtomicBool, Ordering};

/// The single status indicator shown for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    /// Upload landed, ingestion has not started yet.
    AwaitingProcessing,
    /// Ingestion in progress; callers typically animate this one.
    Processing,
    /// Ready to chat.
    Ready,
    /// Neutral fallback for a status this build does not recognize.
    Unknown,
}

/// Outcome of a user-initiated delete, reported to the caller so it can
/// evict the document from whatever list or cache it maintains.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The service acknowledged removal.
    Deleted,
    /// The service no longer had the document; treat the same as removed.
    AlreadyGone,
    /// Transient or server failure. The delete affordance re-enables so
    /// the user can retry manually; nothing retries automatically.
    Failed(DeleteError),
}

pub struct DocumentDetail {
    document: Document,
    delete_in_flight: AtomicBool,
}

impl DocumentDetail {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            delete_in_flight: AtomicBool::new(false),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Badge for the document's current status.
    ///
    /// Pure mapping: exactly one badge per status. An unrecognized status
    /// is a data error and asserts in debug builds; release builds degrade
    /// to the neutral badge instead of taking down the listing.
    pub fn badge(&self) -> StatusBadge {
        match self.document.status {
            DocumentStatus::Uploaded => StatusBadge::AwaitingProcessing,
            DocumentStatus::Processing => StatusBadge::Processing,
            DocumentStatus::Ready => StatusBadge::Ready,
            DocumentStatus::Unknown => {
                debug_assert!(false, "unrecognized document status reached the view model");
                StatusBadge::Unknown
            }
        }
    }

    /// Whether the delete action is offered: the document must be `Ready`
    /// and no delete may already be in flight.
    pub fn delete_enabled(&self) -> bool {
        self.document.status == DocumentStatus::Ready
            && !self.delete_in_flight.load(Ordering::Acquire)
    }

    /// Navigation target activated from the document title.
    pub fn conversation_path(&self) -> Option<String> {
        self.document.conversation_path()
    }

    /// Issue the delete command through `api`.
    ///
    /// Returns `None` without touching the client when the affordance is
    /// disabled, including while a previous delete for this document is
    /// still pending. At most one request is ever in flight per panel.
    pub async fn delete(&self, api: &dyn DocumentApi) -> Option<DeleteOutcome> {
        if self.document.status != DocumentStatus::Ready {
            return None;
        }
        if self
            .delete_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(document_id = %self.document.id, "Delete already pending, ignoring");
            return None;
        }

        let result = api.delete(&self.document.id).await;
        self.delete_in_flight.store(false, Ordering::Release);

        Some(match result {
            Ok(_) => DeleteOutcome::Deleted,
            Err(DeleteError::NotFound) => DeleteOutcome::AlreadyGone,
            Err(err) => {
                tracing::warn!(document_id = %self.document.id, error = %err, "Delete failed");
                DeleteOutcome::Failed(err)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentId;
    use crate::services::document_client::DeleteReceipt;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn document(status: &str) -> Document {
        serde_json::from_value(serde_json::json!({
            "documentid": "d1",
            "filename": "report.pdf",
            "pages": 12,
            "filesize": 204800,
            "created": "2023-10-01T12:00:00Z",
            "docstatus": status,
            "conversations": [{ "conversationid": "c1" }],
        }))
        .unwrap()
    }

    /// Fake api that counts calls and resolves with a fixed result.
    struct FakeApi {
        calls: AtomicUsize,
        result: fn() -> Result<DeleteReceipt, DeleteError>,
    }

    impl FakeApi {
        fn with(result: fn() -> Result<DeleteReceipt, DeleteError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentApi for FakeApi {
        async fn delete(&self, _id: &DocumentId) -> Result<DeleteReceipt, DeleteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    /// Fake api whose first request stays pending until released.
    struct GatedApi {
        calls: AtomicUsize,
        gate: Notify,
    }

    #[async_trait]
    impl DocumentApi for GatedApi {
        async fn delete(&self, _id: &DocumentId) -> Result<DeleteReceipt, DeleteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(DeleteReceipt::default())
        }
    }

    #[test]
    fn badge_matches_status_table() {
        for (status, badge) in [
            ("UPLOADED", StatusBadge::AwaitingProcessing),
            ("PROCESSING", StatusBadge::Processing),
            ("READY", StatusBadge::Ready),
        ] {
            let panel = DocumentDetail::new(document(status));
            assert_eq!(panel.badge(), badge);
        }
    }

    #[test]
    #[should_panic(expected = "unrecognized document status")]
    fn unrecognized_status_asserts_in_debug_builds() {
        let panel = DocumentDetail::new(document("ARCHIVED"));
        let _ = panel.badge();
    }

    #[test]
    fn delete_enabled_only_when_ready() {
        assert!(!DocumentDetail::new(document("UPLOADED")).delete_enabled());
        assert!(!DocumentDetail::new(document("PROCESSING")).delete_enabled());
        assert!(DocumentDetail::new(document("READY")).delete_enabled());
    }

    #[test]
    fn navigation_target_is_independent_of_status() {
        for status in ["UPLOADED", "PROCESSING", "READY"] {
            let panel = DocumentDetail::new(document(status));
            assert_eq!(panel.conversation_path().as_deref(), Some("/doc/d1/c1/"));
        }
    }

    #[tokio::test]
    async fn delete_refuses_non_ready_documents() {
        let api = FakeApi::with(|| Ok(DeleteReceipt::default()));
        let panel = DocumentDetail::new(document("PROCESSING"));

        assert!(panel.delete(&api).await.is_none());
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn delete_resolves_to_deleted_on_success() {
        let api = FakeApi::with(|| Ok(DeleteReceipt::default()));
        let panel = DocumentDetail::new(document("READY"));

        match panel.delete(&api).await {
            Some(DeleteOutcome::Deleted) => {}
            other => panic!("expected Deleted, got {:?}", other),
        }
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn not_found_resolves_to_already_gone() {
        let api = FakeApi::with(|| Err(DeleteError::NotFound));
        let panel = DocumentDetail::new(document("READY"));

        match panel.delete(&api).await {
            Some(DeleteOutcome::AlreadyGone) => {}
            other => panic!("expected AlreadyGone, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_reenables_the_delete_affordance() {
        let api = FakeApi::with(|| {
            Err(DeleteError::Server {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        });
        let panel = DocumentDetail::new(document("READY"));

        match panel.delete(&api).await {
            Some(DeleteOutcome::Failed(DeleteError::Server { status })) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            }
            other => panic!("expected Failed(Server), got {:?}", other),
        }
        assert!(panel.delete_enabled());
    }

    #[tokio::test]
    async fn overlapping_delete_issues_a_single_request() {
        let api = Arc::new(GatedApi {
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
        });
        let panel = Arc::new(DocumentDetail::new(document("READY")));

        let first = {
            let api = api.clone();
            let panel = panel.clone();
            tokio::spawn(async move { panel.delete(api.as_ref()).await })
        };

        // Wait until the first request is actually in flight.
        while api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        assert!(!panel.delete_enabled());

        // Second click while the first request is pending: ignored.
        assert!(panel.delete(api.as_ref()).await.is_none());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);

        api.gate.notify_one();
        match first.await.unwrap() {
            Some(DeleteOutcome::Deleted) => {}
            other => panic!("expected Deleted, got {:?}", other),
        }
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert!(panel.delete_enabled());
    }
}
