pub mod config;
pub mod models;
pub mod services;
pub mod view;

pub use models::document::{Document, DocumentId, DocumentStatus};
pub use services::document_client::{
    DeleteError, DeleteReceipt, DocumentApi, HttpDocumentClient,
};
pub use view::document_detail::{DeleteOutcome, DocumentDetail, StatusBadge};
