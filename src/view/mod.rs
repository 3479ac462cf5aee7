pub mod document_detail;
