use thiserror::Error;

/// Errors produced by type construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("document id must not be empty")]
    EmptyDocumentId,

    #[error("duplicate article id {article_id:?} in document {document_id}")]
    DuplicateArticleId {
        document_id: String,
        article_id: String,
    },
}
