use super::model::id::{AuthorId, Isbn};

/// 業務ルール違反の分類。Transport層はこの2種類だけを見てステータスを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 呼び出しの引数そのものが前提条件を満たさない
    InvalidArgument,
    /// 対象または参照先が要求された状態で存在しない
    InvalidState,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("author already has an id: {0}")]
    AuthorIdAssigned(AuthorId),

    #[error("isbn must not be blank")]
    EmptyIsbn,

    #[error("author not found: {0}")]
    AuthorNotFound(AuthorId),

    #[error("book not found: {0}")]
    BookNotFound(Isbn),

    #[error("book must reference an author id")]
    AuthorReferenceMissing,

    #[error("referenced author does not exist: {0}")]
    UnresolvedAuthor(AuthorId),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthorIdAssigned(_) | Self::EmptyIsbn => ErrorKind::InvalidArgument,
            Self::AuthorNotFound(_)
            | Self::BookNotFound(_)
            | Self::AuthorReferenceMissing
            | Self::UnresolvedAuthor(_) => ErrorKind::InvalidState,
        }
    }
}
