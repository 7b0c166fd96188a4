use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::model::book::{Book, BookSummary, BookUpdateRequest};
use crate::domain::model::id::{AuthorId, Isbn};
use crate::domain::repository::{AuthorRepository, BookRepository};

use super::error::AppError;

/// upsert の結果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub book: Book,
    /// このISBNの書籍が呼び出し前に存在しなかった
    pub created: bool,
}

/// 書籍に対するユースケース。著者参照の解決に著者ストアも使う。
pub struct BookService<B: BookRepository, A: AuthorRepository> {
    books: B,
    authors: A,
}

impl<B: BookRepository, A: AuthorRepository> BookService<B, A> {
    pub fn new(books: B, authors: A) -> Self {
        Self { books, authors }
    }

    pub fn get(&self, isbn: &Isbn) -> Result<Option<Book>, AppError> {
        debug!(%isbn, "book lookup");
        self.books.find_by_id(isbn).map_err(AppError::storage)
    }

    /// `author_id` 指定時はその著者の書籍だけ（完全一致）、未指定なら全件。
    pub fn list(&self, author_id: Option<AuthorId>) -> Result<Vec<Book>, AppError> {
        debug!(author_id = ?author_id, "book list");
        let books = match author_id {
            Some(id) => self.books.find_by_author_id(id),
            None => self.books.find_all(),
        };
        books.map_err(AppError::storage)
    }

    /// 部分更新。title / description / image をそれぞれ自分のパッチ値からマージする。
    pub fn partial_update(&self, isbn: &Isbn, patch: BookUpdateRequest) -> Result<Book, AppError> {
        let existing = self
            .books
            .find_by_id(isbn)
            .map_err(AppError::storage)?
            .ok_or_else(|| DomainError::BookNotFound(isbn.clone()))?;
        let saved = self
            .books
            .save(existing.apply_update(patch))
            .map_err(AppError::storage)?;
        info!(%isbn, "book patched");
        Ok(saved)
    }

    /// create-or-update。
    ///
    /// 1. 本文のISBNをパスのISBNで正規化
    /// 2. 参照先の著者をストアから解決（無ければ `InvalidState`、書籍は作らない）
    /// 3. 解決した著者エンティティを結び付けて保存
    ///
    /// 新規か更新かの判定は保存と同時にストアが行う（[`BookRepository::upsert`]）。
    ///
    /// 解決から保存までの間に著者が削除されると保存はストアエラーになる。
    /// その場合は著者の存在を確かめ直し、消えていれば解決失敗と同じ `InvalidState` を返す。
    pub fn create_update(&self, isbn: Isbn, summary: BookSummary) -> Result<Upserted, AppError> {
        if isbn.is_blank() {
            return Err(DomainError::EmptyIsbn.into());
        }
        let summary = summary.with_isbn(isbn);

        let author_id = summary
            .author
            .id
            .ok_or(DomainError::AuthorReferenceMissing)?;
        let author = self
            .authors
            .find_by_id(author_id)
            .map_err(AppError::storage)?
            .ok_or(DomainError::UnresolvedAuthor(author_id))?;

        let (book, created) = match self.books.upsert(summary.into_book(author)) {
            Ok(upserted) => upserted,
            Err(err) => {
                if !self
                    .authors
                    .exists_by_id(author_id)
                    .map_err(AppError::storage)?
                {
                    return Err(DomainError::UnresolvedAuthor(author_id).into());
                }
                return Err(AppError::storage(err));
            }
        };
        info!(isbn = %book.isbn(), %author_id, created, "book upserted");
        Ok(Upserted { book, created })
    }

    /// 冪等な削除。書籍には従属データが無いのでカスケードしない。
    pub fn delete(&self, isbn: &Isbn) -> Result<(), AppError> {
        self.books.delete_by_id(isbn).map_err(AppError::storage)?;
        info!(%isbn, "book deleted");
        Ok(())
    }
}
