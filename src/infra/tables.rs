//! ストア実装が共有するテーブル表現。
//!
//! 書籍行は著者をIDで参照し、読み出し時に著者行と結合する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::model::author::Author;
use crate::domain::model::book::Book;
use crate::domain::model::id::{AuthorId, Isbn};

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("book {isbn} references missing author {author_id}")]
    DanglingAuthor { isbn: Isbn, author_id: AuthorId },

    #[error("book {0} references an author that was never saved")]
    UnsavedAuthor(Isbn),

    #[error("foreign key violation: author {0} does not exist")]
    ForeignKey(AuthorId),

    #[error("author id sequence exhausted after {0}")]
    IdSpaceExhausted(AuthorId),

    #[error("lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRow {
    pub id: AuthorId,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    pub isbn: Isbn,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author_id: AuthorId,
}

impl AuthorRow {
    fn to_author(&self) -> Author {
        Author::new(
            self.name.clone(),
            self.age,
            self.description.clone(),
            self.image.clone(),
        )
        .with_id(self.id)
    }
}

/// 著者・書籍の2テーブルと著者IDシーケンス。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogTables {
    /// 最後に採番した著者ID。削除後も巻き戻さない。
    last_author_id: i64,
    authors: BTreeMap<AuthorId, AuthorRow>,
    books: BTreeMap<Isbn, BookRow>,
}

impl CatalogTables {
    pub fn author(&self, id: AuthorId) -> Option<Author> {
        self.authors.get(&id).map(AuthorRow::to_author)
    }

    pub fn has_author(&self, id: AuthorId) -> bool {
        self.authors.contains_key(&id)
    }

    pub fn authors(&self) -> Vec<Author> {
        self.authors.values().map(AuthorRow::to_author).collect()
    }

    /// insert-or-replace。IDが無ければ次の値を採番する。
    /// シーケンスが上限に達していれば採番せずにエラーを返す。
    pub fn save_author(&mut self, author: Author) -> Result<Author, TableError> {
        let id = match author.id() {
            Some(id) => {
                self.last_author_id = self.last_author_id.max(id.get());
                id
            }
            None => {
                let last = AuthorId::new(self.last_author_id);
                let id = last.next().ok_or(TableError::IdSpaceExhausted(last))?;
                self.last_author_id = id.get();
                id
            }
        };
        let row = AuthorRow {
            id,
            name: author.name,
            age: author.age,
            description: author.description,
            image: author.image,
        };
        let saved = row.to_author();
        self.authors.insert(id, row);
        Ok(saved)
    }

    /// 著者行とその書籍行を削除する。
    pub fn delete_author(&mut self, id: AuthorId) {
        if self.authors.remove(&id).is_some() {
            self.books.retain(|_, row| row.author_id != id);
        }
    }

    pub fn book(&self, isbn: &Isbn) -> Result<Option<Book>, TableError> {
        self.books.get(isbn).map(|row| self.join(row)).transpose()
    }

    pub fn has_book(&self, isbn: &Isbn) -> bool {
        self.books.contains_key(isbn)
    }

    pub fn books(&self) -> Result<Vec<Book>, TableError> {
        self.books.values().map(|row| self.join(row)).collect()
    }

    pub fn books_by_author(&self, author_id: AuthorId) -> Result<Vec<Book>, TableError> {
        self.books
            .values()
            .filter(|row| row.author_id == author_id)
            .map(|row| self.join(row))
            .collect()
    }

    /// insert-or-replace。戻り値の bool は新規挿入かどうか。
    pub fn save_book(&mut self, book: Book) -> Result<(Book, bool), TableError> {
        let author_id = book
            .author_id()
            .ok_or_else(|| TableError::UnsavedAuthor(book.isbn().clone()))?;
        if !self.has_author(author_id) {
            return Err(TableError::ForeignKey(author_id));
        }
        let row = BookRow {
            isbn: book.isbn().clone(),
            title: book.title,
            description: book.description,
            image: book.image,
            author_id,
        };
        let saved = self.join(&row)?;
        let inserted = self.books.insert(row.isbn.clone(), row).is_none();
        Ok((saved, inserted))
    }

    pub fn delete_book(&mut self, isbn: &Isbn) {
        self.books.remove(isbn);
    }

    fn join(&self, row: &BookRow) -> Result<Book, TableError> {
        let author = self
            .author(row.author_id)
            .ok_or_else(|| TableError::DanglingAuthor {
                isbn: row.isbn.clone(),
                author_id: row.author_id,
            })?;
        Ok(Book::new(
            row.isbn.clone(),
            row.title.clone(),
            row.description.clone(),
            row.image.clone(),
            author,
        ))
    }
}
