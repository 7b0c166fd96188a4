use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::model::author::Author;
use crate::domain::model::book::Book;
use crate::domain::model::id::{AuthorId, Isbn};
use crate::domain::repository::{AuthorRepository, BookRepository};

use super::tables::{CatalogTables, TableError};

/// プロセス内のカタログ。著者・書籍の両リポジトリを実装する。
/// 各操作は1回のロック内で完結する。
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<CatalogTables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogTables>, TableError> {
        self.tables.read().map_err(|_| TableError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogTables>, TableError> {
        self.tables.write().map_err(|_| TableError::LockPoisoned)
    }
}

impl AuthorRepository for MemoryCatalog {
    type Error = TableError;

    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, Self::Error> {
        Ok(self.read()?.author(id))
    }

    fn save(&self, author: Author) -> Result<Author, Self::Error> {
        self.write()?.save_author(author)
    }

    fn exists_by_id(&self, id: AuthorId) -> Result<bool, Self::Error> {
        Ok(self.read()?.has_author(id))
    }

    fn delete_by_id(&self, id: AuthorId) -> Result<(), Self::Error> {
        self.write()?.delete_author(id);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Author>, Self::Error> {
        Ok(self.read()?.authors())
    }
}

impl BookRepository for MemoryCatalog {
    type Error = TableError;

    fn find_by_id(&self, isbn: &Isbn) -> Result<Option<Book>, Self::Error> {
        self.read()?.book(isbn)
    }

    fn save(&self, book: Book) -> Result<Book, Self::Error> {
        self.write()?.save_book(book).map(|(saved, _)| saved)
    }

    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool, Self::Error> {
        Ok(self.read()?.has_book(isbn))
    }

    fn delete_by_id(&self, isbn: &Isbn) -> Result<(), Self::Error> {
        self.write()?.delete_book(isbn);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Book>, Self::Error> {
        self.read()?.books()
    }

    fn find_by_author_id(&self, author_id: AuthorId) -> Result<Vec<Book>, Self::Error> {
        self.read()?.books_by_author(author_id)
    }

    fn upsert(&self, book: Book) -> Result<(Book, bool), Self::Error> {
        self.write()?.save_book(book)
    }
}
