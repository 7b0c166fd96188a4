use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::model::author::Author;
use crate::domain::model::book::Book;
use crate::domain::model::id::{AuthorId, Isbn};
use crate::domain::repository::{AuthorRepository, BookRepository};

use super::tables::{CatalogTables, TableError};

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// JSONファイルによるカタログ実装。
/// 1 カタログ = 1 JSONファイル（両テーブル + 著者IDシーケンス）。
pub struct JsonCatalogRepository {
    path: PathBuf,
    /// 読み出し → 変更 → 書き戻し を直列化する
    guard: Mutex<()>,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<CatalogTables, JsonStoreError> {
        if !self.path.exists() {
            return Ok(CatalogTables::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn store(&self, tables: &CatalogTables) -> Result<(), JsonStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(tables)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, &content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&CatalogTables) -> T) -> Result<T, JsonStoreError> {
        let _lock = self.guard.lock().map_err(|_| TableError::LockPoisoned)?;
        let tables = self.load()?;
        Ok(f(&tables))
    }

    /// ロックを保持したまま読み込み・変更・書き戻しを行う。
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut CatalogTables) -> Result<T, TableError>,
    ) -> Result<T, JsonStoreError> {
        let _lock = self.guard.lock().map_err(|_| TableError::LockPoisoned)?;
        let mut tables = self.load()?;
        let out = f(&mut tables)?;
        self.store(&tables)?;
        Ok(out)
    }
}

impl AuthorRepository for JsonCatalogRepository {
    type Error = JsonStoreError;

    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, Self::Error> {
        self.read(|t| t.author(id))
    }

    fn save(&self, author: Author) -> Result<Author, Self::Error> {
        self.mutate(|t| t.save_author(author))
    }

    fn exists_by_id(&self, id: AuthorId) -> Result<bool, Self::Error> {
        self.read(|t| t.has_author(id))
    }

    fn delete_by_id(&self, id: AuthorId) -> Result<(), Self::Error> {
        self.mutate(|t| {
            t.delete_author(id);
            Ok(())
        })
    }

    fn find_all(&self) -> Result<Vec<Author>, Self::Error> {
        self.read(|t| t.authors())
    }
}

impl BookRepository for JsonCatalogRepository {
    type Error = JsonStoreError;

    fn find_by_id(&self, isbn: &Isbn) -> Result<Option<Book>, Self::Error> {
        Ok(self.read(|t| t.book(isbn))??)
    }

    fn save(&self, book: Book) -> Result<Book, Self::Error> {
        self.mutate(|t| t.save_book(book).map(|(saved, _)| saved))
    }

    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool, Self::Error> {
        self.read(|t| t.has_book(isbn))
    }

    fn delete_by_id(&self, isbn: &Isbn) -> Result<(), Self::Error> {
        self.mutate(|t| {
            t.delete_book(isbn);
            Ok(())
        })
    }

    fn find_all(&self) -> Result<Vec<Book>, Self::Error> {
        Ok(self.read(|t| t.books())??)
    }

    fn find_by_author_id(&self, author_id: AuthorId) -> Result<Vec<Book>, Self::Error> {
        Ok(self.read(|t| t.books_by_author(author_id))??)
    }

    fn upsert(&self, book: Book) -> Result<(Book, bool), Self::Error> {
        self.mutate(|t| t.save_book(book))
    }
}
