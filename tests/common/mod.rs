//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use kyobo_catalog::application::author_service::AuthorService;
use kyobo_catalog::application::book_service::BookService;
use kyobo_catalog::domain::model::author::{Author, AuthorSummary};
use kyobo_catalog::domain::model::book::{Book, BookSummary};
use kyobo_catalog::domain::model::id::{AuthorId, Isbn};
use kyobo_catalog::domain::repository::{AuthorRepository, BookRepository};
use kyobo_catalog::infra::json_store::JsonCatalogRepository;
use kyobo_catalog::infra::memory_store::MemoryCatalog;
use tempfile::TempDir;

// =============================================================================
// Fixtures
// =============================================================================

pub fn author_a() -> Author {
    Author::new("John Doe", 30, "some description", "author-image.jpeg")
}

pub fn author_b() -> Author {
    Author::new("Don Joe", 65, "some description", "author-image.jpeg")
}

pub fn book_summary(isbn: &str, author_id: Option<AuthorId>) -> BookSummary {
    BookSummary {
        isbn: Isbn::from(isbn),
        title: "Test Book Summary Title".into(),
        description: "Test Description".into(),
        image: "book-image.jpeg".into(),
        author: AuthorSummary {
            id: author_id,
            name: "ignored by upsert".into(),
            image: "ignored.jpeg".into(),
        },
    }
}

// =============================================================================
// Catalog — 1ストアを共有する2つのService
// =============================================================================

pub struct Catalog<S: AuthorRepository + BookRepository> {
    pub store: Arc<S>,
    pub authors: AuthorService<Arc<S>>,
    pub books: BookService<Arc<S>, Arc<S>>,
}

impl<S> Catalog<S>
where
    S: AuthorRepository + BookRepository,
{
    pub fn new(store: S) -> Self {
        let store = Arc::new(store);
        Self {
            authors: AuthorService::new(Arc::clone(&store)),
            books: BookService::new(Arc::clone(&store), Arc::clone(&store)),
            store,
        }
    }

    /// 著者を登録してIDを返す。
    pub fn seed_author(&self, author: Author) -> AuthorId {
        self.authors.create(author).unwrap().id().unwrap()
    }

    /// 書籍を登録する。
    pub fn seed_book(&self, isbn: &str, author_id: AuthorId) -> Book {
        self.books
            .create_update(Isbn::from(isbn), book_summary(isbn, Some(author_id)))
            .unwrap()
            .book
    }

    pub fn isbns(&self) -> Vec<String> {
        let mut isbns: Vec<String> = self
            .books
            .list(None)
            .unwrap()
            .iter()
            .map(|b| b.isbn().to_string())
            .collect();
        isbns.sort();
        isbns
    }
}

pub fn memory_catalog() -> Catalog<MemoryCatalog> {
    Catalog::new(MemoryCatalog::new())
}

/// 一時ディレクトリ上のJSONカタログ。`TempDir` はテスト終了まで保持すること。
pub fn json_catalog() -> (TempDir, Catalog<JsonCatalogRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::new(JsonCatalogRepository::new(dir.path().join("catalog.json")));
    (dir, catalog)
}

// =============================================================================
// FailingStore — ストア障害の伝播確認用
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
pub struct StoreDown;

/// すべての操作が失敗するストア。
pub struct FailingStore;

impl AuthorRepository for FailingStore {
    type Error = StoreDown;

    fn find_by_id(&self, _id: AuthorId) -> Result<Option<Author>, Self::Error> {
        Err(StoreDown)
    }

    fn save(&self, _author: Author) -> Result<Author, Self::Error> {
        Err(StoreDown)
    }

    fn exists_by_id(&self, _id: AuthorId) -> Result<bool, Self::Error> {
        Err(StoreDown)
    }

    fn delete_by_id(&self, _id: AuthorId) -> Result<(), Self::Error> {
        Err(StoreDown)
    }

    fn find_all(&self) -> Result<Vec<Author>, Self::Error> {
        Err(StoreDown)
    }
}

impl BookRepository for FailingStore {
    type Error = StoreDown;

    fn find_by_id(&self, _isbn: &Isbn) -> Result<Option<Book>, Self::Error> {
        Err(StoreDown)
    }

    fn save(&self, _book: Book) -> Result<Book, Self::Error> {
        Err(StoreDown)
    }

    fn exists_by_id(&self, _isbn: &Isbn) -> Result<bool, Self::Error> {
        Err(StoreDown)
    }

    fn delete_by_id(&self, _isbn: &Isbn) -> Result<(), Self::Error> {
        Err(StoreDown)
    }

    fn find_all(&self) -> Result<Vec<Book>, Self::Error> {
        Err(StoreDown)
    }

    fn find_by_author_id(&self, _author_id: AuthorId) -> Result<Vec<Book>, Self::Error> {
        Err(StoreDown)
    }
}

// =============================================================================
// Assertion helpers
// =============================================================================

/// 結果がErrで、メッセージに指定文字列を含むことをassert。
pub fn assert_error_contains<T: std::fmt::Debug>(
    result: Result<T, impl std::fmt::Display>,
    expected: &str,
) {
    match result {
        Err(e) => {
            let msg = e.to_string();
            assert!(
                msg.contains(expected),
                "Expected error containing '{expected}', got: '{msg}'"
            );
        }
        Ok(v) => panic!("Expected error containing '{expected}', got Ok({v:?})"),
    }
}
