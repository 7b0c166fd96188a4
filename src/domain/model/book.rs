use super::author::{Author, AuthorSummary};
use super::id::{AuthorId, Isbn};

/// 書籍。メモリ上では著者を値で持ち、ストア上は著者IDで参照する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    isbn: Isbn,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: Author,
}

/// 書籍の部分更新リクエスト（Noneのフィールドは変更しない）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// upsert の入力。著者は縮約ビューで受け取り、IDだけを解決に使う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSummary {
    pub isbn: Isbn,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: AuthorSummary,
}

impl Book {
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        author: Author,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            description: description.into(),
            image: image.into(),
            author,
        }
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn author_id(&self) -> Option<AuthorId> {
        self.author.id()
    }

    /// パッチをフィールド単位でマージする。各フィールドは自分自身のパッチ値だけを見る。
    pub fn apply_update(self, patch: BookUpdateRequest) -> Self {
        Self {
            isbn: self.isbn,
            title: patch.title.unwrap_or(self.title),
            description: patch.description.unwrap_or(self.description),
            image: patch.image.unwrap_or(self.image),
            author: self.author,
        }
    }
}

impl BookSummary {
    /// パスで指定されたISBNを優先する。
    pub fn with_isbn(self, isbn: Isbn) -> Self {
        Self { isbn, ..self }
    }

    /// 解決済みの著者エンティティを結び付けて書籍を組み立てる。
    /// 呼び出し側の著者ビューは捨てられる。
    pub fn into_book(self, author: Author) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title,
            description: self.description,
            image: self.image,
            author,
        }
    }
}
