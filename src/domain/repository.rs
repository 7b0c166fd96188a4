use std::sync::Arc;

use super::model::author::Author;
use super::model::book::Book;
use super::model::id::{AuthorId, Isbn};

/// 著者テーブルの抽象。Infra層が実装する。
pub trait AuthorRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, Self::Error>;

    /// insert-or-replace。`id` が無ければ採番して付与する。
    fn save(&self, author: Author) -> Result<Author, Self::Error>;

    fn exists_by_id(&self, id: AuthorId) -> Result<bool, Self::Error>;

    /// 存在しなければ何もしない。著者の書籍もまとめて削除する（カスケード）。
    fn delete_by_id(&self, id: AuthorId) -> Result<(), Self::Error>;

    fn find_all(&self) -> Result<Vec<Author>, Self::Error>;
}

/// 書籍テーブルの抽象。著者はIDで参照し、読み出し時に結合する。
pub trait BookRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    fn find_by_id(&self, isbn: &Isbn) -> Result<Option<Book>, Self::Error>;

    /// insert-or-replace。
    fn save(&self, book: Book) -> Result<Book, Self::Error>;

    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool, Self::Error>;

    /// 存在しなければ何もしない。
    fn delete_by_id(&self, isbn: &Isbn) -> Result<(), Self::Error>;

    fn find_all(&self) -> Result<Vec<Book>, Self::Error>;

    fn find_by_author_id(&self, author_id: AuthorId) -> Result<Vec<Book>, Self::Error>;

    /// 保存して、新規挿入だったかどうかを返す。
    ///
    /// 既定実装は exists → save の2手順で原子的ではない。同じISBNへの並行呼び出しは
    /// どちらも「新規」と報告しうる。ストアが単一ステップで判定できるなら上書きすること。
    fn upsert(&self, book: Book) -> Result<(Book, bool), Self::Error> {
        let existed = self.exists_by_id(book.isbn())?;
        let saved = self.save(book)?;
        Ok((saved, !existed))
    }
}

impl<T: AuthorRepository + ?Sized> AuthorRepository for Arc<T> {
    type Error = T::Error;

    fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, Self::Error> {
        (**self).find_by_id(id)
    }

    fn save(&self, author: Author) -> Result<Author, Self::Error> {
        (**self).save(author)
    }

    fn exists_by_id(&self, id: AuthorId) -> Result<bool, Self::Error> {
        (**self).exists_by_id(id)
    }

    fn delete_by_id(&self, id: AuthorId) -> Result<(), Self::Error> {
        (**self).delete_by_id(id)
    }

    fn find_all(&self) -> Result<Vec<Author>, Self::Error> {
        (**self).find_all()
    }
}

impl<T: BookRepository + ?Sized> BookRepository for Arc<T> {
    type Error = T::Error;

    fn find_by_id(&self, isbn: &Isbn) -> Result<Option<Book>, Self::Error> {
        (**self).find_by_id(isbn)
    }

    fn save(&self, book: Book) -> Result<Book, Self::Error> {
        (**self).save(book)
    }

    fn exists_by_id(&self, isbn: &Isbn) -> Result<bool, Self::Error> {
        (**self).exists_by_id(isbn)
    }

    fn delete_by_id(&self, isbn: &Isbn) -> Result<(), Self::Error> {
        (**self).delete_by_id(isbn)
    }

    fn find_all(&self) -> Result<Vec<Book>, Self::Error> {
        (**self).find_all()
    }

    fn find_by_author_id(&self, author_id: AuthorId) -> Result<Vec<Book>, Self::Error> {
        (**self).find_by_author_id(author_id)
    }

    fn upsert(&self, book: Book) -> Result<(Book, bool), Self::Error> {
        (**self).upsert(book)
    }
}
