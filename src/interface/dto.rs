//! REST の入出力スキーマと、ドメイン型との相互変換。

use serde::{Deserialize, Serialize};

use crate::domain::model::author::{Author, AuthorSummary, AuthorUpdateRequest};
use crate::domain::model::book::{Book, BookSummary, BookUpdateRequest};
use crate::domain::model::id::{AuthorId, Isbn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorUpdateRequestDto {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummaryDto {
    /// リクエストでは省略可能（upsert側で InvalidState になる）。レスポンスでは常に設定される。
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummaryDto {
    /// パスのISBNが優先されるため、本文では省略可能
    #[serde(default)]
    pub isbn: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub author: AuthorSummaryDto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookUpdateRequestDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListQuery {
    pub author: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 著者IDを持たない書籍はレスポンスに変換できない。
#[derive(Debug, thiserror::Error)]
#[error("book {0} has an author without id")]
pub struct MissingAuthorId(pub Isbn);

// --- Author ---

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        let author = Author::new(dto.name, dto.age, dto.description, dto.image);
        match dto.id {
            Some(id) => author.with_id(AuthorId::new(id)),
            None => author,
        }
    }
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id().map(|id| id.get()),
            name: author.name.clone(),
            age: author.age,
            description: author.description.clone(),
            image: author.image.clone(),
        }
    }
}

impl From<AuthorUpdateRequestDto> for AuthorUpdateRequest {
    fn from(dto: AuthorUpdateRequestDto) -> Self {
        Self {
            name: dto.name,
            age: dto.age,
            description: dto.description,
            image: dto.image,
        }
    }
}

impl From<AuthorSummaryDto> for AuthorSummary {
    fn from(dto: AuthorSummaryDto) -> Self {
        Self {
            id: dto.id.map(AuthorId::new),
            name: dto.name,
            image: dto.image,
        }
    }
}

// --- Book ---

impl From<BookSummaryDto> for BookSummary {
    fn from(dto: BookSummaryDto) -> Self {
        Self {
            isbn: Isbn::new(dto.isbn),
            title: dto.title,
            description: dto.description,
            image: dto.image,
            author: dto.author.into(),
        }
    }
}

impl TryFrom<&Book> for BookSummaryDto {
    type Error = MissingAuthorId;

    fn try_from(book: &Book) -> Result<Self, Self::Error> {
        let author_id = book
            .author_id()
            .ok_or_else(|| MissingAuthorId(book.isbn().clone()))?;
        Ok(Self {
            isbn: book.isbn().to_string(),
            title: book.title.clone(),
            description: book.description.clone(),
            image: book.image.clone(),
            author: AuthorSummaryDto {
                id: Some(author_id.get()),
                name: book.author.name.clone(),
                image: book.author.image.clone(),
            },
        })
    }
}

impl From<BookUpdateRequestDto> for BookUpdateRequest {
    fn from(dto: BookUpdateRequestDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            image: dto.image,
        }
    }
}
