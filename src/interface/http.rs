//! REST API for kyobo-catalog
//!
//! HTTP (axum) <-> application::AuthorService / BookService
//!
//! /v1/authors, /v1/authors/:id, /v1/books, /v1/books/:isbn, /health

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::application::author_service::AuthorService;
use crate::application::book_service::BookService;
use crate::application::error::AppError;
use crate::domain::model::id::{AuthorId, Isbn};
use crate::domain::repository::{AuthorRepository, BookRepository};

use super::dto::{
    AuthorDto, AuthorUpdateRequestDto, BookListQuery, BookSummaryDto, BookUpdateRequestDto,
    ErrorResponse, HealthResponse, MissingAuthorId,
};

// =============================================================================
// Public entry point
// =============================================================================

/// 両リポジトリを1つで実装するストア。
pub trait CatalogStore: AuthorRepository + BookRepository + Send + Sync + 'static {}

impl<T> CatalogStore for T where T: AuthorRepository + BookRepository + Send + Sync + 'static {}

/// HTTPサーバを起動する。
pub async fn run<S: CatalogStore>(addr: SocketAddr, store: Arc<S>) -> anyhow::Result<()> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("kyobo-catalog listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// ルータを組み立てる（テストからも使う）。
pub fn router<S: CatalogStore>(store: Arc<S>) -> Router {
    let state = Arc::new(CatalogState {
        authors: AuthorService::new(Arc::clone(&store)),
        books: BookService::new(Arc::clone(&store), store),
    });

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/v1/authors",
            get(list_authors::<S>).post(create_author::<S>),
        )
        .route(
            "/v1/authors/:id",
            get(get_author::<S>)
                .put(full_update_author::<S>)
                .patch(partial_update_author::<S>)
                .delete(delete_author::<S>),
        )
        .route("/v1/books", get(list_books::<S>))
        .route(
            "/v1/books/:isbn",
            get(get_book::<S>)
                .put(create_update_book::<S>)
                .patch(partial_update_book::<S>)
                .delete(delete_book::<S>),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// State & errors
// =============================================================================

struct CatalogState<S: CatalogStore> {
    authors: AuthorService<Arc<S>>,
    books: BookService<Arc<S>, Arc<S>>,
}

type Shared<S> = State<Arc<CatalogState<S>>>;

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Projection(#[from] MissingAuthorId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // 業務ルール違反は種類を問わず 400
            ApiError::App(e) if e.kind().is_some() => StatusCode::BAD_REQUEST,
            ApiError::App(_) | ApiError::Projection(_) => {
                error!("internal error: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Handlers
// =============================================================================

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "kyobo-catalog".to_string(),
        status: "running".to_string(),
    })
}

// --- authors ---

async fn create_author<S: CatalogStore>(
    State(state): Shared<S>,
    Json(body): Json<AuthorDto>,
) -> ApiResult<(StatusCode, Json<AuthorDto>)> {
    let created = state.authors.create(body.into())?;
    Ok((StatusCode::CREATED, Json(AuthorDto::from(&created))))
}

async fn list_authors<S: CatalogStore>(State(state): Shared<S>) -> ApiResult<Json<Vec<AuthorDto>>> {
    let authors = state.authors.list()?;
    Ok(Json(authors.iter().map(AuthorDto::from).collect()))
}

async fn get_author<S: CatalogStore>(
    State(state): Shared<S>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AuthorDto>> {
    state
        .authors
        .get(AuthorId::new(id))?
        .map(|author| Json(AuthorDto::from(&author)))
        .ok_or_else(|| ApiError::NotFound(format!("author {id}")))
}

async fn full_update_author<S: CatalogStore>(
    State(state): Shared<S>,
    Path(id): Path<i64>,
    Json(body): Json<AuthorDto>,
) -> ApiResult<Json<AuthorDto>> {
    let updated = state.authors.full_update(AuthorId::new(id), body.into())?;
    Ok(Json(AuthorDto::from(&updated)))
}

async fn partial_update_author<S: CatalogStore>(
    State(state): Shared<S>,
    Path(id): Path<i64>,
    Json(body): Json<AuthorUpdateRequestDto>,
) -> ApiResult<Json<AuthorDto>> {
    let updated = state
        .authors
        .partial_update(AuthorId::new(id), body.into())?;
    Ok(Json(AuthorDto::from(&updated)))
}

async fn delete_author<S: CatalogStore>(
    State(state): Shared<S>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.authors.delete(AuthorId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

// --- books ---

async fn create_update_book<S: CatalogStore>(
    State(state): Shared<S>,
    Path(isbn): Path<String>,
    Json(body): Json<BookSummaryDto>,
) -> ApiResult<(StatusCode, Json<BookSummaryDto>)> {
    let upserted = state.books.create_update(Isbn::new(isbn), body.into())?;
    let status = if upserted.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(BookSummaryDto::try_from(&upserted.book)?)))
}

async fn list_books<S: CatalogStore>(
    State(state): Shared<S>,
    Query(query): Query<BookListQuery>,
) -> ApiResult<Json<Vec<BookSummaryDto>>> {
    let books = state.books.list(query.author.map(AuthorId::new))?;
    let dtos = books
        .iter()
        .map(BookSummaryDto::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(dtos))
}

async fn get_book<S: CatalogStore>(
    State(state): Shared<S>,
    Path(isbn): Path<String>,
) -> ApiResult<Json<BookSummaryDto>> {
    let book = state
        .books
        .get(&Isbn::new(isbn.as_str()))?
        .ok_or_else(|| ApiError::NotFound(format!("book {isbn}")))?;
    Ok(Json(BookSummaryDto::try_from(&book)?))
}

async fn partial_update_book<S: CatalogStore>(
    State(state): Shared<S>,
    Path(isbn): Path<String>,
    Json(body): Json<BookUpdateRequestDto>,
) -> ApiResult<Json<BookSummaryDto>> {
    let updated = state.books.partial_update(&Isbn::new(isbn), body.into())?;
    Ok(Json(BookSummaryDto::try_from(&updated)?))
}

async fn delete_book<S: CatalogStore>(
    State(state): Shared<S>,
    Path(isbn): Path<String>,
) -> ApiResult<StatusCode> {
    state.books.delete(&Isbn::new(isbn))?;
    Ok(StatusCode::NO_CONTENT)
}
