pub mod models;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use biblio_http::error::AppError;
use biblio_kernel::{InitCtx, Module};
use biblio_store::model::{Book, NewBook};
use biblio_store::RecordStore;

use crate::utils;
use models::{CreateBook, UpdateBook};
use service::{CatalogError, CatalogService};

/// Catalog module: owns `Book` rows and their stock arithmetic.
pub struct BooksModule {
    catalog: CatalogService,
}

impl BooksModule {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(save_book))
            .route("/{id}", get(get_book).put(update_book).delete(delete_book))
            .with_state(self.catalog.clone())
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => AppError::not_found(error.to_string()),
            CatalogError::HasActiveLoans => AppError::bad_request(error.to_string()),
        }
    }
}

/// Create a book, or add a copy to an existing (title, author) row.
async fn save_book(
    State(catalog): State<CatalogService>,
    Json(payload): Json<CreateBook>,
) -> Result<Json<Book>, AppError> {
    validate_book_fields(&payload.title, &payload.author)?;

    let book = catalog.upsert(NewBook {
        title: payload.title,
        author: payload.author,
        amount: payload.amount,
    });
    Ok(Json(book))
}

async fn get_book(
    State(catalog): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Book>, AppError> {
    catalog
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("book not found"))
}

async fn update_book(
    State(catalog): State<CatalogService>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBook>,
) -> Result<Json<Book>, AppError> {
    validate_book_fields(&payload.title, &payload.author)?;

    catalog
        .replace(id, payload)
        .map(Json)
        .ok_or_else(|| AppError::not_found("book not found"))
}

async fn delete_book(
    State(catalog): State<CatalogService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    catalog.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_book_fields(title: &str, author: &str) -> Result<(), AppError> {
    let details: Vec<_> = [utils::validate_title(title), utils::validate_author(author)]
        .into_iter()
        .flatten()
        .collect();
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, "invalid book fields"))
    }
}

/// Create a new instance of the books module.
pub fn create_module(store: Arc<dyn RecordStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(CatalogService::new(store)))
}
