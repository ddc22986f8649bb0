pub mod models;
pub mod reports;
pub mod service;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use biblio_http::error::AppError;
use biblio_kernel::{InitCtx, Module, Settings};
use biblio_store::model::{Book, BorrowedBook};
use biblio_store::RecordStore;

use models::MemberNameQuery;
use reports::LoanReports;
use service::{LendingEngine, LendingError};

/// Loans module: the lending engine plus its read-side reports.
pub struct LoansModule {
    state: LoansState,
}

#[derive(Clone)]
struct LoansState {
    engine: LendingEngine,
    reports: LoanReports,
}

impl LoansModule {
    pub fn new(engine: LendingEngine, reports: LoanReports) -> Self {
        Self {
            state: LoansState { engine, reports },
        }
    }
}

#[async_trait]
impl Module for LoansModule {
    fn name(&self) -> &'static str {
        "loans"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            borrow_limit = ctx.settings.lending.borrow_limit,
            "loans module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/{member_id}/{book_id}",
                post(borrow_book).delete(return_book),
            )
            .route("/reports/by-member-name", get(borrowed_by_member_name))
            .route("/reports/distinct-titles", get(distinct_titles))
            .route("/reports/title-counts", get(title_counts))
            .with_state(self.state.clone())
    }
}

impl From<LendingError> for AppError {
    fn from(error: LendingError) -> Self {
        match error {
            LendingError::MemberNotFound
            | LendingError::BookNotFound
            | LendingError::LoanNotFound => AppError::not_found(error.to_string()),
            LendingError::AlreadyBorrowed
            | LendingError::LimitExceeded
            | LendingError::NoCopiesAvailable => AppError::bad_request(error.to_string()),
        }
    }
}

async fn borrow_book(
    State(state): State<LoansState>,
    Path((member_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BorrowedBook>, AppError> {
    let loan = state.engine.borrow(member_id, book_id)?;
    Ok(Json(loan))
}

async fn return_book(
    State(state): State<LoansState>,
    Path((member_id, book_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state.engine.return_book(member_id, book_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn borrowed_by_member_name(
    State(state): State<LoansState>,
    Query(query): Query<MemberNameQuery>,
) -> Json<Vec<Book>> {
    Json(state.reports.borrowed_by_member_name(&query.name))
}

async fn distinct_titles(State(state): State<LoansState>) -> Json<BTreeSet<String>> {
    Json(state.reports.distinct_borrowed_titles())
}

async fn title_counts(State(state): State<LoansState>) -> Json<BTreeMap<String, u64>> {
    Json(state.reports.borrowed_title_counts())
}

/// Create a new instance of the loans module.
pub fn create_module(store: Arc<dyn RecordStore>, settings: &Settings) -> Arc<dyn Module> {
    Arc::new(LoansModule::new(
        LendingEngine::new(store.clone(), settings.lending.borrow_limit),
        LoanReports::new(store),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use biblio_store::model::{NewBook, NewMember};
    use biblio_store::MemoryStore;
    use tower::ServiceExt;

    fn seeded() -> (Router, Uuid, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let (book, member) = {
            let mut tx = store.write();
            let book = tx.insert_book(NewBook {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                amount: 1,
            });
            let member = tx.insert_member(NewMember {
                member_name: "John Doe".to_string(),
                membership_date: None,
            });
            (book, member)
        };

        let module = LoansModule::new(
            LendingEngine::new(store.clone(), 10),
            LoanReports::new(store),
        );
        (module.routes(), member.id, book.id)
    }

    fn post(uri: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn borrow_and_return_roundtrip_over_http() {
        let (router, member_id, book_id) = seeded();

        let response = router
            .clone()
            .oneshot(post(format!("/{member_id}/{book_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/{member_id}/{book_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn exhausted_stock_maps_to_bad_request() {
        let (router, member_id, book_id) = seeded();

        let first = router
            .clone()
            .oneshot(post(format!("/{member_id}/{book_id}")))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        // Same pair again: refused as already borrowed, still a 400.
        let again = router
            .clone()
            .oneshot(post(format!("/{member_id}/{book_id}")))
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_member_maps_to_not_found() {
        let (router, _member_id, book_id) = seeded();

        let response = router
            .oneshot(post(format!("/{}/{book_id}", Uuid::now_v7())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reports_respond_ok() {
        let (router, member_id, book_id) = seeded();

        router
            .clone()
            .oneshot(post(format!("/{member_id}/{book_id}")))
            .await
            .unwrap();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/reports/by-member-name?name=John%20Doe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/reports/title-counts")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
