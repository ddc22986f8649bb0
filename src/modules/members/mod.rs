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
use biblio_store::model::{Member, NewMember};
use biblio_store::RecordStore;

use crate::utils;
use models::{CreateMember, UpdateMember};
use service::{MemberError, MemberRegistry};

/// Members module: owns `Member` rows.
pub struct MembersModule {
    members: MemberRegistry,
}

impl MembersModule {
    pub fn new(members: MemberRegistry) -> Self {
        Self { members }
    }
}

#[async_trait]
impl Module for MembersModule {
    fn name(&self) -> &'static str {
        "members"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "members module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(create_member))
            .route(
                "/{id}",
                get(get_member).put(update_member).delete(delete_member),
            )
            .with_state(self.members.clone())
    }
}

impl From<MemberError> for AppError {
    fn from(error: MemberError) -> Self {
        match error {
            MemberError::NotFound => AppError::not_found(error.to_string()),
            MemberError::HasActiveLoans => AppError::bad_request(error.to_string()),
        }
    }
}

async fn create_member(
    State(members): State<MemberRegistry>,
    Json(payload): Json<CreateMember>,
) -> Result<Json<Member>, AppError> {
    validate_member_fields(&payload.member_name)?;

    let member = members.create(NewMember {
        member_name: payload.member_name,
        membership_date: payload.membership_date,
    });
    Ok(Json(member))
}

async fn get_member(
    State(members): State<MemberRegistry>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, AppError> {
    members
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("member not found"))
}

/// Partial update: omitted fields keep their stored value.
async fn update_member(
    State(members): State<MemberRegistry>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMember>,
) -> Result<Json<Member>, AppError> {
    if let Some(name) = &payload.member_name {
        validate_member_fields(name)?;
    }

    members
        .update(id, payload)
        .map(Json)
        .ok_or_else(|| AppError::not_found("member not found"))
}

async fn delete_member(
    State(members): State<MemberRegistry>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    members.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn validate_member_fields(member_name: &str) -> Result<(), AppError> {
    match utils::validate_member_name(member_name) {
        Some(detail) => Err(AppError::validation(
            vec![detail],
            "invalid member fields",
        )),
        None => Ok(()),
    }
}

/// Create a new instance of the members module.
pub fn create_module(store: Arc<dyn RecordStore>) -> Arc<dyn Module> {
    Arc::new(MembersModule::new(MemberRegistry::new(store)))
}
