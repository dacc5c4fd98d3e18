//! Organization lifecycle endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use orghub_registry::{RegisterOrganization, RenameOrganization};
use surrealdb::Connection;
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::CurrentAdmin;
use crate::models::{
    CreateOrganizationRequest, DeleteOrganizationQuery, DeleteResponse, GetOrganizationQuery,
    OrganizationResponse, UpdateOrganizationQuery, UpdateOrganizationRequest,
};
use crate::state::AppState;

/// POST /org/create
pub async fn create_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Json(request): Json<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationResponse>), ApiError> {
    request.validate()?;

    let view = state
        .registry
        .create(RegisterOrganization {
            name: request.organization_name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(view.into())))
}

/// GET /org/get?organization_name=
pub async fn get_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<GetOrganizationQuery>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let view = state.registry.get_by_name(&query.organization_name).await?;
    Ok(Json(view.into()))
}

/// PUT /org/update?old_org_name=
pub async fn update_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<UpdateOrganizationQuery>,
    admin: CurrentAdmin,
    Json(request): Json<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    request.validate()?;

    let view = state
        .registry
        .rename(
            &query.old_org_name,
            RenameOrganization {
                name: request.organization_name,
                email: request.email,
                password: request.password,
            },
            admin.admin_id,
        )
        .await?;

    Ok(Json(view.into()))
}

/// DELETE /org/delete?organization_name=
pub async fn delete_organization<C: Connection>(
    State(state): State<AppState<C>>,
    Query(query): Query<DeleteOrganizationQuery>,
    admin: CurrentAdmin,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state
        .registry
        .delete(&query.organization_name, admin.admin_id)
        .await?;

    if !deleted {
        return Err(ApiError::OperationFailed("Delete failed".into()));
    }

    Ok(Json(DeleteResponse { success: true }))
}
