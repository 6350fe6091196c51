//! HTTP handlers for Users API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestParameterResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
    parse_param,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    CreateUser, CreatedAfterQuery, FirstNameQuery, LastNameQuery, UpdateUser, UserResponse,
    UserStatus,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        delete_user,
        get_by_username,
        get_by_email,
        get_by_status,
        list_active,
        search_first_name,
        search_last_name,
        created_after,
        get_by_email_domain,
    ),
    components(
        schemas(UserResponse, CreateUser, UpdateUser, UserStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestParameterResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/active", get(list_active))
        .route("/created-after", get(created_after))
        .route("/search/firstname", get(search_first_name))
        .route("/search/lastname", get(search_last_name))
        .route("/username/{username}", get(get_by_username))
        .route("/email/{email}", get(get_by_email))
        .route("/email-domain/{domain}", get(get_by_email_domain))
        .route("/status/{status}", get(get_by_status))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Replace a user's fields
///
/// An empty or missing `password` keeps the current one.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
) -> UserResult<impl IntoResponse> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/username/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Exact, case-sensitive username")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_username<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(username): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user_by_username(&username).await?;
    Ok(Json(user))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/email/{email}",
    tag = "Users",
    params(
        ("email" = String, Path, description = "Exact, case-sensitive email")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user_by_email(&email).await?;
    Ok(Json(user))
}

/// List users with a given status
#[utoipa::path(
    get,
    path = "/status/{status}",
    tag = "Users",
    params(
        ("status" = UserStatus, Path, description = "Account status")
    ),
    responses(
        (status = 200, description = "Users with the status", body = Vec<UserResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_status<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let status: UserStatus = parse_param("status", &status)?;
    let users = service.list_users_by_status(status).await?;
    Ok(Json(users))
}

/// List active users
#[utoipa::path(
    get,
    path = "/active",
    tag = "Users",
    responses(
        (status = 200, description = "Users with status ACTIVE", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_active<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_active_users().await?;
    Ok(Json(users))
}

/// Search users by first name
#[utoipa::path(
    get,
    path = "/search/firstname",
    tag = "Users",
    params(FirstNameQuery),
    responses(
        (status = 200, description = "Users whose first name contains the term", body = Vec<UserResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_first_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<FirstNameQuery>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.search_by_first_name(&query.first_name).await?;
    Ok(Json(users))
}

/// Search users by last name
#[utoipa::path(
    get,
    path = "/search/lastname",
    tag = "Users",
    params(LastNameQuery),
    responses(
        (status = 200, description = "Users whose last name contains the term", body = Vec<UserResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_last_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<LastNameQuery>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.search_by_last_name(&query.last_name).await?;
    Ok(Json(users))
}

/// List users created at or after a point in time
#[utoipa::path(
    get,
    path = "/created-after",
    tag = "Users",
    params(CreatedAfterQuery),
    responses(
        (status = 200, description = "Users created at or after `date`", body = Vec<UserResponse>),
        (status = 400, response = BadRequestParameterResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn created_after<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    QueryParams(query): QueryParams<CreatedAfterQuery>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let since = parse_timestamp(&query.date)?;
    let users = service.list_created_after(since).await?;
    Ok(Json(users))
}

/// List users by email domain
#[utoipa::path(
    get,
    path = "/email-domain/{domain}",
    tag = "Users",
    params(
        ("domain" = String, Path, description = "Suffix the email must end with, e.g. `example.com`")
    ),
    responses(
        (status = 200, description = "Users in the domain", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_email_domain<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(domain): Path<String>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_by_email_domain(&domain).await?;
    Ok(Json(users))
}

/// Accepts RFC 3339 or a naive ISO datetime, which is read as UTC.
fn parse_timestamp(raw: &str) -> UserResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            UserError::Validation(format!(
                "Invalid date '{}': expected ISO-8601 like 2024-01-31T00:00:00",
                raw
            ))
        })
}
