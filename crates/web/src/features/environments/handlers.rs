use axum::{
    Json,
    extract::{Path, State},
};
use storage::{Database, dto::problem_environment::ProblemEnvironmentResponse};

use crate::error::WebError;

use super::services;

pub const GREETING: &str = "This is API for VM Management Service by NETCON Score Server";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service greeting", body = String)
    ),
    tag = "environments"
)]
pub async fn hello() -> &'static str {
    GREETING
}

#[utoipa::path(
    get,
    path = "/problem-environments",
    responses(
        (status = 200, description = "List all problem environments with the latest answer of their team", body = Vec<ProblemEnvironmentResponse>)
    ),
    tag = "environments"
)]
pub async fn list_problem_environments(
    State(db): State<Database>,
) -> Result<Json<Vec<ProblemEnvironmentResponse>>, WebError> {
    let environments = services::list_problem_environments(db.pool()).await?;

    Ok(Json(environments))
}

#[utoipa::path(
    get,
    path = "/problem-environments/{name}",
    params(
        ("name" = String, Path, description = "Problem environment name")
    ),
    responses(
        (status = 200, description = "Problem environment found", body = ProblemEnvironmentResponse),
        (status = 404, description = "Problem environment not found")
    ),
    tag = "environments"
)]
pub async fn get_problem_environment(
    State(db): State<Database>,
    Path(name): Path<String>,
) -> Result<Json<ProblemEnvironmentResponse>, WebError> {
    let environment = services::get_problem_environment(db.pool(), &name).await?;

    Ok(Json(environment))
}
