use axum::{
    Json,
    extract::{Path, Query, State},
};
use storage::{
    Database,
    dto::answer::{AnswerIdQuery, AnswerIdResponse, AnswerResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/answer-id",
    params(AnswerIdQuery),
    responses(
        (status = 200, description = "ID of the latest answer for the environment's team and problem", body = AnswerIdResponse),
        (status = 400, description = "Missing environment name"),
        (status = 404, description = "Environment not found or no answer submitted yet")
    ),
    tag = "answers"
)]
pub async fn get_answer_id(
    State(db): State<Database>,
    Query(query): Query<AnswerIdQuery>,
) -> Result<Json<AnswerIdResponse>, WebError> {
    query.validate()?;

    let id = services::find_latest_answer_id(db.pool(), &query.name)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Json(AnswerIdResponse { id }))
}

#[utoipa::path(
    get,
    path = "/answers/{answer_id}",
    params(
        ("answer_id" = Uuid, Path, description = "Answer ID")
    ),
    responses(
        (status = 200, description = "Answer found", body = AnswerResponse),
        (status = 400, description = "Malformed answer ID"),
        (status = 404, description = "Answer not found")
    ),
    tag = "answers"
)]
pub async fn get_answer(
    State(db): State<Database>,
    Path(answer_id): Path<String>,
) -> Result<Json<AnswerResponse>, WebError> {
    let answer_id = Uuid::parse_str(&answer_id)
        .map_err(|_| WebError::BadRequest(format!("invalid answer id: {}", answer_id)))?;

    let answer = services::get_answer(db.pool(), answer_id).await?;

    Ok(Json(answer))
}

#[utoipa::path(
    get,
    path = "/local-problems/unconfirmed-answers",
    responses(
        (status = 200, description = "Unconfirmed answers of problems graded on site, newest first per problem", body = Vec<AnswerResponse>)
    ),
    tag = "answers"
)]
pub async fn list_unconfirmed_local_answers(
    State(db): State<Database>,
) -> Result<Json<Vec<AnswerResponse>>, WebError> {
    let answers = services::list_unconfirmed_local_answers(db.pool()).await?;

    Ok(Json(answers))
}
