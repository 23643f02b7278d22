use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_answer, get_answer_id, list_unconfirmed_local_answers};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/answer-id", get(get_answer_id))
        .route("/answers/:answer_id", get(get_answer))
        .route(
            "/local-problems/unconfirmed-answers",
            get(list_unconfirmed_local_answers),
        )
}
