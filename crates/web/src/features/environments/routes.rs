use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_problem_environment, hello, list_problem_environments};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(hello))
        .route("/problem-environments", get(list_problem_environments))
        .route("/problem-environments/:name", get(get_problem_environment))
}
