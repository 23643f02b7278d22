use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{answers, environments};

#[derive(OpenApi)]
#[openapi(
    paths(
        environments::handlers::hello,
        environments::handlers::list_problem_environments,
        environments::handlers::get_problem_environment,
        answers::handlers::get_answer_id,
        answers::handlers::get_answer,
        answers::handlers::list_unconfirmed_local_answers,
    ),
    components(
        schemas(
            storage::dto::problem_environment::ProblemEnvironmentResponse,
            storage::dto::answer::AnswerIdResponse,
            storage::dto::answer::AnswerResponse,
        )
    ),
    tags(
        (name = "environments", description = "Problem environment endpoints"),
        (name = "answers", description = "Answer lookup endpoints"),
    )
)]
pub struct ApiDoc;

pub fn router(db: Database) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(environments::routes::routes())
        .merge(answers::routes::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}
