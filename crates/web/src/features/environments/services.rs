use storage::{
    dto::problem_environment::ProblemEnvironmentResponse, error::Result,
    models::ProblemEnvironment,
};

use crate::store::VmdbStore;

/// List every problem environment with the body of its team's latest answer
pub async fn list_problem_environments(
    store: &dyn VmdbStore,
) -> Result<Vec<ProblemEnvironmentResponse>> {
    let environments = store.list_environments().await?;

    let mut response = Vec::with_capacity(environments.len());
    for environment in environments {
        response.push(with_latest_answer(store, environment).await?);
    }

    Ok(response)
}

/// Get one problem environment by name
pub async fn get_problem_environment(
    store: &dyn VmdbStore,
    name: &str,
) -> Result<ProblemEnvironmentResponse> {
    let environment = store.find_environment(name).await?;

    with_latest_answer(store, environment).await
}

async fn with_latest_answer(
    store: &dyn VmdbStore,
    environment: ProblemEnvironment,
) -> Result<ProblemEnvironmentResponse> {
    let latest_answer = match environment.team_id {
        Some(team_id) => {
            store
                .find_latest_answer(environment.problem_id, team_id)
                .await?
        }
        None => None,
    };

    Ok(ProblemEnvironmentResponse::new(
        environment,
        latest_answer.as_ref(),
    ))
}
