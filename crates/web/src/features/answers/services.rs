use storage::{
    dto::answer::AnswerResponse,
    error::{Result, StorageError},
    models::config::LOCAL_PROBLEM_CODES,
};
use uuid::Uuid;

use crate::store::VmdbStore;

/// Find the latest answer submitted for the team and problem behind an
/// environment. `None` when the environment has no team or nothing was
/// submitted yet.
pub async fn find_latest_answer_id(
    store: &dyn VmdbStore,
    environment_name: &str,
) -> Result<Option<Uuid>> {
    let environment = store.find_environment(environment_name).await?;

    let Some(team_id) = environment.team_id else {
        return Ok(None);
    };

    let latest = store
        .find_latest_answer(environment.problem_id, team_id)
        .await?;

    Ok(latest.map(|answer| answer.id))
}

/// Get an answer together with the code of its problem
pub async fn get_answer(store: &dyn VmdbStore, answer_id: Uuid) -> Result<AnswerResponse> {
    let answer = store.find_answer(answer_id).await?;
    let problem = store.find_problem(answer.problem_id).await?;

    Ok(AnswerResponse::new(&answer, &problem))
}

/// List unconfirmed answers of every problem graded on site
pub async fn list_unconfirmed_local_answers(store: &dyn VmdbStore) -> Result<Vec<AnswerResponse>> {
    let codes = match store.find_config(LOCAL_PROBLEM_CODES).await {
        Ok(config) => config.comma_separated_values()?,
        Err(StorageError::NotFound) => {
            tracing::info!("{} is not configured", LOCAL_PROBLEM_CODES);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut response = Vec::new();
    for code in codes {
        let problem = match store.find_problem_by_code(&code).await {
            Ok(problem) => problem,
            Err(StorageError::NotFound) => {
                tracing::warn!(code = %code, "Local problem not found");
                continue;
            }
            Err(e) => return Err(e),
        };

        for answer in store.list_unconfirmed_answers(problem.id).await? {
            response.push(AnswerResponse::new(&answer, &problem));
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, answer, config, environment, problem};

    #[tokio::test]
    async fn test_latest_answer_id_picks_newest_submission() {
        let p1 = problem("ABC");
        let team = Uuid::new_v4();
        let old = answer(&p1, team, "old", 1);
        let new = answer(&p1, team, "new", 9);
        let store = MemoryStore {
            environments: vec![environment("team01-abc", &p1, Some(team))],
            answers: vec![new.clone(), old],
            problems: vec![p1],
            ..Default::default()
        };

        let id = find_latest_answer_id(&store, "team01-abc").await.unwrap();

        assert_eq!(id, Some(new.id));
    }

    #[tokio::test]
    async fn test_latest_answer_id_of_unknown_environment_is_not_found() {
        let store = MemoryStore::default();

        let err = find_latest_answer_id(&store, "missing").await.unwrap_err();

        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_latest_answer_id_without_answers_is_none() {
        let p1 = problem("ABC");
        let team = Uuid::new_v4();
        let store = MemoryStore {
            environments: vec![
                environment("team01-abc", &p1, Some(team)),
                environment("spare-abc", &p1, None),
            ],
            answers: vec![answer(&p1, Uuid::new_v4(), "other team", 1)],
            problems: vec![p1],
            ..Default::default()
        };

        assert_eq!(find_latest_answer_id(&store, "team01-abc").await.unwrap(), None);
        assert_eq!(find_latest_answer_id(&store, "spare-abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_answer_includes_problem_code() {
        let p1 = problem("ABC");
        let submitted = answer(&p1, Uuid::new_v4(), "ping 192.0.2.1", 3);
        let store = MemoryStore {
            answers: vec![submitted.clone()],
            problems: vec![p1],
            ..Default::default()
        };

        let response = get_answer(&store, submitted.id).await.unwrap();

        assert_eq!(response.problem_code, "ABC");
        assert_eq!(response.body, "ping 192.0.2.1");
        assert!(matches!(
            get_answer(&store, Uuid::new_v4()).await.unwrap_err(),
            StorageError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_unconfirmed_answers_without_config_is_empty() {
        let p1 = problem("ABC");
        let store = MemoryStore {
            answers: vec![answer(&p1, Uuid::new_v4(), "body", 1)],
            problems: vec![p1],
            ..Default::default()
        };

        let answers = list_unconfirmed_local_answers(&store).await.unwrap();

        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_unconfirmed_answers_skip_unknown_codes() {
        let local = problem("LOC");
        let remote = problem("REM");
        let team = Uuid::new_v4();
        let older = answer(&local, team, "older", 1);
        let newer = answer(&local, team, "newer", 4);
        let mut confirmed = answer(&local, team, "confirmed", 6);
        confirmed.confirming = true;
        let store = MemoryStore {
            answers: vec![older.clone(), newer.clone(), confirmed, answer(&remote, team, "remote", 2)],
            problems: vec![local, remote],
            configs: vec![config(LOCAL_PROBLEM_CODES, "LOC, GONE")],
            ..Default::default()
        };

        let answers = list_unconfirmed_local_answers(&store).await.unwrap();

        let ids: Vec<Uuid> = answers.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert!(answers.iter().all(|a| a.problem_code == "LOC"));
    }
}
