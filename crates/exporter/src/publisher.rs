use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::{Projection, ScoreBoard, ScoreMode};
use crate::error::PublishError;
use crate::sink::{Gauge, GaugeFamily, MetricsSink, Sample};
use crate::snapshot::Snapshot;

/// Writes one cycle's results to the metrics sink.
///
/// Every labeled family is replaced wholesale, so label combinations of
/// entities that disappeared from the store (e.g. after a reset) are dropped.
pub struct Publisher {
    sink: Arc<dyn MetricsSink>,
    mode: ScoreMode,
}

impl Publisher {
    pub fn new(sink: Arc<dyn MetricsSink>, mode: ScoreMode) -> Self {
        Self { sink, mode }
    }

    pub fn mode(&self) -> ScoreMode {
        self.mode
    }

    pub fn publish(&self, snapshot: &Snapshot, board: &ScoreBoard<'_>) -> Result<(), PublishError> {
        let teams_info: Vec<Sample> = snapshot
            .teams
            .iter()
            .map(|team| {
                Sample::new(
                    vec![team.id.to_string(), team.name.clone(), team.organization.clone()],
                    1.0,
                )
            })
            .collect();
        self.sink.replace(GaugeFamily::TeamsInfo, &teams_info)?;

        let problems_info: Vec<Sample> = snapshot
            .problems
            .iter()
            .map(|problem| {
                Sample::new(
                    vec![problem.id.to_string(), problem.code.clone(), problem.title.clone()],
                    1.0,
                )
            })
            .collect();
        self.sink.replace(GaugeFamily::ProblemsInfo, &problems_info)?;

        self.sink.set(Gauge::TeamsTotal, snapshot.teams.len() as f64)?;
        self.sink.set(Gauge::ProblemsTotal, snapshot.problems.len() as f64)?;
        self.sink.set(Gauge::AnswersTotal, snapshot.answers.len() as f64)?;

        match board.project(self.mode) {
            Projection::PerProblem(scores) => {
                let mut score_samples = Vec::with_capacity(scores.len());
                let mut answer_samples = Vec::with_capacity(scores.len());
                for score in &scores {
                    let labels = vec![score.team.id.to_string(), score.problem.id.to_string()];
                    answer_samples.push(Sample::new(labels.clone(), score.submitted as f64));
                    score_samples.push(Sample::new(labels, score.score() as f64));
                }
                self.sink.replace(GaugeFamily::Scores, &score_samples)?;
                self.sink.replace(GaugeFamily::Answers, &answer_samples)?;
            }
            Projection::PerTeam(totals) => {
                let samples: Vec<Sample> = totals
                    .iter()
                    .map(|total| {
                        Sample::new(
                            vec![
                                total.team.id.to_string(),
                                total.team.name.clone(),
                                total.team.organization.clone(),
                            ],
                            total.total as f64,
                        )
                    })
                    .collect();
                self.sink.replace(GaugeFamily::TeamScores, &samples)?;
            }
        }

        Ok(())
    }

    pub fn record_duration(&self, elapsed: Duration) -> Result<(), PublishError> {
        self.sink
            .set(Gauge::CollectDurationSeconds, elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::PrometheusSink;
    use crate::testing::{answer, problem, snapshot, team};

    fn publisher(mode: ScoreMode) -> (Arc<PrometheusSink>, Publisher) {
        let sink = Arc::new(PrometheusSink::new().unwrap());
        let publisher = Publisher::new(sink.clone(), mode);
        (sink, publisher)
    }

    struct RejectingSink;

    impl MetricsSink for RejectingSink {
        fn set(&self, _gauge: Gauge, _value: f64) -> Result<(), PublishError> {
            Ok(())
        }

        fn replace(&self, family: GaugeFamily, _samples: &[Sample]) -> Result<(), PublishError> {
            Err(PublishError::LabelArity {
                gauge: family.name(),
                expected: family.label_names().len(),
                actual: 0,
            })
        }
    }

    #[test]
    fn test_publishes_best_score_per_problem() {
        let a = team("team-a", "org1");
        let p1 = problem("code1", "title1");
        let answers = vec![
            answer(&a, &p1, Some(5), 1),
            answer(&a, &p1, Some(9), 2),
            answer(&a, &p1, None, 3),
        ];
        let snapshot = snapshot(&[a.clone()], &[p1.clone()], &answers);
        let (sink, publisher) = publisher(ScoreMode::PerProblem);

        publisher
            .publish(&snapshot, &ScoreBoard::aggregate(&snapshot))
            .unwrap();

        let text = sink.encode_text().unwrap();
        assert!(text.contains(&format!(
            r#"netcon_scores{{problem_id="{}",team_id="{}"}} 9"#,
            p1.id, a.id
        )));
        assert!(text.contains(&format!(
            r#"netcon_answers{{problem_id="{}",team_id="{}"}} 3"#,
            p1.id, a.id
        )));
        assert!(text.contains(&format!(
            r#"netcon_teams_info{{team_id="{}",team_name="team-a",team_organization="org1"}} 1"#,
            a.id
        )));
        assert!(text.contains(&format!(
            r#"netcon_problems_info{{problem_code="code1",problem_id="{}",problem_title="title1"}} 1"#,
            p1.id
        )));
        assert!(text.contains("netcon_teams_total 1"));
        assert!(text.contains("netcon_problems_total 1"));
        assert!(text.contains("netcon_answers_total 3"));
        assert!(!text.contains("netcon_team_scores{"));
    }

    #[test]
    fn test_publishes_team_totals() {
        let a = team("team-a", "org1");
        let p1 = problem("code1", "title1");
        let p2 = problem("code2", "title2");
        let answers = vec![answer(&a, &p1, Some(40), 1), answer(&a, &p2, Some(2), 2)];
        let snapshot = snapshot(&[a.clone()], &[p1, p2], &answers);
        let (sink, publisher) = publisher(ScoreMode::PerTeam);

        publisher
            .publish(&snapshot, &ScoreBoard::aggregate(&snapshot))
            .unwrap();

        let text = sink.encode_text().unwrap();
        assert!(text.contains(&format!(
            r#"netcon_team_scores{{team_id="{}",team_name="team-a",team_organization="org1"}} 42"#,
            a.id
        )));
        assert!(!text.contains("netcon_scores{"));
    }

    #[test]
    fn test_empty_snapshot_publishes_zero_counts() {
        let snapshot = Snapshot::default();
        let (sink, publisher) = publisher(ScoreMode::PerProblem);

        publisher
            .publish(&snapshot, &ScoreBoard::aggregate(&snapshot))
            .unwrap();

        let text = sink.encode_text().unwrap();
        assert!(text.contains("netcon_teams_total 0"));
        assert!(text.contains("netcon_problems_total 0"));
        assert!(text.contains("netcon_answers_total 0"));
        assert!(!text.contains("team_id="));
    }

    #[test]
    fn test_rejected_write_fails_publish() {
        let snapshot = Snapshot::default();
        let publisher = Publisher::new(Arc::new(RejectingSink), ScoreMode::PerProblem);

        let err = publisher
            .publish(&snapshot, &ScoreBoard::aggregate(&snapshot))
            .unwrap_err();

        assert!(matches!(err, PublishError::LabelArity { gauge: "teams_info", .. }));
    }

    #[test]
    fn test_record_duration() {
        let (sink, publisher) = publisher(ScoreMode::PerProblem);

        publisher
            .record_duration(Duration::from_millis(1500))
            .unwrap();

        assert!(sink
            .encode_text()
            .unwrap()
            .contains("netcon_metrics_collect_duration_seconds 1.5"));
    }
}
