use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::error::PublishError;

/// Prefix of every metric name
pub const NAMESPACE: &str = "netcon";

/// Unlabeled gauges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    CollectDurationSeconds,
    TeamsTotal,
    ProblemsTotal,
    AnswersTotal,
}

impl Gauge {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CollectDurationSeconds => "metrics_collect_duration_seconds",
            Self::TeamsTotal => "teams_total",
            Self::ProblemsTotal => "problems_total",
            Self::AnswersTotal => "answers_total",
        }
    }

    fn help(&self) -> &'static str {
        match self {
            Self::CollectDurationSeconds => "Duration of the most recent collection cycle",
            Self::TeamsTotal => "Number of teams, excluding ignored ones",
            Self::ProblemsTotal => "Number of problems",
            Self::AnswersTotal => "Number of answers, graded or not",
        }
    }
}

/// Labeled gauge families, replaced as a whole every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeFamily {
    TeamsInfo,
    ProblemsInfo,
    Scores,
    Answers,
    TeamScores,
}

impl GaugeFamily {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeamsInfo => "teams_info",
            Self::ProblemsInfo => "problems_info",
            Self::Scores => "scores",
            Self::Answers => "answers",
            Self::TeamScores => "team_scores",
        }
    }

    pub fn label_names(&self) -> &'static [&'static str] {
        match self {
            Self::TeamsInfo | Self::TeamScores => &["team_id", "team_name", "team_organization"],
            Self::ProblemsInfo => &["problem_id", "problem_code", "problem_title"],
            Self::Scores | Self::Answers => &["team_id", "problem_id"],
        }
    }

    fn help(&self) -> &'static str {
        match self {
            Self::TeamsInfo => "Team metadata, always 1",
            Self::ProblemsInfo => "Problem metadata, always 1",
            Self::Scores => "Point of the best graded answer per team and problem",
            Self::Answers => "Number of answers submitted per team and problem",
            Self::TeamScores => "Sum of best answer points per team",
        }
    }
}

/// One label combination and its value
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub labels: Vec<String>,
    pub value: f64,
}

impl Sample {
    pub fn new(labels: Vec<String>, value: f64) -> Self {
        Self { labels, value }
    }
}

/// Destination of published metrics
pub trait MetricsSink: Send + Sync {
    fn set(&self, gauge: Gauge, value: f64) -> Result<(), PublishError>;

    /// Drop every label combination of `family` and store `samples` instead.
    ///
    /// Either all samples are stored or the family is left as it was.
    fn replace(&self, family: GaugeFamily, samples: &[Sample]) -> Result<(), PublishError>;
}

/// A [`MetricsSink`] backed by its own prometheus registry
pub struct PrometheusSink {
    registry: Registry,
    collect_duration_seconds: prometheus::Gauge,
    teams_total: prometheus::Gauge,
    problems_total: prometheus::Gauge,
    answers_total: prometheus::Gauge,
    teams_info: GaugeVec,
    problems_info: GaugeVec,
    scores: GaugeVec,
    answers: GaugeVec,
    team_scores: GaugeVec,
}

impl PrometheusSink {
    pub fn new() -> Result<Self, PublishError> {
        let registry = Registry::new();

        Ok(Self {
            collect_duration_seconds: register_gauge(&registry, Gauge::CollectDurationSeconds)?,
            teams_total: register_gauge(&registry, Gauge::TeamsTotal)?,
            problems_total: register_gauge(&registry, Gauge::ProblemsTotal)?,
            answers_total: register_gauge(&registry, Gauge::AnswersTotal)?,
            teams_info: register_family(&registry, GaugeFamily::TeamsInfo)?,
            problems_info: register_family(&registry, GaugeFamily::ProblemsInfo)?,
            scores: register_family(&registry, GaugeFamily::Scores)?,
            answers: register_family(&registry, GaugeFamily::Answers)?,
            team_scores: register_family(&registry, GaugeFamily::TeamScores)?,
            registry,
        })
    }

    /// Render every registered metric in the text exposition format.
    pub fn encode_text(&self) -> Result<String, PublishError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn gauge(&self, gauge: Gauge) -> &prometheus::Gauge {
        match gauge {
            Gauge::CollectDurationSeconds => &self.collect_duration_seconds,
            Gauge::TeamsTotal => &self.teams_total,
            Gauge::ProblemsTotal => &self.problems_total,
            Gauge::AnswersTotal => &self.answers_total,
        }
    }

    fn family(&self, family: GaugeFamily) -> &GaugeVec {
        match family {
            GaugeFamily::TeamsInfo => &self.teams_info,
            GaugeFamily::ProblemsInfo => &self.problems_info,
            GaugeFamily::Scores => &self.scores,
            GaugeFamily::Answers => &self.answers,
            GaugeFamily::TeamScores => &self.team_scores,
        }
    }
}

fn register_gauge(registry: &Registry, gauge: Gauge) -> Result<prometheus::Gauge, PublishError> {
    let collector =
        prometheus::Gauge::with_opts(Opts::new(gauge.name(), gauge.help()).namespace(NAMESPACE))?;
    registry.register(Box::new(collector.clone()))?;
    Ok(collector)
}

fn register_family(registry: &Registry, family: GaugeFamily) -> Result<GaugeVec, PublishError> {
    let collector = GaugeVec::new(
        Opts::new(family.name(), family.help()).namespace(NAMESPACE),
        family.label_names(),
    )?;
    registry.register(Box::new(collector.clone()))?;
    Ok(collector)
}

impl MetricsSink for PrometheusSink {
    fn set(&self, gauge: Gauge, value: f64) -> Result<(), PublishError> {
        self.gauge(gauge).set(value);
        Ok(())
    }

    fn replace(&self, family: GaugeFamily, samples: &[Sample]) -> Result<(), PublishError> {
        let expected = family.label_names().len();
        if let Some(sample) = samples.iter().find(|s| s.labels.len() != expected) {
            return Err(PublishError::LabelArity {
                gauge: family.name(),
                expected,
                actual: sample.labels.len(),
            });
        }

        let collector = self.family(family);
        collector.reset();
        for sample in samples {
            let values: Vec<&str> = sample.labels.iter().map(String::as_str).collect();
            collector
                .get_metric_with_label_values(&values)?
                .set(sample.value);
        }

        Ok(())
    }
}
