pub mod answer;
pub mod config;
pub mod problem;
pub mod problem_environment;
pub mod team;

pub use answer::{Answer, ScoredAnswer};
pub use config::Config;
pub use problem::Problem;
pub use problem_environment::ProblemEnvironment;
pub use team::Team;
