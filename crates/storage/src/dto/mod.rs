pub mod answer;
pub mod problem_environment;
