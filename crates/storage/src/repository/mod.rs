pub mod answer;
pub mod config;
pub mod problem;
pub mod problem_environment;
pub mod team;
