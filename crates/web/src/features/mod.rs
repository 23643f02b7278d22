pub mod answers;
pub mod environments;
