pub mod profile;
pub mod program;
