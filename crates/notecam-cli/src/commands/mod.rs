pub mod capture;
pub mod common;
pub mod completions;
pub mod edit;
pub mod export;
pub mod list;
