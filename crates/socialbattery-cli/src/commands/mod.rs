pub mod config;
pub mod output;
pub mod report;
pub mod session;
pub mod taxonomy;
