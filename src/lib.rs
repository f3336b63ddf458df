pub mod browser;
pub mod config;
pub mod output;
pub mod report;
pub mod respondent;
pub mod scoring;
pub mod stderr_buffer;
pub mod submit;
pub mod tui;
