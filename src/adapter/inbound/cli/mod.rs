//! CLI module graph.

pub mod banner;
pub mod check;
pub mod command;
pub mod config;
pub mod output;
pub mod paths;
pub mod run;
