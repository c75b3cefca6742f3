pub mod app_state;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod generation;
pub mod handlers;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod queue;
pub mod repositories;
pub mod services;
pub mod write_back;

#[cfg(test)]
pub mod test_utils;
