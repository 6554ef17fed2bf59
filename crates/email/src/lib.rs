pub mod abstract_trait;
pub mod app;
pub mod config;
pub mod domain;
pub mod handler;
pub mod middleware;
pub mod service;
pub mod state;
pub mod template;
