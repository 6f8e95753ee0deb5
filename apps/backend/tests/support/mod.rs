#![allow(dead_code)]

pub mod app_builder;
pub mod server;

pub use app_builder::{create_test_app, test_config};
