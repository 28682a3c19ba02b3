// Library target so the integration tests can reach the module tree.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod lessons;
pub mod reactive;
pub mod state;
pub mod toc;
pub mod ui;
pub mod view;
