//! Core library components.
//!
//! This module contains the fetch pipeline, the secret handlers and the
//! capabilities they drive (blob store, ssh-agent, env sink).

pub mod agent;
pub mod category;
pub mod config;
pub mod constants;
pub mod credential;
pub mod fetch;
pub mod handlers;
pub mod run;
pub mod sink;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
