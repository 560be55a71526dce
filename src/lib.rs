//! flashgen: AI-generated study flashcards
//!
//! Turns a topic into a validated set of front/back flashcards with a single
//! call to a text-generation provider, stores sets locally, and drives a
//! card-by-card review session.

pub mod access;
pub mod buffer;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod identity;
pub mod logging;
pub mod provider;
pub mod review;
pub mod store;
pub mod types;
pub mod workflow;
