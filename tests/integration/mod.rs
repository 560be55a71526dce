//! Integration tests for flashgen

mod config_layers;
mod create_and_review;
mod generation_pipeline;
mod model_providers;
mod review_session;
mod test_utils;
