//! Property-based tests for the review engine and response parsing

mod response_parsing;
mod review_navigation;
