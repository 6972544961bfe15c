// End-to-end pipeline: fetch, extract, match, compose.

pub mod handlers;
pub mod pipeline;
