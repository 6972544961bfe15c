// Job-posting extraction: normalization, the rule table, job and profile parsing.
// Everything but `sources` is pure; `sources` drives `crate::fetch` and the job cache.

pub mod extractor;
pub mod handlers;
pub mod normalizer;
pub mod profile;
pub mod rules;
pub mod sources;
