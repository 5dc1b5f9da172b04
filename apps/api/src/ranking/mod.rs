//! Candidate pool ranking, analytics and persistence.

pub mod analytics;
pub mod handlers;
pub mod ranker;
pub mod report;
pub mod signals;
