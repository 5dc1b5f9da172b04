//! Job-description requirement extraction.

pub mod handlers;
pub mod jd_parser;
pub mod priority;
