//! Résumé to job match scoring.

pub mod fallback;
pub mod handlers;
pub mod scorer;
pub mod skill_match;
