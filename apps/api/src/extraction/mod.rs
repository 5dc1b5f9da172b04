//! Résumé extraction: document text, normalization and entity extraction.

pub mod analyzer;
pub mod contact;
pub mod handlers;
pub mod lexicon;
pub mod name;
pub mod normalize;
pub mod resume;
pub mod sections;
pub mod skills;
pub mod text;
pub mod vocabulary;
