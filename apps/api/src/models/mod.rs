pub mod job;
pub mod matching;
pub mod ranking;
pub mod resume;
pub mod skills;
