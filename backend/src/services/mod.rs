//! Business logic services

pub mod diary;
pub mod profile;
pub mod summary;

pub use diary::DiaryService;
pub use profile::ProfileService;
pub use summary::SummaryService;
