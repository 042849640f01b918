//! Shared validation constants used across request validators and
//! specification paging.

/// Smallest accepted 1-based page number.
pub const MIN_PAGE: usize = 1;
/// Largest page size a specification built from external input will take.
pub const MAX_PAGE_SIZE: usize = 100;

/// Ceiling for free-text search input.
pub const MAX_SEARCH_TEXT_LENGTH: usize = 200;
/// Ceiling for study code fields.
pub const MAX_STUDY_CODE_LENGTH: usize = 50;
/// Ceiling for title fields.
pub const MAX_TITLE_LENGTH: usize = 500;
/// Ceiling for investigator name fields.
pub const MAX_INVESTIGATOR_LENGTH: usize = 200;
/// Ceiling for institution name fields.
pub const MAX_INSTITUTION_LENGTH: usize = 300;
/// Ceiling for long-form description fields.
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
/// Ceiling for research area fields.
pub const MAX_RESEARCH_AREA_LENGTH: usize = 200;
