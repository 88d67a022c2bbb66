pub mod locale;
pub mod summary;
