pub mod dashboard;
pub mod info;
pub mod not_found;
