pub mod fuzzy;
pub mod cache;
pub mod results;
