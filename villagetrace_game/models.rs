pub mod catalog;
pub mod village;
