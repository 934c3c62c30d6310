#![forbid(unsafe_code)]

pub mod catalog;
pub mod matching;
pub mod model;
pub mod progress;
pub mod text;

pub use catalog::Catalog;
