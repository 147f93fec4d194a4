pub mod geometry;
pub mod listeners;
pub mod markup;
pub mod page_model;
pub mod paths;
