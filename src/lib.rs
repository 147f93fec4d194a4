pub mod cli;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod overlay;
pub mod page;
pub mod report;
pub mod script;
pub mod selection;
pub mod trace;
