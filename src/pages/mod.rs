pub mod engine;
pub mod form;
pub mod page;
