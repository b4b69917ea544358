//! Command runners and terminal presentation

pub mod import;
pub mod sample;
pub mod setup;
pub mod ui;
pub mod validate;
