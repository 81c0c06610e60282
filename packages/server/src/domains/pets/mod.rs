pub mod actions;
pub mod events;
pub mod machines;
pub mod models;
