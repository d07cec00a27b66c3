pub mod backend;
pub mod catalog;
pub mod renderer;
pub mod workflow;
