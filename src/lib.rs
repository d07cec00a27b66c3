//! Client for a language-model backend that generates UML diagrams from
//! scenario descriptions and validates requirements against INCOSE rules.

pub mod client;
pub mod common;
pub mod utils;
