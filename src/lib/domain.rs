//! Message model, HTML rendering and composition

pub mod communication;
