//! Persistence for the bill book.

pub mod json_backend;

pub use json_backend::JsonStore;
