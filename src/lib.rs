// ABOUTME: Library crate for the setup wizard exposing public API for testing and external use

#![allow(missing_docs)]

pub mod app;
pub mod components;
pub mod config;
pub mod credentials;
pub mod wizard;
