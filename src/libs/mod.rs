//! Core library modules for the roster application.
//!
//! Infrastructure shared by the command layer and the database core:
//! configuration, application data paths, user-facing messages, input
//! validation and terminal rendering.

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod validate;
pub mod view;
