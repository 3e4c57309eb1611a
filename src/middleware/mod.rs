//! Middleware module
//!
//! Cross-cutting request handling applied to every route

pub mod logging;
