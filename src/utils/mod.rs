//! Utilities module
//!
//! Error handling, text measurement and log helpers shared by the proxy and the client

pub mod error;
pub mod logging;
pub mod text;
