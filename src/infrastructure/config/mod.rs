//! Infrastructure configuration modules.

pub mod api;
pub mod logging;
pub mod paths;
pub mod settings;
pub mod storage;
