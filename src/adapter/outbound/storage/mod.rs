//! Durable credential storage adapters.

pub mod file;

pub use file::FileCredentialStorage;
