pub mod config;
pub mod ext;

// Re-export commonly used items for convenience
pub use config::Config;
pub use ext::is_eligible;
