//! News provider implementations

pub mod gnews;

pub use gnews::GNewsProvider;
