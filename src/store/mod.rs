pub mod error;
pub mod properties;

// Re-export the store types
pub use error::PropertyError;
pub use properties::{Namespace, PropertyStore, DEFAULT_NAMESPACE};
