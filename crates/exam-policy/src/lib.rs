pub mod error;
pub mod loader;
pub mod registry;

pub use error::PolicyError;
pub use loader::load_policies_csv;
pub use registry::PolicyRegistry;
