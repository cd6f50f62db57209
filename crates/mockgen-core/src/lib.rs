pub mod contract;
pub mod error;
pub mod namespace;
pub mod provider;
pub mod types;

// Re-export commonly used types
pub use contract::{ContractDef, ContractMethod, Param, Receiver};
pub use error::CoreError;
pub use namespace::Namespace;
pub use provider::{Declaration, DescriptionFile, TypeProvider, DESCRIPTION_FILE_NAME};
pub use types::{BasicKind, NamedType, TypeDesc};
