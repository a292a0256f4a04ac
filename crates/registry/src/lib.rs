pub mod error;
pub mod logging;
pub mod manifest;
pub mod registry;
pub mod scan;

// Descriptor schema types are owned by prost-types
pub use prost_types::{FileDescriptorProto, FileDescriptorSet};

pub use error::{Error, Result};
pub use registry::{DescriptorRegistry, RegistryConfig, load_file_descriptors};
