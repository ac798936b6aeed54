//! Backend flow descriptions: stages, edges, flow metadata and version history.

pub mod conversion;
pub mod definition;
pub mod metadata;
pub mod version;

pub use conversion::*;
pub use definition::*;
pub use metadata::*;
pub use version::*;
