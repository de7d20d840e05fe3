pub mod library;
pub mod types;

pub use library::{fabric_library, find_fabric, find_in, load_library};
pub use types::Fabric;
