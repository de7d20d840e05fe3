pub mod ingest;
pub mod templates;
pub mod types;
pub mod validation;

pub use ingest::{load_tech_pack, parse_document};
pub use templates::{list_templates, template_tech_pack};
pub use types::*;
pub use validation::{tech_pack_problems, validate_tech_pack};
