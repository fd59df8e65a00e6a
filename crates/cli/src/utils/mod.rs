pub mod fixture;
pub mod parser;

pub use fixture::{DEFAULT_FIXTURE, Fixture, Site, build_site};
pub use parser::parse_subject_ref;
