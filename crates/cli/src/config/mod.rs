pub mod templates;

pub use templates::{CONFIG_FILE, create_default_config, create_sample_fixture};
