pub mod serde_helpers;

pub use serde_helpers::id_from_value;
