//! Domain entities.

mod lenient;
pub mod received;
pub mod template;
pub mod usage;

pub use received::*;
pub use template::*;
pub use usage::*;
