pub mod formatter;

pub use crate::domain::model::{Amount, FormatOptions};
pub use crate::domain::ports::FormatConfigProvider;
pub use crate::utils::error::Result;
