pub mod core;
pub mod domain;
pub mod utils;

pub use crate::core::combine::combine;
pub use crate::domain::model::AnnotationSet;
pub use crate::domain::origin::OriginTime;
pub use crate::utils::error::{AnnotError, Result};
