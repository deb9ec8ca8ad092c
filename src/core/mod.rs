pub mod combine;

pub use crate::domain::model::AnnotationSet;
pub use crate::domain::origin::OriginTime;
pub use crate::utils::error::Result;
