use crate::utils::error::{AnnotError, Result};
use ndarray::{Array1, ArrayD, Ix1};

pub fn require_one_dimensional(field_name: &str, array: ArrayD<f64>) -> Result<Array1<f64>> {
    let ndim = array.ndim();
    array
        .into_dimensionality::<Ix1>()
        .map_err(|_| AnnotError::Validation {
            message: format!(
                "{} must be a one dimensional array, got {} dimensions",
                field_name, ndim
            ),
        })
}

pub fn require_equal_lengths(
    onset_len: usize,
    duration_len: usize,
    description_len: usize,
) -> Result<()> {
    if onset_len != duration_len || duration_len != description_len {
        return Err(AnnotError::Validation {
            message: format!(
                "onset, duration and description must be equal in length, got {}, {} and {}",
                onset_len, duration_len, description_len
            ),
        });
    }
    Ok(())
}
