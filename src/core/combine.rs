use crate::domain::model::AnnotationSet;
use crate::domain::origin::OriginTime;
use crate::utils::error::{AnnotError, Result};
use tracing::{debug, warn};

/// Merges the annotations of two recordings being concatenated.
///
/// `prior_sample_counts` holds one sample count per concatenated segment in
/// concatenation order, the last entry being the segment `b` belongs to.
/// When `b` has no origin time its onsets are shifted forward by the total
/// duration of the preceding segments, `sum(counts[..len-1]) / sfreq`. When
/// `b` does carry an origin time its onsets are taken as absolute timestamps
/// and pass through unshifted.
///
/// Known limitation: if one set is relative and the other absolute (or both
/// absolute but from different acquisitions), the two frames of reference
/// are not reconciled; the merge proceeds and a warning is logged. Callers
/// that need a common reference must align the sets beforehand.
///
/// The merged set keeps `a`'s origin time and is re-sorted and re-validated
/// through ordinary construction.
pub fn combine(
    a: Option<&AnnotationSet>,
    b: Option<&AnnotationSet>,
    prior_sample_counts: &[u64],
    sfreq: f64,
) -> Result<Option<AnnotationSet>> {
    let (a, b) = match (a, b) {
        (None, None) => return Ok(None),
        (Some(a), None) => return Ok(Some(a.clone())),
        (None, Some(b)) => return Ok(Some(b.clone())),
        (Some(a), Some(b)) => (a, b),
    };

    if a.orig_time().is_some() != b.orig_time().is_some() {
        warn!(
            "merging annotation sets with mixed frames of reference \
             (one relative, one absolute); onsets are not reconciled"
        );
    }

    let b_onset: Vec<f64> = if b.orig_time().is_none() {
        if sfreq <= 0.0 {
            return Err(AnnotError::Validation {
                message: format!("sampling frequency must be positive, got {}", sfreq),
            });
        }
        // the last count belongs to the block being appended, not a predecessor
        let shift = match prior_sample_counts.split_last() {
            Some((_, preceding)) => {
                preceding.iter().map(|&n| n as f64).sum::<f64>() / sfreq
            }
            None => 0.0,
        };
        debug!(shift_secs = shift, "shifting appended annotations");
        b.onset().iter().map(|&t| t + shift).collect()
    } else {
        b.onset().to_vec()
    };

    let onset: Vec<f64> = a.onset().iter().copied().chain(b_onset).collect();
    let duration: Vec<f64> = a
        .duration()
        .iter()
        .chain(b.duration().iter())
        .copied()
        .collect();
    let description: Vec<String> = a
        .description()
        .iter()
        .chain(b.description().iter())
        .cloned()
        .collect();

    AnnotationSet::from_parts(onset, duration, description, OriginTime::from(a.orig_time()))
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(onset: Vec<f64>, duration: Vec<f64>, names: &[&str]) -> AnnotationSet {
        AnnotationSet::from_parts(
            onset,
            duration,
            names.iter().map(|s| s.to_string()).collect(),
            OriginTime::Unset,
        )
        .unwrap()
    }

    #[test]
    fn test_both_absent() {
        assert_eq!(combine(None, None, &[1000], 500.0).unwrap(), None);
    }

    #[test]
    fn test_one_absent_returns_other_unchanged() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        assert_eq!(combine(Some(&a), None, &[1000], 500.0).unwrap(), Some(a.clone()));
        assert_eq!(combine(None, Some(&a), &[1000], 500.0).unwrap(), Some(a));
    }

    #[test]
    fn test_relative_merge_shifts_by_preceding_segments() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        let b = set(vec![0.2], vec![0.1], &["y"]);

        let merged = combine(Some(&a), Some(&b), &[1000, 500], 500.0)
            .unwrap()
            .unwrap();

        assert_eq!(merged.onset().to_vec(), vec![1.0, 2.2]);
        assert_eq!(merged.duration().to_vec(), vec![0.5, 0.1]);
        assert_eq!(merged.description(), &["x".to_string(), "y".to_string()]);
        assert_eq!(merged.orig_time(), None);
    }

    #[test]
    fn test_single_segment_means_no_shift() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        let b = set(vec![0.2], vec![0.1], &["y"]);

        let merged = combine(Some(&a), Some(&b), &[1000], 500.0).unwrap().unwrap();
        assert_eq!(merged.onset().to_vec(), vec![0.2, 1.0]);
        assert_eq!(merged.description(), &["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn test_absolute_onsets_pass_through_unshifted() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        let b = AnnotationSet::from_parts(
            vec![0.2],
            vec![0.1],
            vec!["y".to_string()],
            OriginTime::Posix(100.0),
        )
        .unwrap();

        let merged = combine(Some(&a), Some(&b), &[1000, 500], 500.0)
            .unwrap()
            .unwrap();
        assert_eq!(merged.onset().to_vec(), vec![0.2, 1.0]);
    }

    #[test]
    fn test_merged_set_keeps_first_origin() {
        let a = AnnotationSet::from_parts(
            vec![1.0],
            vec![0.5],
            vec!["x".to_string()],
            OriginTime::Posix(50.0),
        )
        .unwrap();
        let b = AnnotationSet::from_parts(
            vec![60.0],
            vec![0.1],
            vec!["y".to_string()],
            OriginTime::Posix(100.0),
        )
        .unwrap();

        let merged = combine(Some(&a), Some(&b), &[1000, 500], 500.0)
            .unwrap()
            .unwrap();
        assert_eq!(merged.orig_time(), Some(50.0));
    }

    #[test]
    fn test_zero_sampling_frequency_is_rejected() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        let b = set(vec![0.2], vec![0.1], &["y"]);
        assert!(combine(Some(&a), Some(&b), &[1000, 500], 0.0).is_err());
    }

    #[test]
    fn test_empty_prior_counts_shift_is_zero() {
        let a = set(vec![1.0], vec![0.5], &["x"]);
        let b = set(vec![0.2], vec![0.1], &["y"]);
        let merged = combine(Some(&a), Some(&b), &[], 500.0).unwrap().unwrap();
        assert_eq!(merged.onset().to_vec(), vec![0.2, 1.0]);
    }
}
