use crate::domain::origin::OriginTime;
use crate::utils::error::Result;
use crate::utils::validation::{require_equal_lengths, require_one_dimensional};
use ndarray::{Array1, ArrayD, Axis};
use serde::{Deserialize, Serialize};

/// Annotations for segments of a continuous recording.
///
/// Holds three parallel sequences of equal length: onset and duration in
/// seconds, plus a text description per entry. Entries are kept sorted by
/// onset. Instances are never mutated after construction; transformations
/// such as [`combine`](crate::combine) produce new sets.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet {
    onset: Array1<f64>,
    duration: Array1<f64>,
    description: Vec<String>,
    orig_time: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnnotationDocument {
    onset: Vec<f64>,
    duration: Vec<f64>,
    description: Vec<String>,
    orig_time: Option<f64>,
}

impl AnnotationSet {
    /// Builds a set from dynamic-dimensional onset/duration arrays.
    ///
    /// Fails with a validation error when either array is not one
    /// dimensional or when the three sequence lengths differ.
    pub fn new(
        onset: ArrayD<f64>,
        duration: ArrayD<f64>,
        description: Vec<String>,
        origin_time: OriginTime,
    ) -> Result<Self> {
        let onset = require_one_dimensional("onset", onset)?;
        let duration = require_one_dimensional("duration", duration)?;
        Self::build(onset, duration, description, origin_time.resolve())
    }

    /// Builds a set from plain vectors. Only the length invariant applies;
    /// vectors are one dimensional by construction.
    pub fn from_parts(
        onset: Vec<f64>,
        duration: Vec<f64>,
        description: Vec<String>,
        origin_time: OriginTime,
    ) -> Result<Self> {
        Self::build(
            Array1::from(onset),
            Array1::from(duration),
            description,
            origin_time.resolve(),
        )
    }

    fn build(
        onset: Array1<f64>,
        duration: Array1<f64>,
        description: Vec<String>,
        orig_time: Option<f64>,
    ) -> Result<Self> {
        require_equal_lengths(onset.len(), duration.len(), description.len())?;

        // stable sort by start time; entries with equal onset keep input order
        let mut order: Vec<usize> = (0..onset.len()).collect();
        order.sort_by(|&i, &j| onset[i].total_cmp(&onset[j]));

        let onset = onset.select(Axis(0), &order);
        let duration = duration.select(Axis(0), &order);
        let description: Vec<String> = order.iter().map(|&i| description[i].clone()).collect();

        Ok(Self {
            onset,
            duration,
            description,
            orig_time,
        })
    }

    /// Onsets in seconds, sorted ascending.
    pub fn onset(&self) -> &Array1<f64> {
        &self.onset
    }

    /// Durations in seconds, parallel to [`onset`](Self::onset).
    pub fn duration(&self) -> &Array1<f64> {
        &self.duration
    }

    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Normalized POSIX timestamp of the acquisition start, or `None` when
    /// onsets are relative to the start of the recording.
    pub fn orig_time(&self) -> Option<f64> {
        self.orig_time
    }

    pub fn len(&self) -> usize {
        self.onset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.onset.is_empty()
    }

    /// One-way JSON encoding for the external persistence writer: `onset`
    /// and `duration` as number lists, `description` as a string list,
    /// `orig_time` as a number or null.
    pub fn serialize(&self) -> Result<String> {
        let doc = AnnotationDocument {
            onset: self.onset.to_vec(),
            duration: self.duration.to_vec(),
            description: self.description.clone(),
            orig_time: self.orig_time,
        };
        Ok(serde_json::to_string(&doc)?)
    }
}
