use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Origin of an annotation set's time axis.
///
/// Resolved once at construction into a plain POSIX timestamp (or nothing),
/// so the rest of the crate never inspects the original form again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OriginTime {
    /// Onsets are relative to the start of the associated recording.
    #[default]
    Unset,
    /// POSIX timestamp in seconds, fractional part allowed.
    Posix(f64),
    /// `(seconds, microseconds)` pair as stored in some acquisition files.
    SecondsMicros { secs: i64, micros: i64 },
    /// Calendar date/time. The zone is explicit: callers convert to UTC
    /// themselves or go through [`OriginTime::from_naive_utc`] /
    /// [`OriginTime::from_naive_offset`].
    Calendar(DateTime<Utc>),
}

impl OriginTime {
    /// Interprets naive calendar fields as UTC. This is the default
    /// interpretation for files that do not record a zone.
    pub fn from_naive_utc(naive: NaiveDateTime) -> Self {
        OriginTime::Calendar(Utc.from_utc_datetime(&naive))
    }

    /// Interprets naive calendar fields against an explicit UTC offset.
    pub fn from_naive_offset(naive: NaiveDateTime, offset: FixedOffset) -> Self {
        OriginTime::Calendar(Utc.from_utc_datetime(&(naive - offset)))
    }

    /// Canonical numeric-or-absent form: seconds since the POSIX epoch.
    pub fn resolve(&self) -> Option<f64> {
        match self {
            OriginTime::Unset => None,
            OriginTime::Posix(ts) => Some(*ts),
            OriginTime::SecondsMicros { secs, micros } => {
                Some(*secs as f64 + *micros as f64 / 1_000_000.0)
            }
            OriginTime::Calendar(dt) => {
                Some(dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1_000_000.0)
            }
        }
    }
}

impl From<f64> for OriginTime {
    fn from(ts: f64) -> Self {
        OriginTime::Posix(ts)
    }
}

impl From<(i64, i64)> for OriginTime {
    fn from((secs, micros): (i64, i64)) -> Self {
        OriginTime::SecondsMicros { secs, micros }
    }
}

impl From<DateTime<Utc>> for OriginTime {
    fn from(dt: DateTime<Utc>) -> Self {
        OriginTime::Calendar(dt)
    }
}

impl From<Option<f64>> for OriginTime {
    fn from(ts: Option<f64>) -> Self {
        match ts {
            Some(ts) => OriginTime::Posix(ts),
            None => OriginTime::Unset,
        }
    }
}
