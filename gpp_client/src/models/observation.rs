use chrono::{DateTime, Utc};

use super::{Existence, Instrument, PosAngleConstraint, ScienceBand};

/// An observation as returned by GPP.
///
/// Only `observation_id` is guaranteed. The schema requires `title`, `index`
/// and `pos_angle_constraint` as well, so they are always `Some` after a
/// full-mode load; a partial load leaves out whatever the query did not
/// select.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    pub observation_id: String,
    pub existence: Option<Existence>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub index: Option<u32>,
    pub science_band: Option<ScienceBand>,
    pub observation_time: Option<DateTime<Utc>>,
    pub instrument: Option<Instrument>,
    pub pos_angle_constraint: Option<PosAngleConstraint>,
}

impl Observation {
    /// An observation carrying only its identifier.
    pub fn new(observation_id: impl Into<String>) -> Self {
        Self {
            observation_id: observation_id.into(),
            existence: None,
            title: None,
            subtitle: None,
            index: None,
            science_band: None,
            observation_time: None,
            instrument: None,
            pos_angle_constraint: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.existence == Some(Existence::Deleted)
    }
}
