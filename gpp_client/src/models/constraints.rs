use super::PosAngleConstraintMode;

/// Position-angle constraint attached to an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PosAngleConstraint {
    pub mode: Option<PosAngleConstraintMode>,
}

impl PosAngleConstraint {
    pub fn new(mode: PosAngleConstraintMode) -> Self {
        Self { mode: Some(mode) }
    }
}
