use super::ProgramType;

/// Human-readable program reference, e.g. `G-2025A-0123-Q`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProgramReference {
    pub label: Option<String>,
    pub program_type: Option<ProgramType>,
}

/// Reference to one observation within a program (`index` is 1-based).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObservationReference {
    pub label: Option<String>,
    pub program: Option<ProgramReference>,
    pub index: Option<u32>,
}
