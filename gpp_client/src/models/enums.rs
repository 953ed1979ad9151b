//! Categorical GPP codes. Matching is exact by wire code; variant names are
//! never accepted on input.

/// Implemented by every enumeration declared with [`define_code_enum!`].
pub trait CodeEnum: Sized + Copy + 'static {
    const NAME: &'static str;
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// Comma-separated list of valid codes, for error messages.
    fn allowed_codes() -> String {
        Self::ALL
            .iter()
            .map(|v| v.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A code outside an enumeration's closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {enum_name}")]
pub struct UnknownEnumValue {
    pub enum_name: &'static str,
    pub value: String,
}

crate::define_code_enum!(
    /// Whether an entity is live or soft-deleted.
    Existence {
        Present => "PRESENT",
        Deleted => "DELETED",
    }
);

crate::define_code_enum!(
    /// Science ranking band.
    ScienceBand {
        Band1 => "BAND1",
        Band2 => "BAND2",
        Band3 => "BAND3",
        Band4 => "BAND4",
    }
);

crate::define_code_enum!(ProgramType {
    Calibration => "CALIBRATION",
    Engineering => "ENGINEERING",
    Example => "EXAMPLE",
    Library => "LIBRARY",
    Science => "SCIENCE",
    System => "SYSTEM",
});

crate::define_code_enum!(
    /// How the position angle of an observation may be chosen.
    PosAngleConstraintMode {
        Unbounded => "UNBOUNDED",
        Fixed => "FIXED",
        AllowFlip => "ALLOW_FLIP",
        AverageParallactic => "AVERAGE_PARALLACTIC",
        ParallacticOverride => "PARALLACTIC_OVERRIDE",
    }
);

crate::define_code_enum!(Instrument {
    AcqCam => "ACQ_CAM",
    Bhros => "BHROS",
    Flamingos2 => "FLAMINGOS2",
    Ghost => "GHOST",
    GmosNorth => "GMOS_NORTH",
    GmosSouth => "GMOS_SOUTH",
    Gnirs => "GNIRS",
    Gpi => "GPI",
    Gsaoi => "GSAOI",
    Michelle => "MICHELLE",
    Nici => "NICI",
    Nifs => "NIFS",
    Niri => "NIRI",
    Phoenix => "PHOENIX",
    Trecs => "TRECS",
    Visitor => "VISITOR",
    Scorpio => "SCORPIO",
    Alopeke => "ALOPEKE",
    Zorro => "ZORRO",
});
