use crate::angle::Angle;

/// One angle as GPP reports it: the same value in every supported unit plus
/// the two sexagesimal renderings.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleRecord {
    pub microarcseconds: Option<Angle>,
    pub microseconds: Option<Angle>,
    pub milliarcseconds: Option<Angle>,
    pub milliseconds: Option<Angle>,
    pub arcseconds: Option<Angle>,
    pub seconds: Option<Angle>,
    pub arcminutes: Option<Angle>,
    pub minutes: Option<Angle>,
    pub degrees: Option<Angle>,
    pub hours: Option<Angle>,
    pub hms: Option<Angle>,
    pub dms: Option<Angle>,
}

impl AngleRecord {
    /// Every representation of `angle`.
    pub fn from_angle(angle: Angle) -> Self {
        use crate::angle::AngleUnit::*;

        Self {
            microarcseconds: Some(angle.to(Microarcsecond)),
            microseconds: Some(angle.to(Microsecond)),
            milliarcseconds: Some(angle.to(Milliarcsecond)),
            milliseconds: Some(angle.to(Millisecond)),
            arcseconds: Some(angle.to(Arcsecond)),
            seconds: Some(angle.to(Second)),
            arcminutes: Some(angle.to(Arcminute)),
            minutes: Some(angle.to(Minute)),
            degrees: Some(angle.to(Degree)),
            hours: Some(angle.to(Hour)),
            hms: Some(angle.to(Hour)),
            dms: Some(angle.to(Degree)),
        }
    }

    /// The first available representation, by decreasing precision.
    pub fn angle(&self) -> Option<Angle> {
        [
            self.microarcseconds,
            self.microseconds,
            self.milliarcseconds,
            self.milliseconds,
            self.arcseconds,
            self.seconds,
            self.arcminutes,
            self.minutes,
            self.degrees,
            self.hours,
            self.dms,
            self.hms,
        ]
        .into_iter()
        .flatten()
        .next()
    }
}
