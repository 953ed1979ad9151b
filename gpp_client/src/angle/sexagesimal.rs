//! Sexagesimal (base-60) rendering and parsing of angles.
//!
//! Two notations are handled:
//!
//! - **HMS** for hour-angle values: `6h00m00s`, `6:00:00`, `6ʰ00ᵐ00ˢ`
//! - **DMS** for degree values: `15d00m00s`, `15:00:00`, `15°00′00″`
//!
//! Negative values keep their sign (hour angles are not wrapped into
//! `[0, 24h)`); the GPP API uses signed offsets for both families.

use super::{Angle, AngleUnit};

/// Digits used for the seconds component when no precision is requested.
/// Trailing zeros are trimmed in that case.
const AUTO_PRECISION: u8 = 8;
const MAX_PRECISION: u8 = 12;

/// Component separators used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    /// `6h00m00s` / `15d00m00s`
    #[default]
    Letters,
    /// `6:00:00`
    Colon,
    /// `6 00 00`
    Space,
    /// `6ʰ00ᵐ00ˢ` / `15°00′00″`
    Unicode,
}

/// Rendering options for [`format`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToStringOptions {
    pub separator: Separator,
    /// Fixed number of decimals for the seconds component; `None` prints as
    /// many as needed.
    pub precision: Option<u8>,
    /// Zero-pad the leading component to two digits.
    pub pad: bool,
    /// Print `+` for non-negative values.
    pub always_sign: bool,
}

impl ToStringOptions {
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn padded(mut self) -> Self {
        self.pad = true;
        self
    }

    pub fn signed(mut self) -> Self {
        self.always_sign = true;
        self
    }
}

fn markers(base: AngleUnit, separator: Separator) -> (&'static str, &'static str, &'static str) {
    let hours = base == AngleUnit::Hour;
    match separator {
        Separator::Letters if hours => ("h", "m", "s"),
        Separator::Letters => ("d", "m", "s"),
        Separator::Colon => (":", ":", ""),
        Separator::Space => (" ", " ", ""),
        Separator::Unicode if hours => ("ʰ", "ᵐ", "ˢ"),
        Separator::Unicode => ("°", "′", "″"),
    }
}

/// Raised when a magnitude has too many seconds to be counted exactly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("angle magnitude {0} is too large for sexagesimal notation")]
pub struct MagnitudeTooLarge(pub f64);

/// Render `value` (expressed in `base`, hours or degrees) as a sexagesimal
/// string.
///
/// Rounding is done once on the total number of seconds so a value such as
/// `0.99999999999h` carries into `1h00m00s` instead of printing `60s`.
pub fn format(
    value: f64,
    base: AngleUnit,
    options: &ToStringOptions,
) -> Result<String, MagnitudeTooLarge> {
    let (lead_mark, mid_mark, tail_mark) = markers(base, options.separator);
    let digits = options
        .precision
        .unwrap_or(AUTO_PRECISION)
        .min(MAX_PRECISION);
    let scale = 10u128.pow(u32::from(digits));

    let scaled = (value.abs() * 3_600.0 * scale as f64).round();
    if !scaled.is_finite() || scaled >= u128::MAX as f64 {
        return Err(MagnitudeTooLarge(value));
    }
    let total = scaled as u128;
    let per_lead = 3_600 * scale;
    let per_mid = 60 * scale;
    let lead = total / per_lead;
    let mid = (total % per_lead) / per_mid;
    let second_units = total % per_mid;

    let mut seconds = format!("{:02}", second_units / scale);
    if digits > 0 {
        let fraction = format!("{:0width$}", second_units % scale, width = usize::from(digits));
        let fraction = if options.precision.is_none() {
            fraction.trim_end_matches('0')
        } else {
            fraction.as_str()
        };
        if !fraction.is_empty() {
            seconds.push('.');
            seconds.push_str(fraction);
        }
    }

    let sign = if value < 0.0 && total != 0 {
        "-"
    } else if options.always_sign {
        "+"
    } else {
        ""
    };
    let lead = if options.pad {
        format!("{lead:02}")
    } else {
        lead.to_string()
    };

    Ok(format!("{sign}{lead}{lead_mark}{mid:02}{mid_mark}{seconds}{tail_mark}"))
}

/// Errors produced while reading an angle from text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAngleError {
    #[error("empty angle string")]
    Empty,
    #[error("'{0}' carries no unit and no default unit was given")]
    MissingUnit(String),
    #[error("'{0}' is not a recognised angle notation")]
    Malformed(String),
    #[error("component out of range in '{0}'")]
    ComponentOutOfRange(String),
    #[error("angle magnitude in '{0}' is not finite")]
    NonFinite(String),
}

/// Read an angle from a decimal (`12.5`), decimal-with-unit (`12.5deg`) or
/// sexagesimal (`12h30m`, `-45:30:15`) string.
///
/// `default_unit` applies to unit-less decimals and colon/space separated
/// values. When the string names its own unit and `default_unit` is given,
/// the result is converted into `default_unit`.
pub fn parse(input: &str, default_unit: Option<AngleUnit>) -> Result<Angle, ParseAngleError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseAngleError::Empty);
    }

    if let Ok(value) = s.parse::<f64>() {
        let unit = default_unit.ok_or_else(|| ParseAngleError::MissingUnit(s.to_string()))?;
        return Angle::new(value, unit).map_err(|_| ParseAngleError::NonFinite(s.to_string()));
    }

    let parsed = match parse_with_suffix(s)? {
        Some(angle) => angle,
        None => parse_components(s, default_unit)?,
    };

    Ok(match default_unit {
        Some(unit) if unit != parsed.unit() => parsed.to(unit),
        _ => parsed,
    })
}

/// `<number><unit>` such as `12.5deg` or `3 arcsec`. Returns `Ok(None)` when the
/// suffix is not a unit, so the caller can try the sexagesimal reading.
fn parse_with_suffix(s: &str) -> Result<Option<Angle>, ParseAngleError> {
    let split = s
        .char_indices()
        .find(|(i, c)| {
            !(c.is_ascii_digit()
                || *c == '.'
                || ((*c == '-' || *c == '+') && *i == 0)
                || ((*c == 'e' || *c == 'E') && *i > 0))
        })
        .map(|(i, _)| i);
    let Some(split) = split else {
        return Ok(None);
    };
    let (number, suffix) = s.split_at(split);
    let (Ok(value), Ok(unit)) = (number.parse::<f64>(), suffix.trim().parse::<AngleUnit>()) else {
        return Ok(None);
    };
    Angle::new(value, unit)
        .map(Some)
        .map_err(|_| ParseAngleError::NonFinite(s.to_string()))
}

fn parse_components(s: &str, default_unit: Option<AngleUnit>) -> Result<Angle, ParseAngleError> {
    let base = if s.contains(['h', 'ʰ']) {
        AngleUnit::Hour
    } else if s.contains(['d', '°']) {
        AngleUnit::Degree
    } else if s.contains([':', ' ']) {
        default_unit
            .map(AngleUnit::sexagesimal_base)
            .ok_or_else(|| ParseAngleError::MissingUnit(s.to_string()))?
    } else {
        return Err(ParseAngleError::Malformed(s.to_string()));
    };

    let negative = s.starts_with('-');
    let body = s.trim_start_matches(['+', '-']);

    let separators: &[char] = if base == AngleUnit::Hour {
        &['h', 'ʰ', 'm', 'ᵐ', 's', 'ˢ', ':', ' ']
    } else {
        &['d', '°', 'm', '′', '\'', 's', '″', '"', ':', ' ']
    };
    let parts: Vec<&str> = body
        .split(separators)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(ParseAngleError::Malformed(s.to_string()));
    }

    let mut values = [0.0_f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        if part.starts_with(['+', '-']) {
            return Err(ParseAngleError::Malformed(s.to_string()));
        }
        *slot = part
            .parse::<f64>()
            .map_err(|_| ParseAngleError::Malformed(s.to_string()))?;
    }

    // Only the last component may carry a fraction.
    if parts[..parts.len() - 1].iter().any(|p| p.contains('.')) {
        return Err(ParseAngleError::Malformed(s.to_string()));
    }
    if values[1] >= 60.0 || values[2] >= 60.0 {
        return Err(ParseAngleError::ComponentOutOfRange(s.to_string()));
    }

    let magnitude = values[0] + values[1] / 60.0 + values[2] / 3_600.0;
    let value = if negative { -magnitude } else { magnitude };
    Angle::new(value, base).map_err(|_| ParseAngleError::NonFinite(s.to_string()))
}
