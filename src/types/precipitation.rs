//! Defines the `Precipitation` estimate derived from a forecast summary window.

use std::fmt;

/// The precipitation estimate for one timeseries entry.
///
/// `Absent` means the provider reported no usable precipitation figure, which is
/// different from a forecast of zero rain: renderers show nothing for `Absent`
/// rather than "0 mm".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precipitation {
    /// A min/max interval in millimetres, e.g. `0.5–2.0`.
    Range {
        min: f64,
        max: f64,
        /// Probability of precipitation in percent, if reported.
        probability: Option<f64>,
    },
    /// A single expected amount in millimetres.
    Amount {
        amount: f64,
        /// Probability of precipitation in percent, if reported.
        probability: Option<f64>,
    },
    /// No precipitation figure is available for this entry.
    Absent,
}

impl Precipitation {
    pub fn is_absent(&self) -> bool {
        matches!(self, Precipitation::Absent)
    }

    pub fn probability(&self) -> Option<f64> {
        match self {
            Precipitation::Range { probability, .. } | Precipitation::Amount { probability, .. } => {
                *probability
            }
            Precipitation::Absent => None,
        }
    }

    /// The largest amount this estimate allows for, if any.
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            Precipitation::Range { max, .. } => Some(*max),
            Precipitation::Amount { amount, .. } => Some(*amount),
            Precipitation::Absent => None,
        }
    }

    /// Compact form without the probability, e.g. `"0.5–2.0"` or `"1.2"`.
    pub fn short(&self) -> String {
        match self {
            Precipitation::Range { min, max, .. } => {
                format!("{}–{}", format_amount(*min), format_amount(*max))
            }
            Precipitation::Amount { amount, .. } => format_amount(*amount),
            Precipitation::Absent => String::new(),
        }
    }
}

/// Full form with the probability appended when known, e.g. `"0.5–2.0 (30%)"`.
impl fmt::Display for Precipitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())?;
        if let Some(probability) = self.probability() {
            write!(f, " ({:.0}%)", probability)?;
        }
        Ok(())
    }
}

// Whole numbers keep one decimal ("2.0"), everything else prints as-is ("0.25").
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
