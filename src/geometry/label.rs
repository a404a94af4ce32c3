use std::fmt;

use serde::Serialize;

/// Bars of at least this many mm are labelled in centimetres
pub const CENTIMETRE_LABEL_FROM_MM: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Millimetre,
    Centimetre,
}

impl LengthUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Centimetre => "cm",
        }
    }
}

/// Human-readable length shown next to the bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleLabel {
    pub value: f64,
    pub unit: LengthUnit,
}

impl ScaleLabel {
    pub fn for_scale_size(scale_size: u32) -> Self {
        if scale_size >= CENTIMETRE_LABEL_FROM_MM {
            Self {
                value: f64::from(scale_size) / 10.0,
                unit: LengthUnit::Centimetre,
            }
        } else {
            Self {
                value: f64::from(scale_size),
                unit: LengthUnit::Millimetre,
            }
        }
    }
}

impl fmt::Display for ScaleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// `"5 cm"` for 50 mm, `"49 mm"` for 49 mm
pub fn format_scale_label(scale_size: u32) -> String {
    ScaleLabel::for_scale_size(scale_size).to_string()
}
