//! Unit conversions
//!
//! Imperial-to-metric helpers for the weight and height collected during
//! onboarding. The calculator itself only works in kilograms and centimeters.

use serde::{Deserialize, Serialize};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Unit a weight was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Some(WeightUnit::Lbs),
            _ => None,
        }
    }
}

/// Unit a height was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Cm,
    Ft,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Some(HeightUnit::Cm)
            }
            "ft" | "feet" | "foot" | "ft/in" => Some(HeightUnit::Ft),
            _ => None,
        }
    }
}

/// A height as entered by the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightInput {
    Centimeters(f64),
    FeetInches { feet: f64, inches: f64 },
}

pub fn pounds_to_kg(pounds: f64) -> f64 {
    pounds * KG_PER_LB
}

pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * INCHES_PER_FOOT + inches) * CM_PER_INCH
}

pub fn convert_weight_to_kg(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => weight,
        WeightUnit::Lbs => pounds_to_kg(weight),
    }
}

pub fn convert_height_to_cm(height: HeightInput) -> f64 {
    match height {
        HeightInput::Centimeters(cm) => cm,
        HeightInput::FeetInches { feet, inches } => feet_inches_to_cm(feet, inches),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kg() {
        assert!((pounds_to_kg(220.0) - 99.79024).abs() < 1e-9);
        assert_eq!(pounds_to_kg(0.0), 0.0);
    }

    #[test]
    fn test_feet_inches_to_cm() {
        assert!((feet_inches_to_cm(5.0, 10.0) - 177.8).abs() < 1e-9);
        assert!((feet_inches_to_cm(6.0, 0.0) - 182.88).abs() < 1e-9);
    }

    #[test]
    fn test_convert_weight() {
        assert_eq!(convert_weight_to_kg(72.0, WeightUnit::Kg), 72.0);
        assert!((convert_weight_to_kg(100.0, WeightUnit::Lbs) - 45.3592).abs() < 1e-9);
    }

    #[test]
    fn test_convert_height() {
        assert_eq!(convert_height_to_cm(HeightInput::Centimeters(170.0)), 170.0);
        let cm = convert_height_to_cm(HeightInput::FeetInches { feet: 5.0, inches: 10.0 });
        assert!((cm - 177.8).abs() < 1e-9);
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(WeightUnit::parse("LBS"), Some(WeightUnit::Lbs));
        assert_eq!(WeightUnit::parse("kg"), Some(WeightUnit::Kg));
        assert_eq!(WeightUnit::parse("stone"), None);
        assert_eq!(HeightUnit::parse("feet"), Some(HeightUnit::Ft));
        assert_eq!(HeightUnit::parse(" cm "), Some(HeightUnit::Cm));
        assert_eq!(HeightUnit::parse("m"), None);
    }
}
