//! Unit Conversion Tools

use serde::Serialize;

use crate::nutrition::{
    convert_height_to_cm, convert_weight_to_kg, HeightInput, HeightUnit, WeightUnit,
};

#[derive(Debug, Serialize)]
pub struct ConvertWeightResponse {
    pub value: f64,
    pub unit: &'static str,
    pub kilograms: f64,
}

#[derive(Debug, Serialize)]
pub struct ConvertHeightResponse {
    pub unit: &'static str,
    pub centimeters: f64,
}

pub fn convert_weight(value: f64, unit: &str) -> Result<ConvertWeightResponse, String> {
    let unit = WeightUnit::parse(unit)
        .ok_or_else(|| format!("Unknown weight unit '{}'. Use 'kg' or 'lbs'.", unit))?;
    Ok(ConvertWeightResponse {
        value,
        unit: unit.as_str(),
        kilograms: convert_weight_to_kg(value, unit),
    })
}

/// Convert a height given either as `value` centimeters or `feet` + `inches`
pub fn convert_height(
    unit: &str,
    value: Option<f64>,
    feet: Option<f64>,
    inches: Option<f64>,
) -> Result<ConvertHeightResponse, String> {
    let unit = HeightUnit::parse(unit)
        .ok_or_else(|| format!("Unknown height unit '{}'. Use 'cm' or 'ft'.", unit))?;

    let input = match unit {
        HeightUnit::Cm => {
            HeightInput::Centimeters(value.ok_or("Height in cm requires 'value'")?)
        }
        HeightUnit::Ft => HeightInput::FeetInches {
            feet: feet.ok_or("Height in ft requires 'feet'")?,
            inches: inches.unwrap_or(0.0),
        },
    };

    Ok(ConvertHeightResponse {
        unit: unit.as_str(),
        centimeters: convert_height_to_cm(input),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_weight_lbs() {
        let response = convert_weight(220.0, "lbs").unwrap();
        assert!((response.kilograms - 99.79024).abs() < 1e-6);
        assert_eq!(response.unit, "lbs");
    }

    #[test]
    fn test_convert_weight_unknown_unit() {
        assert!(convert_weight(10.0, "stone").unwrap_err().contains("stone"));
    }

    #[test]
    fn test_convert_height_feet() {
        let response = convert_height("ft", None, Some(5.0), Some(10.0)).unwrap();
        assert!((response.centimeters - 177.8).abs() < 1e-9);
    }

    #[test]
    fn test_convert_height_requires_value() {
        assert!(convert_height("cm", None, None, None).is_err());
        assert!(convert_height("ft", Some(180.0), None, None).is_err());
        assert_eq!(convert_height("cm", Some(180.0), None, None).unwrap().centimeters, 180.0);
    }
}
