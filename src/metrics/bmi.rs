//! Body-mass index
//!
//! BMI = weight (kg) / height (m)^2, rounded to one decimal place. Missing or
//! unusable measurements produce the `0.0` sentinel instead of NaN.

use serde::{Serialize, Serializer};

use crate::models::ProfileMetrics;

/// BMI category thresholds, checked in order; first match wins
const UNDERWEIGHT_BELOW: f64 = 18.5;
const NORMAL_BELOW: f64 = 25.0;
const OVERWEIGHT_BELOW: f64 = 30.0;

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a BMI value to its category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// A BMI reading rounded to one decimal place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    value: f64,
    measured: bool,
}

impl Bmi {
    /// The "not set" reading, displayed as `0.0`
    pub const UNSET: Bmi = Bmi {
        value: 0.0,
        measured: false,
    };

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_set(&self) -> bool {
        self.measured
    }

    /// Category of the rounded value; `None` until both measurements exist
    pub fn category(&self) -> Option<BmiCategory> {
        self.measured.then(|| classify_bmi(self.value))
    }
}

impl std::fmt::Display for Bmi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.value)
    }
}

impl Serialize for Bmi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn usable(measurement: Option<f64>) -> Option<f64> {
    measurement.filter(|m| m.is_finite() && *m > 0.0)
}

/// Compute BMI from height in centimetres and weight in kilograms
pub fn calculate_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Bmi {
    let (Some(height_cm), Some(weight_kg)) = (usable(height_cm), usable(weight_kg)) else {
        return Bmi::UNSET;
    };

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return Bmi::UNSET;
    }

    Bmi {
        value: round_to_tenth(bmi),
        measured: true,
    }
}

/// Round half up to one decimal place using the exact decimal value of `value`.
///
/// Scaling by 10 first would round twice: 18.4499999... becomes 184.5 and then
/// rounds up to 18.5. Exact binary ties such as 18.25 still round up.
fn round_to_tenth(value: f64) -> f64 {
    // 40 places is far below the spacing of doubles anywhere near a .x5 tie
    let exact = format!("{:.40}", value);
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };
    let mut digits = fraction.bytes();
    let tenths = digits.next().unwrap_or(b'0');
    let rounds_up = digits.next().is_some_and(|d| d >= b'5');

    let truncated: f64 = match format!("{}.{}", whole, tenths as char).parse() {
        Ok(truncated) => truncated,
        Err(_) => return value,
    };
    if !rounds_up {
        return truncated;
    }
    let step = if truncated.is_sign_negative() { -0.1 } else { 0.1 };
    format!("{:.1}", truncated + step)
        .parse()
        .unwrap_or(truncated + step)
}

/// Compute BMI from raw text fields; empty or non-numeric text is "not set"
pub fn calculate_bmi_from_input(height: &str, weight: &str) -> Bmi {
    calculate_bmi(height.trim().parse().ok(), weight.trim().parse().ok())
}

impl ProfileMetrics {
    pub fn bmi(&self) -> Bmi {
        calculate_bmi(self.height_cm, self.weight_kg)
    }
}
