use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_RATE: &str = "+0%";
pub const DEFAULT_PITCH: &str = "+0Hz";

/// A prosody field as clients send it: either the provider string
/// (`"+10%"`, `"-5Hz"`) or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProsodyValue {
    Text(String),
    Number(f64),
}

/// Rate string for the provider. Numbers are speed multipliers, so `1.0`
/// leaves the rate untouched and `1.25` becomes `+25%`.
pub fn rate(value: Option<&ProsodyValue>) -> Result<String, AppError> {
    match value {
        None => Ok(DEFAULT_RATE.to_string()),
        Some(ProsodyValue::Text(s)) if s.trim().is_empty() => Ok(DEFAULT_RATE.to_string()),
        Some(ProsodyValue::Text(s)) => Ok(s.trim().to_string()),
        Some(ProsodyValue::Number(n)) => {
            if !n.is_finite() || *n <= 0.0 {
                return Err(AppError::InvalidRequest(format!(
                    "Speed must be a positive number, got {}",
                    n
                )));
            }
            let percent = ((n - 1.0) * 100.0).round() as i64;
            Ok(format!("{:+}%", percent))
        }
    }
}

/// Pitch string for the provider. Numbers are offsets in Hz.
pub fn pitch(value: Option<&ProsodyValue>) -> Result<String, AppError> {
    match value {
        None => Ok(DEFAULT_PITCH.to_string()),
        Some(ProsodyValue::Text(s)) if s.trim().is_empty() => Ok(DEFAULT_PITCH.to_string()),
        Some(ProsodyValue::Text(s)) => Ok(s.trim().to_string()),
        Some(ProsodyValue::Number(n)) => {
            if !n.is_finite() {
                return Err(AppError::InvalidRequest("Pitch must be finite".into()));
            }
            Ok(format!("{:+}Hz", n.round() as i64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(rate(None).unwrap(), "+0%");
        assert_eq!(pitch(None).unwrap(), "+0Hz");
        assert_eq!(rate(Some(&ProsodyValue::Text(" ".into()))).unwrap(), "+0%");
    }

    #[test]
    fn test_strings_pass_through() {
        let r = ProsodyValue::Text("-10%".into());
        let p = ProsodyValue::Text("+20Hz".into());
        assert_eq!(rate(Some(&r)).unwrap(), "-10%");
        assert_eq!(pitch(Some(&p)).unwrap(), "+20Hz");
    }

    #[test]
    fn test_speed_multiplier() {
        assert_eq!(rate(Some(&ProsodyValue::Number(1.0))).unwrap(), "+0%");
        assert_eq!(rate(Some(&ProsodyValue::Number(1.25))).unwrap(), "+25%");
        assert_eq!(rate(Some(&ProsodyValue::Number(0.8))).unwrap(), "-20%");
    }

    #[test]
    fn test_invalid_speed() {
        assert!(rate(Some(&ProsodyValue::Number(0.0))).is_err());
        assert!(rate(Some(&ProsodyValue::Number(-1.0))).is_err());
    }

    #[test]
    fn test_numeric_pitch() {
        assert_eq!(pitch(Some(&ProsodyValue::Number(5.0))).unwrap(), "+5Hz");
        assert_eq!(pitch(Some(&ProsodyValue::Number(-3.4))).unwrap(), "-3Hz");
    }

    #[test]
    fn test_untagged_deserialize() {
        let v: ProsodyValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, ProsodyValue::Number(1.5));
        let v: ProsodyValue = serde_json::from_str("\"+5%\"").unwrap();
        assert_eq!(v, ProsodyValue::Text("+5%".into()));
    }
}
