//! Range constraints attached to calibration entries.
//!
//! A constraint is written `min:max` or `min:step:max`, optionally wrapped
//! in square brackets (`[0:0.5:10]`).

use crate::error::NetuiError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

/// Outcome of testing a raw preview value against a range.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted(f64),
    Clamped { value: f64, hint: String },
    Rejected { hint: String },
}

impl Range {
    pub fn parse(text: &str) -> Result<Self, NetuiError> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = inner.split(':').map(str::trim).collect();
        let number = |s: &str| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    NetuiError::Constraint(format!("Bad number '{}' in constraint '{}'", s, text))
                })
        };

        let (min, step, max) = match parts.as_slice() {
            [min, max] => (number(min)?, None, number(max)?),
            [min, step, max] => (number(min)?, Some(number(step)?), number(max)?),
            _ => {
                return Err(NetuiError::Constraint(format!(
                    "Could not match any constraint patterns for constraint '{}'",
                    text
                )))
            }
        };

        if min > max {
            return Err(NetuiError::Constraint(format!(
                "Constraint '{}' has min greater than max",
                text
            )));
        }

        Ok(Self {
            min,
            max,
            // A zero step means "unspecified"
            step: step.filter(|s| *s > 0.0),
        })
    }

    pub fn check(&self, raw: &str) -> Verdict {
        let Some(value) = parse_number(raw) else {
            return Verdict::Rejected {
                hint: "Must be a number!".to_string(),
            };
        };

        if value < self.min {
            Verdict::Clamped {
                value: self.min,
                hint: format!("Minimum value is {}", format_number(self.min)),
            }
        } else if value > self.max {
            Verdict::Clamped {
                value: self.max,
                hint: format!("Maximum value is {}", format_number(self.max)),
            }
        } else {
            Verdict::Accepted(value)
        }
    }
}

/// Check a raw value when an entry may have no constraint at all.
pub fn check(range: Option<&Range>, raw: &str) -> Verdict {
    match range {
        Some(range) => range.check(raw),
        None => match parse_number(raw) {
            Some(value) => Verdict::Accepted(value),
            None => Verdict::Rejected {
                hint: "Must be a number!".to_string(),
            },
        },
    }
}

pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Shortest text form of a number, without a trailing `.0` for integers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_min_max() {
        let range = Range::parse("0:100").unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 100.0);
        assert_eq!(range.step, None);
    }

    #[test]
    fn test_parse_bracketed_with_step() {
        let range = Range::parse("[-1:0.05:1]").unwrap();
        assert_eq!(range.min, -1.0);
        assert_eq!(range.step, Some(0.05));
        assert_eq!(range.max, 1.0);
    }

    #[test]
    fn test_zero_step_is_unspecified() {
        let range = Range::parse("0:0:5").unwrap();
        assert_eq!(range.step, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Range::parse("fast").is_err());
        assert!(Range::parse("1:2:3:4").is_err());
        assert!(Range::parse("a:10").is_err());
    }

    #[test]
    fn test_parse_rejects_inverted_bounds() {
        let err = Range::parse("10:0").unwrap_err();
        assert!(err.to_string().contains("min greater than max"));
    }

    #[test]
    fn test_check_clamps_to_max_with_hint() {
        let range = Range::parse("0:10").unwrap();
        assert_eq!(
            range.check("42"),
            Verdict::Clamped {
                value: 10.0,
                hint: "Maximum value is 10".to_string()
            }
        );
    }

    #[test]
    fn test_check_clamps_to_min_with_hint() {
        let range = Range::parse("-1.5:1.5").unwrap();
        assert_eq!(
            range.check("-3"),
            Verdict::Clamped {
                value: -1.5,
                hint: "Minimum value is -1.5".to_string()
            }
        );
    }

    #[test]
    fn test_check_accepts_in_range_and_rejects_text() {
        let range = Range::parse("0:10").unwrap();
        assert_eq!(range.check(" 2.5 "), Verdict::Accepted(2.5));
        assert!(matches!(range.check("abc"), Verdict::Rejected { .. }));
    }

    #[test]
    fn test_unconstrained_check() {
        assert_eq!(check(None, "1e6"), Verdict::Accepted(1_000_000.0));
        assert!(matches!(check(None, "NaN"), Verdict::Rejected { .. }));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.25), "-0.25");
    }
}
