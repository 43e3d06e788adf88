use crate::api::CalibrationParameter;

/// Identity of a parameter within a calibration session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub group: String,
    pub name: String,
}

/// Editable state of one calibration field: the draft value shown in the
/// input and the committed snapshot a revert goes back to.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub param: CalibrationParameter,
    pub value: String,
    pub committed: String,
    pub hint: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Increment for a numeric input spanning `range`. Wider ranges get coarser
/// steps so a single increment stays usable.
pub fn step_for_range(range: f64) -> f64 {
    if range <= 10.0 {
        0.1
    } else if range <= 100.0 {
        1.0
    } else if range <= 1000.0 {
        10.0
    } else if range <= 10000.0 {
        100.0
    } else {
        1000.0
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Clamp a seed value into `[min, max]`. Unparsable text is kept as is.
fn clamp_seed(raw: &str, min: Option<f64>, max: Option<f64>) -> String {
    let Some(value) = parse_bound(raw) else {
        return raw.to_string();
    };
    match (min, max) {
        (Some(min), _) if value < min => format_number(min),
        (_, Some(max)) if value > max => format_number(max),
        _ => raw.trim().to_string(),
    }
}

impl FieldState {
    pub fn new(param: CalibrationParameter) -> Self {
        let min = parse_bound(&param.min);
        let max = parse_bound(&param.max);
        let value = clamp_seed(&param.value, min, max);
        Self {
            committed: value.clone(),
            value,
            hint: None,
            min,
            max,
            param,
        }
    }

    pub fn key(&self) -> FieldKey {
        FieldKey {
            group: self.param.group.clone(),
            name: self.param.name.clone(),
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn is_integer(&self) -> bool {
        self.param.kind == "i"
    }

    /// Step from the declared range, falling back to the server's step (or 1)
    /// when a bound is missing. Integer fields never step below 1.
    pub fn step(&self) -> f64 {
        let step = match (self.min, self.max) {
            (Some(min), Some(max)) => step_for_range(max - min),
            _ => self.param.step.filter(|s| *s > 0.0).unwrap_or(1.0),
        };
        if self.is_integer() {
            step.max(1.0)
        } else {
            step
        }
    }

    /// Commit broadcast: the current value becomes the snapshot.
    pub fn snapshot(&mut self) {
        self.committed = self.value.clone();
    }

    /// Revert broadcast: go back to the snapshot and drop any hint.
    pub fn reset(&mut self) {
        self.value = self.committed.clone();
        self.hint = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(value: &str, min: &str, max: &str) -> CalibrationParameter {
        CalibrationParameter {
            group: "steering".to_string(),
            name: "center".to_string(),
            kind: "d".to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            description: String::new(),
            step: None,
        }
    }

    #[test]
    fn test_step_for_range_boundaries() {
        assert_eq!(step_for_range(2.0), 0.1);
        assert_eq!(step_for_range(10.0), 0.1);
        assert_eq!(step_for_range(10.5), 1.0);
        assert_eq!(step_for_range(100.0), 1.0);
        assert_eq!(step_for_range(1000.0), 10.0);
        assert_eq!(step_for_range(10000.0), 100.0);
        assert_eq!(step_for_range(10001.0), 1000.0);
    }

    #[test]
    fn test_step_uses_declared_range() {
        assert_eq!(FieldState::new(param("0", "-1", "1")).step(), 0.1);
        assert_eq!(FieldState::new(param("0", "0", "255")).step(), 10.0);
    }

    #[test]
    fn test_step_without_bounds_falls_back() {
        let mut p = param("0", "", "");
        assert_eq!(FieldState::new(p.clone()).step(), 1.0);
        p.step = Some(0.25);
        assert_eq!(FieldState::new(p).step(), 0.25);
    }

    #[test]
    fn test_integer_step_is_at_least_one() {
        let mut p = param("1", "0", "5");
        p.kind = "i".to_string();
        assert_eq!(FieldState::new(p.clone()).step(), 1.0);

        p.max = "500".to_string();
        assert_eq!(FieldState::new(p).step(), 10.0);
    }

    #[test]
    fn test_seed_is_clamped() {
        assert_eq!(FieldState::new(param("5", "0", "1")).value, "1");
        assert_eq!(FieldState::new(param("-3", "-1.5", "1")).value, "-1.5");
        assert_eq!(FieldState::new(param("0.5", "0", "1")).value, "0.5");
        assert_eq!(FieldState::new(param("n/a", "0", "1")).value, "n/a");
    }

    #[test]
    fn test_seed_is_committed_snapshot() {
        let field = FieldState::new(param("0.3", "0", "1"));
        assert_eq!(field.committed, "0.3");
        assert_eq!(field.hint, None);
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut field = FieldState::new(param("0.3", "0", "1"));
        field.value = "0.7".to_string();
        field.hint = Some("Maximum value is 1".to_string());
        field.reset();
        assert_eq!(field.value, "0.3");
        assert_eq!(field.hint, None);

        field.value = "0.9".to_string();
        field.snapshot();
        field.value = "0.1".to_string();
        field.reset();
        assert_eq!(field.value, "0.9");
    }

    #[test]
    fn test_key_and_kind() {
        let mut p = param("1", "0", "10");
        p.kind = "i".to_string();
        let field = FieldState::new(p);
        assert!(field.is_integer());
        assert_eq!(
            field.key(),
            FieldKey {
                group: "steering".to_string(),
                name: "center".to_string()
            }
        );
        assert_eq!(field.min(), Some(0.0));
        assert_eq!(field.max(), Some(10.0));
    }
}
