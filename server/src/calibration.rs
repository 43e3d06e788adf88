//! Calibration session state.
//!
//! Entries carry an active value and an optional preview. Previews are only
//! accepted while calibrating; a commit promotes changed previews to active
//! values and appends them to the store, a revert drops them.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{CalibrationConfig, ValueKind};
use crate::constraint::{self, format_number, Range, Verdict};
use crate::error::NetuiError;
use crate::store::{CalibrationStore, HistoryEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Runtime,
    Calibrating,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Runtime => "runtime",
            Mode::Calibrating => "calibrating",
        }
    }
}

/// Errors reported to the client as the first line of a text response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalibrationError {
    #[error("Not in calibration mode")]
    NotCalibrating,

    #[error("Unknown calibration entry {domain}/{name}")]
    UnknownEntry { domain: String, name: String },

    #[error("Could not save calibration: {0}")]
    Store(String),
}

/// A value written to the store by a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub domain: String,
    pub name: String,
    pub kind: ValueKind,
    pub value: String,
}

/// Value echoed back to the client after a preview, plus an optional
/// constraint hint.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOutcome {
    pub value: String,
    pub hint: Option<String>,
}

/// Wire form of one entry in `/get/calibration.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterView {
    pub group: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub min: String,
    pub max: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    pub description: String,
}

#[derive(Debug)]
struct Entry {
    domain: String,
    name: String,
    kind: ValueKind,
    desc: String,
    range: Option<Range>,
    active: f64,
    preview: Option<f64>,
}

impl Entry {
    fn current(&self) -> f64 {
        self.preview.unwrap_or(self.active)
    }

    /// Integer entries are truncated, then kept within the integers the
    /// range admits.
    fn normalize(&self, value: f64) -> f64 {
        match self.kind {
            ValueKind::Integer => {
                let value = value.trunc();
                match self.range {
                    Some(range) if value < range.min => range.min.ceil(),
                    Some(range) if value > range.max => range.max.floor(),
                    _ => value,
                }
            }
            ValueKind::Double => value,
        }
    }

    fn format(&self, value: f64) -> String {
        match self.kind {
            ValueKind::Integer => format!("{}", value.trunc() as i64),
            ValueKind::Double => format_number(value),
        }
    }
}

pub struct Calibration {
    mode: Mode,
    entries: Vec<Entry>,
    store: CalibrationStore,
}

impl Calibration {
    /// Build the entry table from configuration, then overlay the newest
    /// committed values from the store.
    pub fn new(configs: &[CalibrationConfig], store: CalibrationStore) -> Result<Self, NetuiError> {
        let mut entries = Vec::with_capacity(configs.len());

        for config in configs {
            let range = config.constraint.as_deref().map(Range::parse).transpose()?;
            if let (ValueKind::Integer, Some(range)) = (config.kind, range) {
                if range.min.ceil() > range.max.floor() {
                    return Err(NetuiError::Config(format!(
                        "Integer calibration entry {}/{} has no integer within {}:{}",
                        config.domain,
                        config.name,
                        format_number(range.min),
                        format_number(range.max)
                    )));
                }
            }
            let mut entry = Entry {
                domain: config.domain.clone(),
                name: config.name.clone(),
                kind: config.kind,
                desc: config.desc.clone(),
                range,
                active: config.value,
                preview: None,
            };
            entry.active = entry.normalize(entry.active);

            if let Some(stored) = store.latest(&entry.domain, &entry.name)? {
                match (ValueKind::from_code(&stored.kind), constraint::parse_number(&stored.value)) {
                    (Some(kind), Some(value)) if kind == entry.kind => {
                        entry.active = entry.normalize(value);
                    }
                    _ => {
                        warn!(
                            "Calibration type mismatch for {}/{}. Stored: {} '{}', declared: {}. Using default",
                            entry.domain,
                            entry.name,
                            stored.kind,
                            stored.value,
                            entry.kind.code()
                        );
                    }
                }
            }

            entries.push(entry);
        }

        Ok(Self {
            mode: Mode::Runtime,
            entries,
            store,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn start(&mut self) {
        if self.mode != Mode::Calibrating {
            info!("Entering calibration mode");
            self.mode = Mode::Calibrating;
        }
    }

    pub fn preview(
        &mut self,
        domain: &str,
        name: &str,
        raw: &str,
    ) -> Result<PreviewOutcome, CalibrationError> {
        if self.mode != Mode::Calibrating {
            return Err(CalibrationError::NotCalibrating);
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.domain == domain && e.name == name)
            .ok_or_else(|| CalibrationError::UnknownEntry {
                domain: domain.to_string(),
                name: name.to_string(),
            })?;

        let (value, hint) = match constraint::check(entry.range.as_ref(), raw) {
            Verdict::Accepted(value) => (entry.normalize(value), None),
            Verdict::Clamped { value, hint } => (entry.normalize(value), Some(hint)),
            Verdict::Rejected { hint } => (entry.current(), Some(hint)),
        };

        entry.preview = Some(value);
        debug!(
            "Preview calibration entry {}/{} with value {} (requested {})",
            domain, name, value, raw
        );

        Ok(PreviewOutcome {
            value: entry.format(value),
            hint,
        })
    }

    /// Persist every changed preview and leave calibration mode.
    /// Returns the number of entries written.
    pub fn commit(&mut self, comment: &str) -> Result<usize, CalibrationError> {
        if self.mode != Mode::Calibrating {
            return Err(CalibrationError::NotCalibrating);
        }

        let comment = if comment.trim().is_empty() { "(none)" } else { comment };

        let changes: Vec<Change> = self
            .entries
            .iter()
            .filter_map(|e| {
                e.preview.filter(|p| *p != e.active).map(|p| Change {
                    domain: e.domain.clone(),
                    name: e.name.clone(),
                    kind: e.kind,
                    value: e.format(p),
                })
            })
            .collect();

        if !changes.is_empty() {
            self.store
                .record(&changes, comment)
                .map_err(|e| CalibrationError::Store(e.to_string()))?;
        }

        for entry in &mut self.entries {
            if let Some(preview) = entry.preview.take() {
                entry.active = preview;
            }
        }

        self.mode = Mode::Runtime;
        info!(
            "Committed {} calibration changes with comment '{}'",
            changes.len(),
            comment
        );
        Ok(changes.len())
    }

    pub fn revert(&mut self) -> Result<(), CalibrationError> {
        if self.mode != Mode::Calibrating {
            return Err(CalibrationError::NotCalibrating);
        }

        for entry in &mut self.entries {
            entry.preview = None;
        }
        self.mode = Mode::Runtime;
        info!("Reverted calibration changes");
        Ok(())
    }

    pub fn parameters(&self) -> Vec<ParameterView> {
        self.entries
            .iter()
            .map(|e| ParameterView {
                group: e.domain.clone(),
                name: e.name.clone(),
                kind: e.kind.code().to_string(),
                value: e.format(e.current()),
                min: e.range.map(|r| format_number(r.min)).unwrap_or_default(),
                max: e.range.map(|r| format_number(r.max)).unwrap_or_default(),
                step: e.range.and_then(|r| r.step),
                description: e.desc.clone(),
            })
            .collect()
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, NetuiError> {
        self.store.history(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(domain: &str, name: &str, kind: ValueKind, value: f64, constraint: Option<&str>) -> CalibrationConfig {
        CalibrationConfig {
            domain: domain.to_string(),
            name: name.to_string(),
            kind,
            value,
            constraint: constraint.map(str::to_string),
            desc: format!("{} {}", domain, name),
        }
    }

    fn sample() -> Vec<CalibrationConfig> {
        vec![
            entry("steering", "center", ValueKind::Double, 0.0, Some("[-1:1]")),
            entry("throttle", "limit", ValueKind::Integer, 80.0, Some("0:5:100")),
            entry("throttle", "gain", ValueKind::Double, 1.5, None),
        ]
    }

    fn calibration() -> Calibration {
        Calibration::new(&sample(), CalibrationStore::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn test_starts_in_runtime() {
        let cal = calibration();
        assert_eq!(cal.mode(), Mode::Runtime);
        assert_eq!(cal.mode().as_str(), "runtime");
    }

    #[test]
    fn test_preview_requires_calibration_mode() {
        let mut cal = calibration();
        assert_eq!(
            cal.preview("steering", "center", "0.5"),
            Err(CalibrationError::NotCalibrating)
        );
        assert_eq!(cal.commit("x"), Err(CalibrationError::NotCalibrating));
        assert_eq!(cal.revert(), Err(CalibrationError::NotCalibrating));
    }

    #[test]
    fn test_preview_clamps_and_hints() {
        let mut cal = calibration();
        cal.start();

        let outcome = cal.preview("steering", "center", "2.5").unwrap();
        assert_eq!(outcome.value, "1");
        assert_eq!(outcome.hint.as_deref(), Some("Maximum value is 1"));

        let outcome = cal.preview("steering", "center", "-0.25").unwrap();
        assert_eq!(outcome.value, "-0.25");
        assert_eq!(outcome.hint, None);
    }

    #[test]
    fn test_preview_integer_truncates() {
        let mut cal = calibration();
        cal.start();
        let outcome = cal.preview("throttle", "limit", "42.9").unwrap();
        assert_eq!(outcome.value, "42");
    }

    #[test]
    fn test_integer_clamp_stays_within_fractional_bounds() {
        let configs = vec![entry("servo", "trim", ValueKind::Integer, 5.0, Some("0.5:9.5"))];
        let mut cal = Calibration::new(&configs, CalibrationStore::open_in_memory().unwrap()).unwrap();
        cal.start();

        let low = cal.preview("servo", "trim", "0").unwrap();
        assert_eq!(low.value, "1");
        assert_eq!(low.hint.as_deref(), Some("Minimum value is 0.5"));

        let high = cal.preview("servo", "trim", "20").unwrap();
        assert_eq!(high.value, "9");
        assert_eq!(high.hint.as_deref(), Some("Maximum value is 9.5"));

        // In range before truncation, below the bound after it
        let truncated = cal.preview("servo", "trim", "0.7").unwrap();
        assert_eq!(truncated.value, "1");
    }

    #[test]
    fn test_integer_range_without_integers_is_config_error() {
        let configs = vec![entry("servo", "trim", ValueKind::Integer, 0.0, Some("0.2:0.8"))];
        let result = Calibration::new(&configs, CalibrationStore::open_in_memory().unwrap());
        assert!(matches!(result, Err(NetuiError::Config(_))));
    }

    #[test]
    fn test_preview_rejects_text_and_keeps_current() {
        let mut cal = calibration();
        cal.start();
        cal.preview("throttle", "gain", "2").unwrap();
        let outcome = cal.preview("throttle", "gain", "lots").unwrap();
        assert_eq!(outcome.value, "2");
        assert_eq!(outcome.hint.as_deref(), Some("Must be a number!"));
    }

    #[test]
    fn test_preview_unknown_entry() {
        let mut cal = calibration();
        cal.start();
        let err = cal.preview("steering", "nope", "1").unwrap_err();
        assert_eq!(err.to_string(), "Unknown calibration entry steering/nope");
    }

    #[test]
    fn test_parameters_report_preview_and_bounds() {
        let mut cal = calibration();
        cal.start();
        cal.preview("throttle", "limit", "60").unwrap();

        let params = cal.parameters();
        assert_eq!(params.len(), 3);
        let limit = &params[1];
        assert_eq!(limit.group, "throttle");
        assert_eq!(limit.kind, "i");
        assert_eq!(limit.value, "60");
        assert_eq!(limit.min, "0");
        assert_eq!(limit.max, "100");
        assert_eq!(limit.step, Some(5.0));

        let gain = &params[2];
        assert_eq!(gain.min, "");
        assert_eq!(gain.max, "");
        assert_eq!(gain.step, None);
    }

    #[test]
    fn test_commit_writes_only_changed_entries() {
        let mut cal = calibration();
        cal.start();
        cal.preview("steering", "center", "0.1").unwrap();
        cal.preview("throttle", "limit", "80").unwrap();

        assert_eq!(cal.commit(""), Ok(1));
        assert_eq!(cal.mode(), Mode::Runtime);

        let history = cal.history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "center");
        assert_eq!(history[0].value, "0.1");
        assert_eq!(history[0].comment, "(none)");

        assert_eq!(cal.parameters()[0].value, "0.1");
    }

    #[test]
    fn test_revert_discards_previews() {
        let mut cal = calibration();
        cal.start();
        cal.preview("throttle", "gain", "9").unwrap();
        cal.revert().unwrap();

        assert_eq!(cal.mode(), Mode::Runtime);
        assert_eq!(cal.parameters()[2].value, "1.5");
        assert!(cal.history(10).unwrap().is_empty());
    }

    #[test]
    fn test_committed_values_survive_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cal.db");
        {
            let mut cal = Calibration::new(&sample(), CalibrationStore::open(&path).unwrap()).unwrap();
            cal.start();
            cal.preview("throttle", "limit", "25").unwrap();
            cal.commit("tuned").unwrap();
        }

        let cal = Calibration::new(&sample(), CalibrationStore::open(&path).unwrap()).unwrap();
        assert_eq!(cal.parameters()[1].value, "25");
    }

    #[test]
    fn test_stored_type_mismatch_uses_default() {
        let mut store = CalibrationStore::open_in_memory().unwrap();
        store
            .record(
                &[Change {
                    domain: "throttle".to_string(),
                    name: "limit".to_string(),
                    kind: ValueKind::Double,
                    value: "12.5".to_string(),
                }],
                "old schema",
            )
            .unwrap();

        let cal = Calibration::new(&sample(), store).unwrap();
        assert_eq!(cal.parameters()[1].value, "80");
    }

    #[test]
    fn test_malformed_constraint_is_config_error() {
        let configs = vec![entry("a", "b", ValueKind::Double, 0.0, Some("wide"))];
        let result = Calibration::new(&configs, CalibrationStore::open_in_memory().unwrap());
        assert!(result.is_err());
    }
}
