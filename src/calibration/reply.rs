//! Newline-delimited text replies of the `/set/calibration/*` endpoints.
//!
//! The first line is the status token `ok` (any case) on success; otherwise
//! the whole body is the error description.

use crate::api::ApiError;

/// Lines following a successful status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    lines: Vec<String>,
}

impl Reply {
    pub fn parse(text: &str) -> Result<Self, ApiError> {
        let mut lines = text.split('\n').map(|l| l.trim_end_matches('\r'));
        let status = lines.next().unwrap_or_default();

        if !status.trim().eq_ignore_ascii_case("ok") {
            return Err(ApiError::Server(text.trim().to_string()));
        }

        Ok(Self {
            lines: lines.map(str::to_string).collect(),
        })
    }

    /// Payload line `n` (0 is the line after the status), empty when absent.
    pub fn line(&self, n: usize) -> &str {
        self.lines.get(n).map(String::as_str).unwrap_or_default()
    }

    /// The mode named by a mode query.
    pub fn is_calibrating(&self) -> bool {
        self.line(0).trim().eq_ignore_ascii_case("calibrating")
    }

    /// Corrected value of a preview, if the server sent one.
    pub fn preview_value(&self) -> Option<&str> {
        Some(self.line(0).trim()).filter(|v| !v.is_empty())
    }

    /// Constraint hint of a preview; `None` means any shown hint is hidden.
    pub fn preview_hint(&self) -> Option<&str> {
        Some(self.line(1).trim()).filter(|h| !h.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ok() {
        let reply = Reply::parse("OK").unwrap();
        assert_eq!(reply.line(0), "");
        assert_eq!(reply.preview_value(), None);
    }

    #[test]
    fn test_status_is_case_insensitive() {
        assert!(Reply::parse("ok\ncalibrating").unwrap().is_calibrating());
        assert!(Reply::parse("Ok\r\nCALIBRATING\r\n").unwrap().is_calibrating());
        assert!(!Reply::parse("OK\nruntime").unwrap().is_calibrating());
        assert!(!Reply::parse("OK\nidle").unwrap().is_calibrating());
    }

    #[test]
    fn test_error_body_is_server_failure() {
        assert_eq!(
            Reply::parse("Not in calibration mode\n"),
            Err(ApiError::Server("Not in calibration mode".to_string()))
        );
        assert!(Reply::parse("okay").is_err());
        assert!(Reply::parse("").is_err());
    }

    #[test]
    fn test_preview_lines() {
        let reply = Reply::parse("OK\n10\nMaximum value is 10").unwrap();
        assert_eq!(reply.preview_value(), Some("10"));
        assert_eq!(reply.preview_hint(), Some("Maximum value is 10"));

        let reply = Reply::parse("OK\n2.5\n").unwrap();
        assert_eq!(reply.preview_value(), Some("2.5"));
        assert_eq!(reply.preview_hint(), None);
    }
}
