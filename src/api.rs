use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Failure of a request to the kernel API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response, network error or non-2xx status. The detail is for logs only.
    #[error("Could not connect to server.")]
    Transport(String),

    /// Response received but its status line is not `ok`.
    #[error("Server failure.\n{0}")]
    Server(String),

    #[error("Unreadable server response: {0}")]
    Decode(String),
}

// -- Types matching the server's JSON listings --

/// One tunable value exposed by the kernel.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CalibrationParameter {
    #[serde(default, alias = "domain", alias = "module")]
    pub group: String,
    pub name: String,
    #[serde(default, rename = "type", alias = "sig")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub min: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub max: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub step: Option<f64>,
}

/// A kernel object listed by the inspector. `desc` is itself JSON text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObjectItem {
    pub name: String,
    #[serde(default)]
    pub subname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub parent: String,
    #[serde(default)]
    pub desc: String,
}

/// A committed calibration value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryEntry {
    #[serde(default, alias = "domain")]
    pub group: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Deserialize)]
struct ResultList<T> {
    result: Vec<T>,
}

/// Accept strings, numbers or null where the wire is loosely typed.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

pub fn decode_result_list<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, ApiError> {
    serde_json::from_str::<ResultList<T>>(text)
        .map(|list| list.result)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// -- Endpoints --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CalibrationMode,
    CalibrationStart,
    CalibrationPreview,
    CalibrationCommit,
    CalibrationRevert,
    CalibrationList,
    CalibrationHistory,
    Objects,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::CalibrationMode => "/get/calibration/mode",
            Endpoint::CalibrationStart => "/set/calibration/start",
            Endpoint::CalibrationPreview => "/set/calibration/preview",
            Endpoint::CalibrationCommit => "/set/calibration/commit",
            Endpoint::CalibrationRevert => "/set/calibration/revert",
            Endpoint::CalibrationList => "/get/calibration.json",
            Endpoint::CalibrationHistory => "/get/calibration/history.json",
            Endpoint::Objects => "/get/objects.json",
        }
    }
}

/// A GET request with query-string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub params: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Same-origin relative URL with an encoded query string.
    pub fn url(&self) -> String {
        let mut url = self.endpoint.path().to_string();
        for (i, (key, value)) in self.params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }
}

// -- fetch helpers --

fn transport_error(err: JsValue) -> ApiError {
    ApiError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

async fn get_text(url: &str) -> Result<String, ApiError> {
    let window =
        web_sys::window().ok_or_else(|| ApiError::Transport("No browser window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(transport_error)?;
    let response: web_sys::Response = response.dyn_into().map_err(transport_error)?;

    if !response.ok() {
        return Err(ApiError::Transport(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let body = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    body.as_string()
        .ok_or_else(|| ApiError::Decode("Response body is not text".to_string()))
}

/// Send a text-protocol request and return the raw body.
/// Status-line interpretation is left to the caller.
pub async fn send(request: &ApiRequest) -> Result<String, ApiError> {
    get_text(&request.url()).await
}

pub async fn fetch_parameters() -> Result<Vec<CalibrationParameter>, ApiError> {
    let text = get_text(Endpoint::CalibrationList.path()).await?;
    decode_result_list(&text)
}

pub async fn fetch_history(limit: usize) -> Result<Vec<HistoryEntry>, ApiError> {
    let request = ApiRequest::new(Endpoint::CalibrationHistory).param("limit", limit.to_string());
    let text = get_text(&request.url()).await?;
    decode_result_list(&text)
}

pub async fn fetch_objects() -> Result<Vec<ObjectItem>, ApiError> {
    let text = get_text(Endpoint::Objects.path()).await?;
    decode_result_list(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_params() {
        let request = ApiRequest::new(Endpoint::CalibrationMode);
        assert_eq!(request.url(), "/get/calibration/mode");
    }

    #[test]
    fn test_url_encodes_params() {
        let request = ApiRequest::new(Endpoint::CalibrationPreview)
            .param("domain", "steering")
            .param("name", "center trim")
            .param("value", "-0.5");
        assert_eq!(
            request.url(),
            "/set/calibration/preview?domain=steering&name=center%20trim&value=-0.5"
        );
    }

    #[test]
    fn test_decode_parameters_with_aliases() {
        let text = r#"{"result":[
            {"domain":"steering","name":"center","sig":"d","value":0.25,"min":-1,"max":"1","desc":"Trim","step":0.05},
            {"group":"throttle","name":"limit","type":"i","value":"80"}
        ]}"#;
        let params: Vec<CalibrationParameter> = decode_result_list(text).unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].group, "steering");
        assert_eq!(params[0].kind, "d");
        assert_eq!(params[0].value, "0.25");
        assert_eq!(params[0].min, "-1");
        assert_eq!(params[0].max, "1");
        assert_eq!(params[0].description, "Trim");
        assert_eq!(params[0].step, Some(0.05));

        assert_eq!(params[1].min, "");
        assert_eq!(params[1].step, None);
    }

    #[test]
    fn test_decode_objects_with_numeric_ids() {
        let text = r#"{"result":[{"name":"block","subname":"motor","id":3,"parent":null,"desc":"{}"}]}"#;
        let objects: Vec<ObjectItem> = decode_result_list(text).unwrap();
        assert_eq!(objects[0].id, "3");
        assert_eq!(objects[0].parent, "");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        let result: Result<Vec<HistoryEntry>, _> = decode_result_list("{'result':[]}");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ApiError::Transport("refused".to_string()).to_string(),
            "Could not connect to server."
        );
        assert_eq!(
            ApiError::Server("Not in calibration mode".to_string()).to_string(),
            "Server failure.\nNot in calibration mode"
        );
    }
}
