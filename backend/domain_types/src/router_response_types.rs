use serde_json::{Map, Value};

/// Key under which a stored card's token is recorded.
pub const BILLING_ID_KEY: &str = "billingid";
/// Key holding the web-service level status mapping.
pub const WEB_SERVICE_KEY: &str = "web_service";
/// Key holding the per-transaction mappings of a search.
pub const SEARCH_RESULTS_KEY: &str = "search_results";
pub const RESPONSE_CODE_KEY: &str = "response_code";
pub const RESPONSE_MESSAGE_KEY: &str = "response_message";

/// Raw answer from the transport.
#[derive(Clone, Debug)]
pub struct Response {
    /// response
    pub response: bytes::Bytes,
    /// status code
    pub status_code: u16,
}

/// Flattened view of a processor response.
///
/// Values are strings, except `web_service` (a nested mapping) and
/// `search_results` (a list of mappings, one per transaction).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ParsedResponse(Map<String, Value>);

impl ParsedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Text value of a top-level key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Later writes to the same key win.
    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    pub fn insert_web_service(&mut self, status: Map<String, Value>) {
        self.0
            .insert(WEB_SERVICE_KEY.to_string(), Value::Object(status));
    }

    pub fn insert_search_results(&mut self, results: Vec<Self>) {
        let results = results.into_iter().map(|r| Value::Object(r.0)).collect();
        self.0
            .insert(SEARCH_RESULTS_KEY.to_string(), Value::Array(results));
    }

    pub fn web_service(&self) -> Option<&Map<String, Value>> {
        self.0.get(WEB_SERVICE_KEY).and_then(Value::as_object)
    }

    pub fn web_service_code(&self) -> Option<&str> {
        self.web_service()
            .and_then(|status| status.get(RESPONSE_CODE_KEY))
            .and_then(Value::as_str)
    }

    pub fn web_service_message(&self) -> Option<&str> {
        self.web_service()
            .and_then(|status| status.get(RESPONSE_MESSAGE_KEY))
            .and_then(Value::as_str)
    }

    /// Token issued for a stored card.
    pub fn billing_id(&self) -> Option<&str> {
        self.get_str(BILLING_ID_KEY)
    }

    /// Transactions returned by a search, in document order.
    pub fn search_results(&self) -> Vec<&Map<String, Value>> {
        self.0
            .get(SEARCH_RESULTS_KEY)
            .and_then(Value::as_array)
            .map(|results| results.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }
}

/// Normalised outcome of one gateway operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaymentResult {
    pub success: bool,
    pub message: String,
    pub raw: ParsedResponse,
    pub authorization_id: Option<String>,
    pub test_mode: bool,
}

impl PaymentResult {
    /// Shortcut for `raw`, named the way callers key into responses.
    pub fn params(&self) -> &ParsedResponse {
        &self.raw
    }
}
