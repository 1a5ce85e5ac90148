/// Per-connector settings, keyed by connector name in the configuration.
#[derive(Clone, serde::Deserialize, Debug, Default)]
pub struct Connectors {
    #[serde(default)]
    pub bpoint: ConnectorParams,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct ConnectorParams {
    /// base url
    #[serde(default = "default_bpoint_base_url")]
    pub base_url: String,
    /// Rewrites card expiry data so the processor's sandbox handles the call
    #[serde(default)]
    pub test_mode: bool,
    /// Only honoured together with `test_mode`: forces the sandbox to approve
    #[serde(default)]
    pub force_success: bool,
    /// Pre-authorisations go through a second merchant facility with its own credentials
    #[serde(default = "default_true")]
    pub separate_preauth_facility: bool,
}

impl Default for ConnectorParams {
    fn default() -> Self {
        Self {
            base_url: default_bpoint_base_url(),
            test_mode: false,
            force_success: false,
            separate_preauth_facility: true,
        }
    }
}

fn default_bpoint_base_url() -> String {
    "https://www.bpoint.com.au/evolve/service.asmx".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, serde::Deserialize, Clone, Default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}
