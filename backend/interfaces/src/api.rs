use common_enums::{CardNetwork, CountryAlpha2, Currency, CurrencyUnit};
use common_utils::CustomResult;
use domain_types::{
    errors::ApiClientError, router_request_types::Request, router_response_types::Response,
    types::Connectors,
};

pub trait ConnectorCommon {
    /// Name of the connector (in lowercase).
    fn id(&self) -> &'static str;

    /// Human readable name of the connector.
    fn display_name(&self) -> &'static str;

    fn homepage_url(&self) -> &'static str;

    /// Connector accepted currency unit as either "Base" or "Minor"
    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn default_currency(&self) -> Currency;

    fn supported_countries(&self) -> &'static [CountryAlpha2];

    fn supported_card_networks(&self) -> &'static [CardNetwork];

    /// HTTP `Content-Type` to be used for POST requests.
    /// Defaults to `application/json`.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// The base URL for interacting with the connector's API.
    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;
}

/// Sends one request and hands back whatever the processor answered.
///
/// Implementations return `Ok` for any response that was received, whatever
/// its status code; only failures to send or read are errors.
#[async_trait::async_trait]
pub trait ConnectorTransport: Send + Sync {
    async fn post(&self, request: Request) -> CustomResult<Response, ApiClientError>;
}
