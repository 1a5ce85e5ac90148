use std::{str::FromStr, time::Duration};

use common_utils::CustomResult;
use domain_types::{
    errors::ApiClientError, router_request_types::Request, router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ExposeInterface, Maskable};
use interfaces::api::ConnectorTransport;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{field::Empty, Instrument};

pub type Headers = Vec<(String, Maskable<String>)>;

/// `reqwest` backed transport used against the live processor.
///
/// Clients are built lazily and reused for every call made through the same
/// `HttpClient`.
#[derive(Debug)]
pub struct HttpClient {
    proxy: Proxy,
    non_proxied_client: OnceCell<Client>,
    proxied_client: OnceCell<Client>,
}

impl HttpClient {
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy,
            non_proxied_client: OnceCell::new(),
            proxied_client: OnceCell::new(),
        }
    }

    fn get_base_client(&self, should_bypass_proxy: bool) -> CustomResult<Client, ApiClientError> {
        Ok(if should_bypass_proxy
            || (self.proxy.http_url.is_none() && self.proxy.https_url.is_none())
        {
            &self.non_proxied_client
        } else {
            &self.proxied_client
        }
        .get_or_try_init(|| {
            get_client_builder(&self.proxy, should_bypass_proxy)?
                .build()
                .change_context(ApiClientError::ClientConstructionFailed)
                .inspect_err(|err| {
                    info_log(
                        "ERROR",
                        &json!(format!("Failed to construct base client. Error: {:?}", err)),
                    );
                })
        })?
        .clone())
    }
}

#[async_trait::async_trait]
impl ConnectorTransport for HttpClient {
    async fn post(&self, request: Request) -> CustomResult<Response, ApiClientError> {
        let span = tracing::info_span!(
            "outgoing_connector_request",
            request_headers = Empty,
            status_code = Empty,
            latency = Empty,
            url = %request.url,
        );
        let start = tokio::time::Instant::now();

        span.record(
            "request_headers",
            tracing::field::display(masked_headers(&request.headers)),
        );

        let result = call_connector_api(self, request)
            .instrument(span.clone())
            .await;

        if let Ok(response) = &result {
            span.record("status_code", response.status_code);
        }
        span.record("latency", start.elapsed().as_millis());
        span.in_scope(|| {
            tracing::info!(tag = %Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
        });
        result
    }
}

async fn call_connector_api(
    client: &HttpClient,
    request: Request,
) -> CustomResult<Response, ApiClientError> {
    let url = reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = client.proxy.bypass_proxy_urls.contains(&url.to_string());

    let http_client = client.get_base_client(should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let send_request = async {
        http_client
            .post(url)
            .add_headers(headers)
            .body(request.body.expose())
            .send()
            .await
            .map_err(|error| {
                let api_error = match error {
                    error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                    _ => ApiClientError::RequestNotSent(error.to_string()),
                };
                info_log(
                    "REQUEST_FAILURE",
                    &json!(format!("Unable to send request to connector.",)),
                );
                report!(api_error)
            })
    };

    let response = send_request.await?;

    handle_response(response).await
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

/// SOAP faults arrive with 5xx statuses and still carry a parseable body.
async fn handle_response(resp: reqwest::Response) -> CustomResult<Response, ApiClientError> {
    let status_code = resp.status().as_u16();
    match status_code {
        200..=599 => {
            let response = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            if status_code >= 400 {
                warn_log(
                    "CONNECTOR_ERROR_STATUS",
                    &json!({ "status_code": status_code }),
                );
            }
            Ok(Response {
                response,
                status_code,
            })
        }
        _ => {
            info_log(
                "UNEXPECTED_RESPONSE",
                &json!("Unexpected response from server."),
            );
            Err(report!(ApiClientError::UnexpectedServerResponse))
                .attach_printable(format!("status code: {status_code}"))
        }
    }
}

fn masked_headers(headers: &Headers) -> Value {
    let masked = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => {
                    Value::String(common_utils::consts::REDACTED.to_string())
                }
                Maskable::Normal(iv) => Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    Value::Object(masked)
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Clone, Copy, strum::Display)]
pub enum Tag {
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}

#[cfg(test)]
mod tests {
    use hyperswitch_masking::Secret;

    use super::*;

    #[test]
    fn header_map_keeps_soap_headers() {
        let headers: Headers = vec![
            ("SOAPAction".to_string(), "urn:Eve/ProcessPayment".to_string().into()),
            (
                "Content-Type".to_string(),
                "text/xml;charset=UTF-8".to_string().into(),
            ),
        ];
        let map = headers.construct_header_map().unwrap();
        assert_eq!(map.get("soapaction").unwrap(), "urn:Eve/ProcessPayment");
        assert_eq!(map.get("content-type").unwrap(), "text/xml;charset=UTF-8");
    }

    #[test]
    fn header_map_rejects_invalid_header_name() {
        let headers: Headers = vec![("bad header".to_string(), "x".to_string().into())];
        let err = headers.construct_header_map().unwrap_err();
        assert_eq!(
            err.current_context(),
            &ApiClientError::HeaderMapConstructionFailed
        );
    }

    #[test]
    fn masked_headers_hide_secret_values() {
        let headers: Headers = vec![
            ("x-plain".to_string(), "visible".to_string().into()),
            (
                "x-secret".to_string(),
                Maskable::Masked(Secret::new("hidden".to_string())),
            ),
        ];
        let rendered = masked_headers(&headers).to_string();
        assert!(rendered.contains("visible"));
        assert!(!rendered.contains("hidden"));
    }

    #[tokio::test]
    async fn invalid_url_is_reported_before_sending() {
        let client = HttpClient::new(Proxy::default());
        let request = Request {
            url: "not a url".to_string(),
            headers: Vec::new(),
            body: Secret::new(String::new()),
        };
        let err = client.post(request).await.unwrap_err();
        assert_eq!(err.current_context(), &ApiClientError::UrlEncodingFailed);
    }
}
