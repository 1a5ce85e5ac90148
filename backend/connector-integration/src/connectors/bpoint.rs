pub mod transformers;


use std::{fmt, sync::Arc, time::Instant};

use common_enums::{CardNetwork, CountryAlpha2, Currency};
use common_utils::{
    consts::{CONTENT_TYPE, SOAP_ACTION},
    types::MinorUnit,
    CustomResult,
};
use domain_types::{
    errors::ConnectorError,
    payment_method_data::{Card, CardInput},
    router_data::ConnectorAuthDetails,
    router_request_types::{PaymentOptions, Request, SearchParams},
    router_response_types::PaymentResult,
    types::{ConnectorParams, Connectors},
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{Maskable, PeekInterface, Secret};
use interfaces::{
    api::{ConnectorCommon, ConnectorTransport},
    connector_types::PaymentGateway,
};
use tracing::{field::Empty, Instrument};
use transformers::{self as bpoint, fields, Action, BpointAuthType, PaymentType, RequestFields};

use crate::utils::xml_utils::parse_xml_response;

/// BPOINT SOAP gateway.
#[derive(Clone)]
pub struct Bpoint {
    auth: BpointAuthType,
    params: ConnectorParams,
    transport: Arc<dyn ConnectorTransport>,
}

impl fmt::Debug for Bpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bpoint")
            .field("auth", &self.auth)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Bpoint {
    /// Fails when any primary credential is missing. Pre-auth credentials are
    /// checked only once a pre-authorisation is built.
    pub fn new(
        auth: &ConnectorAuthDetails,
        connectors: &Connectors,
        transport: Arc<dyn ConnectorTransport>,
    ) -> CustomResult<Self, ConnectorError> {
        Ok(Self {
            auth: BpointAuthType::try_from(auth)?,
            params: connectors.bpoint.clone(),
            transport,
        })
    }

    pub fn is_test_mode(&self) -> bool {
        self.params.test_mode
    }

    fn build_headers(&self, action: Action) -> Vec<(String, Maskable<String>)> {
        vec![
            (SOAP_ACTION.to_string(), action.soap_action().into()),
            (
                CONTENT_TYPE.to_string(),
                self.common_get_content_type().to_string().into(),
            ),
        ]
    }

    async fn commit(
        &self,
        action: Action,
        amount: Option<MinorUnit>,
        mut request: RequestFields,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        if action == Action::ProcessPayment {
            if let Some(amount) = amount {
                request.set(fields::AMOUNT, amount.to_string());
            }
            if !request.contains(fields::PAYMENT_TYPE) {
                request.set(fields::PAYMENT_TYPE, PaymentType::Payment.to_string());
            }
            request.set(
                fields::TXN_TYPE,
                bpoint::TxnType::InternetAnonymous.to_string(),
            );
        }

        let credentials = self
            .auth
            .credentials_for(&request, self.params.separate_preauth_facility)?;
        let body = bpoint::build_envelope(action, &credentials, &request)?;

        let span = tracing::info_span!(
            "bpoint_commit",
            %action,
            url = %self.params.base_url,
            status_code = Empty,
            latency = Empty,
        );
        let start = Instant::now();
        async move {
            if tracing::enabled!(tracing::Level::DEBUG) {
                match bpoint::masked_envelope(action, &request) {
                    Ok(masked) => tracing::debug!(request = %masked, "Sending request to connector"),
                    Err(err) => tracing::debug!(fields = ?request, error = ?err, "Sending request to connector"),
                }
            }

            let response = self
                .transport
                .post(Request {
                    url: self.params.base_url.clone(),
                    headers: self.build_headers(action),
                    body: Secret::new(body),
                })
                .await
                .change_context(ConnectorError::TransportFailure)
                .attach_printable_lazy(|| format!("{action} was not delivered"))?;

            let current = tracing::Span::current();
            current.record("status_code", response.status_code);
            current.record("latency", start.elapsed().as_millis());

            let body = std::str::from_utf8(&response.response).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Connector response is not valid UTF-8");
                ""
            });
            let parsed = parse_xml_response(body);
            bpoint::flag_unexpected_shape(action, &parsed);

            let result = bpoint::payment_result(parsed, self.params.test_mode);
            tracing::info!(
                status_code = response.status_code,
                success = result.success,
                message = %result.message,
                "Received connector response"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }

    fn sandbox(&self) -> bpoint::SandboxOverrides {
        bpoint::SandboxOverrides::from(&self.params)
    }
}

impl ConnectorCommon for Bpoint {
    fn id(&self) -> &'static str {
        "bpoint"
    }

    fn display_name(&self) -> &'static str {
        "BPOINT"
    }

    fn homepage_url(&self) -> &'static str {
        "http://www.bpoint.com.au"
    }

    fn default_currency(&self) -> Currency {
        Currency::AUD
    }

    fn supported_countries(&self) -> &'static [CountryAlpha2] {
        &[CountryAlpha2::AU]
    }

    fn supported_card_networks(&self) -> &'static [CardNetwork] {
        &[
            CardNetwork::Visa,
            CardNetwork::Mastercard,
            CardNetwork::AmericanExpress,
            CardNetwork::Discover,
        ]
    }

    fn common_get_content_type(&self) -> &'static str {
        "text/xml;charset=UTF-8"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str {
        connectors.bpoint.base_url.as_ref()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for Bpoint {
    async fn authorize(
        &self,
        amount: MinorUnit,
        card: Card,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        let mut request = RequestFields::new();
        request.set(fields::PAYMENT_TYPE, PaymentType::Preauth.to_string());
        bpoint::add_invoice(&mut request, options);
        bpoint::add_creditcard(&mut request, &CardInput::Card(card), self.sandbox());

        self.commit(Action::ProcessPayment, Some(amount), request)
            .await
    }

    async fn purchase(
        &self,
        amount: MinorUnit,
        card: CardInput,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        let mut request = RequestFields::new();
        bpoint::add_invoice(&mut request, options);
        bpoint::add_creditcard(&mut request, &card, self.sandbox());

        self.commit(Action::ProcessPayment, Some(amount), request)
            .await
    }

    async fn void(
        &self,
        transaction_number: &str,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        let lookup = self
            .search(&SearchParams::for_transaction(transaction_number))
            .await?;
        let amount = bpoint::original_amount(&lookup.raw);
        if amount.is_none() {
            tracing::warn!(
                transaction_number,
                "Original amount not found, reversing without an amount"
            );
        }

        let mut request = RequestFields::new();
        request.set(fields::PAYMENT_TYPE, PaymentType::Reversal.to_string());
        request.set(fields::ORIGINAL_TRANSACTION_NUMBER, transaction_number);
        bpoint::add_invoice(&mut request, options);

        self.commit(Action::ProcessPayment, amount, request).await
    }

    async fn store(
        &self,
        card: Card,
        _options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        let mut request = RequestFields::new();
        bpoint::add_creditcard(&mut request, &CardInput::Card(card), self.sandbox());

        self.commit(Action::AddToken, None, request).await
    }

    async fn unstore(
        &self,
        token: Secret<String>,
        _options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError> {
        if token.peek().is_empty() {
            return Err(report!(ConnectorError::MissingRequiredField {
                field_name: "token"
            }));
        }

        let mut request = RequestFields::new();
        request.set(fields::TOKEN, token.peek().clone());

        self.commit(Action::DeleteToken, None, request).await
    }

    async fn search(&self, params: &SearchParams) -> CustomResult<PaymentResult, ConnectorError> {
        let mut request = RequestFields::new();
        bpoint::add_search_filters(&mut request, params);

        self.commit(Action::SearchTransactions, None, request).await
    }
}
