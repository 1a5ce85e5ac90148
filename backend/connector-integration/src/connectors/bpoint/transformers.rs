use std::{fmt, str::FromStr};

use common_utils::{
    consts::{NO_ERROR_MESSAGE, REDACTED},
    fp_utils::when,
    types::MinorUnit,
    CustomResult,
};
use domain_types::{
    errors::ConnectorError,
    payment_method_data::{Card, CardInput},
    router_data::ConnectorAuthDetails,
    router_request_types::{PaymentOptions, SearchParams},
    router_response_types::{ParsedResponse, PaymentResult},
    types::ConnectorParams,
};
use error_stack::report;
use hyperswitch_masking::{PeekInterface, Secret};
use serde_json::Value;

use crate::utils::xml_utils::{build_soap_envelope, SoapCall};

pub const SERVICE_NAMESPACE: &str = "urn:Eve";
pub const SOAP_PREFIX: &str = "ns0";

/// Declared on every envelope, in this order.
pub const ENVELOPE_NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:wsdl", SERVICE_NAMESPACE),
    ("xmlns:env", "http://schemas.xmlsoap.org/soap/envelope/"),
    ("xmlns:ns0", SERVICE_NAMESPACE),
];

/// Processor field names.
pub mod fields {
    pub const AMOUNT: &str = "Amount";
    pub const PAYMENT_TYPE: &str = "PaymentType";
    pub const TXN_TYPE: &str = "TxnType";
    pub const MERCHANT_REFERENCE: &str = "MerchantReference";
    pub const CARD_NUMBER: &str = "CardNumber";
    pub const EXPIRY_DATE: &str = "ExpiryDate";
    pub const CVC: &str = "CVC";
    pub const CRN1: &str = "CRN1";
    pub const ORIGINAL_TRANSACTION_NUMBER: &str = "OriginalTransactionNumber";
    pub const TRANSACTION_NUMBER: &str = "TransactionNumber";
    pub const FROM_DATE: &str = "FromDate";
    pub const TO_DATE: &str = "ToDate";
    pub const RESPONSE_CODE: &str = "ResponseCode";
    pub const TOKEN: &str = "token";

    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const MERCHANT_NUMBER: &str = "merchantNumber";
}

/// Keys read back from the flattened response.
pub mod response_keys {
    pub const RESPONSE_CODE: &str = "response_code";
    pub const AUTHORISATION_RESULT: &str = "authorisation_result";
    pub const AUTHORISE_ID: &str = "authorise_id";
    pub const AMOUNT: &str = "amount";
}

/// Inner payment-level code the processor uses for an approval.
pub const PAYMENT_APPROVED_CODE: &str = "0";
/// Outer web-service code of a call the service accepted.
pub const WEB_SERVICE_SUCCESS_CODE: &str = "SUCCESS";

/// Sandbox expiry month that routes a card to the processor's test environment.
pub const SANDBOX_EXPIRY_MONTH: u8 = 99;
/// Sandbox expiry year the test environment always approves.
pub const SANDBOX_APPROVED_EXPIRY_YEAR: u16 = 0;

/// Remote procedure names exposed by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
pub enum Action {
    ProcessPayment,
    AddToken,
    DeleteToken,
    SearchTransactions,
}

impl Action {
    /// Element that wraps the request fields, when the call has one.
    pub fn nested_element(self) -> Option<&'static str> {
        match self {
            Self::ProcessPayment => Some("txnReq"),
            Self::AddToken => Some("tokenRequest"),
            Self::SearchTransactions => Some("search"),
            Self::DeleteToken => None,
        }
    }

    pub fn soap_action(self) -> String {
        format!("{SERVICE_NAMESPACE}/{self}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Payment,
    Preauth,
    Reversal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TxnType {
    InternetAnonymous,
}

/// Request fields in the order they were added.
///
/// Setting a field that already exists replaces its value in place.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestFields(Vec<(&'static str, String)>);

impl RequestFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|(name, _)| *name).collect()
    }

    fn as_pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect()
    }
}

// Values carry card data; only names are printed.
impl fmt::Debug for RequestFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Credential set placed in the envelope header fields.
#[derive(Debug, Clone, Copy)]
pub struct BpointCredentials<'a> {
    pub username: &'a Secret<String>,
    pub password: &'a Secret<String>,
    pub merchant_number: &'a Secret<String>,
}

#[derive(Debug, Clone)]
pub struct BpointAuthType {
    pub(super) login: Secret<String>,
    pub(super) password: Secret<String>,
    pub(super) merchant_number: Secret<String>,
    pub(super) preauth_login: Option<Secret<String>>,
    pub(super) preauth_password: Option<Secret<String>>,
    pub(super) preauth_merchant_number: Option<Secret<String>>,
}

impl TryFrom<&ConnectorAuthDetails> for BpointAuthType {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(auth: &ConnectorAuthDetails) -> Result<Self, Self::Error> {
        for (field_name, value) in [
            ("login", &auth.login),
            ("password", &auth.password),
            ("merchant_number", &auth.merchant_number),
        ] {
            when(value.peek().is_empty(), || {
                Err(report!(ConnectorError::MissingCredentials { field_name }))
            })?;
        }

        Ok(Self {
            login: auth.login.clone(),
            password: auth.password.clone(),
            merchant_number: auth.merchant_number.clone(),
            preauth_login: auth.preauth_login.clone(),
            preauth_password: auth.preauth_password.clone(),
            preauth_merchant_number: auth.preauth_merchant_number.clone(),
        })
    }
}

impl BpointAuthType {
    /// Picks the credential set for a request.
    ///
    /// Pre-authorisations use the pre-auth facility when the merchant has a
    /// separate one; every other call uses the primary set.
    pub fn credentials_for(
        &self,
        request: &RequestFields,
        separate_preauth_facility: bool,
    ) -> CustomResult<BpointCredentials<'_>, ConnectorError> {
        let is_preauth = request.get(fields::PAYMENT_TYPE)
            == Some(PaymentType::Preauth.to_string().as_str());

        if is_preauth && separate_preauth_facility {
            Ok(BpointCredentials {
                username: required_preauth(&self.preauth_login, "preauth_login")?,
                password: required_preauth(&self.preauth_password, "preauth_password")?,
                merchant_number: required_preauth(
                    &self.preauth_merchant_number,
                    "preauth_merchant_number",
                )?,
            })
        } else {
            Ok(BpointCredentials {
                username: &self.login,
                password: &self.password,
                merchant_number: &self.merchant_number,
            })
        }
    }
}

fn required_preauth<'a>(
    value: &'a Option<Secret<String>>,
    field_name: &'static str,
) -> CustomResult<&'a Secret<String>, ConnectorError> {
    value
        .as_ref()
        .filter(|secret| !secret.peek().is_empty())
        .ok_or(report!(ConnectorError::MissingCredentials { field_name }))
}

/// Card data rewrites applied when talking to the processor's sandbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SandboxOverrides {
    pub test_mode: bool,
    pub force_success: bool,
}

impl From<&ConnectorParams> for SandboxOverrides {
    fn from(params: &ConnectorParams) -> Self {
        Self {
            test_mode: params.test_mode,
            force_success: params.force_success,
        }
    }
}

pub fn add_invoice(request: &mut RequestFields, options: &PaymentOptions) {
    if let Some(order_id) = &options.order_id {
        request.set(fields::MERCHANT_REFERENCE, order_id.clone());
    }
}

pub fn add_creditcard(request: &mut RequestFields, card: &CardInput, sandbox: SandboxOverrides) {
    match card {
        CardInput::Token(token) => request.set(fields::CARD_NUMBER, token.peek().clone()),
        CardInput::Card(card) => {
            request.set(fields::CARD_NUMBER, card.card_number.peek().clone());
            request.set(fields::EXPIRY_DATE, expiry_date(card, sandbox));
            request.set(fields::CVC, card.card_cvc.peek().clone());

            let holder = card.card_holder_name();
            if !holder.is_empty() {
                request.set(fields::CRN1, holder);
            }
        }
    }
}

/// `MMYY`, with the sandbox sentinels substituted only in test mode.
pub fn expiry_date(card: &Card, sandbox: SandboxOverrides) -> String {
    let month = if sandbox.test_mode {
        SANDBOX_EXPIRY_MONTH
    } else {
        card.card_exp_month
    };
    let year = if sandbox.test_mode && sandbox.force_success {
        SANDBOX_APPROVED_EXPIRY_YEAR
    } else {
        card.card_exp_year % 100
    };
    format!("{month:02}{year:02}")
}

pub fn add_search_filters(request: &mut RequestFields, params: &SearchParams) {
    let filters = [
        (fields::TRANSACTION_NUMBER, params.transaction_number.clone()),
        (fields::MERCHANT_REFERENCE, params.merchant_reference.clone()),
        (fields::CRN1, params.crn1.clone()),
        (fields::AMOUNT, params.amount.map(|amount| amount.to_string())),
        (fields::FROM_DATE, params.from_date.clone()),
        (fields::TO_DATE, params.to_date.clone()),
        (fields::RESPONSE_CODE, params.response_code.clone()),
    ];
    for (name, value) in filters {
        if let Some(value) = value {
            request.set(name, value);
        }
    }
}

pub fn build_envelope(
    action: Action,
    credentials: &BpointCredentials<'_>,
    request: &RequestFields,
) -> CustomResult<String, ConnectorError> {
    let call = SoapCall {
        prefix: SOAP_PREFIX,
        action: action.as_ref(),
        header_fields: vec![
            (fields::USERNAME, credentials.username.peek().as_str()),
            (fields::PASSWORD, credentials.password.peek().as_str()),
            (
                fields::MERCHANT_NUMBER,
                credentials.merchant_number.peek().as_str(),
            ),
        ],
        nested_element: action.nested_element(),
        fields: request.as_pairs(),
    };
    build_soap_envelope(&ENVELOPE_NAMESPACES, &call)
}

/// Fields whose values never reach the logs.
const SENSITIVE_FIELDS: [&str; 5] = [
    fields::CARD_NUMBER,
    fields::CRN1,
    fields::EXPIRY_DATE,
    fields::CVC,
    fields::TOKEN,
];

/// The envelope as it would be sent, with credentials and card data redacted.
pub fn masked_envelope(
    action: Action,
    request: &RequestFields,
) -> CustomResult<String, ConnectorError> {
    let redacted = Secret::new(REDACTED.to_string());
    let credentials = BpointCredentials {
        username: &redacted,
        password: &redacted,
        merchant_number: &redacted,
    };

    let mut masked = request.clone();
    for name in SENSITIVE_FIELDS {
        if masked.contains(name) {
            masked.set(name, REDACTED);
        }
    }
    build_envelope(action, &credentials, &masked)
}

fn non_empty<'a>(response: &'a ParsedResponse, key: &str) -> Option<&'a str> {
    response.get_str(key).filter(|value| !value.is_empty())
}

/// Outer call accepted and, when present, the inner payment code approved.
pub fn success_from(response: &ParsedResponse) -> bool {
    response.web_service_code() == Some(WEB_SERVICE_SUCCESS_CODE)
        && non_empty(response, response_keys::RESPONSE_CODE)
            .map_or(true, |code| code == PAYMENT_APPROVED_CODE)
}

pub fn message_from(response: &ParsedResponse, success: bool) -> String {
    let outer_succeeded = response.web_service_code() == Some(WEB_SERVICE_SUCCESS_CODE);
    let web_service_message = response.web_service_message().filter(|m| !m.is_empty());

    let message = if outer_succeeded {
        non_empty(response, response_keys::AUTHORISATION_RESULT).or(web_service_message)
    } else {
        web_service_message
    };

    match message {
        Some(message) => message.to_string(),
        None if success => String::new(),
        None => NO_ERROR_MESSAGE.to_string(),
    }
}

pub fn authorization_from(response: &ParsedResponse) -> Option<String> {
    non_empty(response, response_keys::AUTHORISE_ID).map(str::to_string)
}

/// Amount of the first transaction a search returned.
pub fn original_amount(response: &ParsedResponse) -> Option<MinorUnit> {
    let raw = response
        .search_results()
        .into_iter()
        .next()?
        .get(response_keys::AMOUNT)
        .and_then(Value::as_str)?;

    MinorUnit::from_str(raw.trim())
        .inspect_err(|err| {
            tracing::warn!(amount = raw, error = ?err, "Search result carried an unparsable amount");
        })
        .ok()
}

/// Logs responses whose codes do not fit the success rule cleanly.
pub fn flag_unexpected_shape(action: Action, response: &ParsedResponse) {
    if response.is_empty() {
        return;
    }

    let outer = response.web_service_code();
    let inner = non_empty(response, response_keys::RESPONSE_CODE);

    match (outer, inner) {
        (None, _) => {
            tracing::warn!(%action, "Response carried no web service status");
        }
        (Some(WEB_SERVICE_SUCCESS_CODE), None) if action == Action::ProcessPayment => {
            tracing::warn!(%action, "Accepted payment response carried no payment response code");
        }
        (Some(outer), Some(PAYMENT_APPROVED_CODE)) if outer != WEB_SERVICE_SUCCESS_CODE => {
            tracing::warn!(
                %action,
                web_service_code = outer,
                "Payment approved but web service call reported failure"
            );
        }
        _ => {}
    }
}

pub fn payment_result(response: ParsedResponse, test_mode: bool) -> PaymentResult {
    let success = success_from(&response);
    PaymentResult {
        success,
        message: message_from(&response, success),
        authorization_id: authorization_from(&response),
        raw: response,
        test_mode,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    fn response(web_service: Option<(&str, &str)>, top_level: &[(&str, &str)]) -> ParsedResponse {
        let mut parsed = ParsedResponse::new();
        if let Some((code, message)) = web_service {
            let mut status = Map::new();
            status.insert("response_code".to_string(), json!(code));
            status.insert("response_message".to_string(), json!(message));
            parsed.insert_web_service(status);
        }
        for (key, value) in top_level {
            parsed.insert_text(*key, *value);
        }
        parsed
    }

    fn card() -> Card {
        Card {
            card_number: Secret::new("4111111111111111".to_string()),
            card_exp_month: 3,
            card_exp_year: 2031,
            card_cvc: Secret::new("123".to_string()),
            first_name: Some("Longbob".to_string()),
            last_name: Some("Longsen".to_string()),
        }
    }

    #[test]
    fn request_fields_replace_in_place() {
        let mut request = RequestFields::new();
        request.set(fields::PAYMENT_TYPE, "PREAUTH");
        request.set(fields::CARD_NUMBER, "4111");
        request.set(fields::PAYMENT_TYPE, "PAYMENT");

        assert_eq!(request.names(), vec!["PaymentType", "CardNumber"]);
        assert_eq!(request.get(fields::PAYMENT_TYPE), Some("PAYMENT"));
        assert_eq!(format!("{request:?}"), r#"["PaymentType", "CardNumber"]"#);
    }

    #[test]
    fn expiry_date_is_month_then_two_digit_year() {
        assert_eq!(expiry_date(&card(), SandboxOverrides::default()), "0331");

        let card = Card {
            card_exp_year: 2005,
            ..card()
        };
        assert_eq!(expiry_date(&card, SandboxOverrides::default()), "0305");
    }

    #[test]
    fn sandbox_sentinels_only_apply_in_test_mode() {
        let force_without_test_mode = SandboxOverrides {
            test_mode: false,
            force_success: true,
        };
        assert_eq!(expiry_date(&card(), force_without_test_mode), "0331");

        let test_mode = SandboxOverrides {
            test_mode: true,
            force_success: false,
        };
        assert_eq!(expiry_date(&card(), test_mode), "9931");

        let forced = SandboxOverrides {
            test_mode: true,
            force_success: true,
        };
        assert_eq!(expiry_date(&card(), forced), "9900");
    }

    #[test]
    fn token_input_sets_only_card_number() {
        let mut request = RequestFields::new();
        add_creditcard(
            &mut request,
            &CardInput::Token(Secret::new("TOKEN1".to_string())),
            SandboxOverrides::default(),
        );
        assert_eq!(request.names(), vec!["CardNumber"]);
        assert_eq!(request.get(fields::CARD_NUMBER), Some("TOKEN1"));
    }

    #[test]
    fn card_input_sets_card_fields_in_order() {
        let mut request = RequestFields::new();
        add_creditcard(&mut request, &card().into(), SandboxOverrides::default());
        assert_eq!(
            request.names(),
            vec!["CardNumber", "ExpiryDate", "CVC", "CRN1"]
        );
        assert_eq!(request.get(fields::CRN1), Some("Longbob Longsen"));
    }

    #[test]
    fn nameless_card_omits_crn1() {
        let card = Card {
            first_name: None,
            last_name: None,
            ..card()
        };
        let mut request = RequestFields::new();
        add_creditcard(&mut request, &card.into(), SandboxOverrides::default());
        assert!(!request.contains(fields::CRN1));
    }

    #[test]
    fn invoice_is_skipped_without_order_id() {
        let mut request = RequestFields::new();
        add_invoice(&mut request, &PaymentOptions::default());
        assert!(!request.contains(fields::MERCHANT_REFERENCE));

        add_invoice(&mut request, &PaymentOptions::with_order_id("1"));
        assert_eq!(request.get(fields::MERCHANT_REFERENCE), Some("1"));
    }

    #[test]
    fn search_filters_skip_unset_values() {
        let params = SearchParams {
            amount: Some(MinorUnit::new(1000)),
            ..SearchParams::for_transaction("T100")
        };
        let mut request = RequestFields::new();
        add_search_filters(&mut request, &params);
        assert_eq!(request.names(), vec!["TransactionNumber", "Amount"]);
        assert_eq!(request.get(fields::AMOUNT), Some("1000"));
    }

    #[test]
    fn success_requires_outer_success_and_approved_inner_code() {
        assert!(success_from(&response(
            Some(("SUCCESS", "")),
            &[("response_code", "0")]
        )));
        assert!(success_from(&response(Some(("SUCCESS", "")), &[])));
        assert!(success_from(&response(
            Some(("SUCCESS", "")),
            &[("response_code", "")]
        )));
        assert!(!success_from(&response(
            Some(("SUCCESS", "")),
            &[("response_code", "1")]
        )));
        assert!(!success_from(&response(
            Some(("INVALID_LOGIN", "bad")),
            &[("response_code", "0")]
        )));
        assert!(!success_from(&ParsedResponse::new()));
    }

    #[test]
    fn message_prefers_authorisation_result_when_call_was_accepted() {
        let declined = response(
            Some(("SUCCESS", "Success")),
            &[("response_code", "1"), ("authorisation_result", "Declined")],
        );
        assert_eq!(message_from(&declined, false), "Declined");

        let invalid_login = response(
            Some(("INVALID_LOGIN", "invalid login")),
            &[("authorisation_result", "ignored")],
        );
        assert_eq!(message_from(&invalid_login, false), "invalid login");

        let searched = response(Some(("SUCCESS", "Success")), &[]);
        assert_eq!(message_from(&searched, true), "Success");

        assert_eq!(message_from(&ParsedResponse::new(), false), NO_ERROR_MESSAGE);
    }

    #[test]
    fn authorization_comes_from_authorise_id() {
        let approved = response(Some(("SUCCESS", "")), &[("authorise_id", "A1")]);
        assert_eq!(authorization_from(&approved), Some("A1".to_string()));

        let blank = response(Some(("SUCCESS", "")), &[("authorise_id", "")]);
        assert_eq!(authorization_from(&blank), None);
    }

    #[test]
    fn original_amount_reads_first_search_result() {
        let mut first = ParsedResponse::new();
        first.insert_text("amount", "1000");
        let mut second = ParsedResponse::new();
        second.insert_text("amount", "2000");
        let mut found = ParsedResponse::new();
        found.insert_search_results(vec![first, second]);
        assert_eq!(original_amount(&found), Some(MinorUnit::new(1000)));

        let mut garbled = ParsedResponse::new();
        garbled.insert_text("amount", "ten dollars");
        let mut unparsable = ParsedResponse::new();
        unparsable.insert_search_results(vec![garbled]);
        assert_eq!(original_amount(&unparsable), None);

        let mut nothing = ParsedResponse::new();
        nothing.insert_search_results(vec![]);
        assert_eq!(original_amount(&nothing), None);
    }

    #[test]
    fn preauth_uses_its_own_facility() {
        let auth = BpointAuthType::try_from(
            &ConnectorAuthDetails::new("user", "pass", "5353").with_preauth_facility(
                "pre-user", "pre-pass", "9999",
            ),
        )
        .unwrap();

        let mut request = RequestFields::new();
        request.set(fields::PAYMENT_TYPE, PaymentType::Preauth.to_string());

        let credentials = auth.credentials_for(&request, true).unwrap();
        assert_eq!(credentials.username.peek(), "pre-user");
        assert_eq!(credentials.merchant_number.peek(), "9999");

        let credentials = auth.credentials_for(&request, false).unwrap();
        assert_eq!(credentials.username.peek(), "user");

        let credentials = auth.credentials_for(&RequestFields::new(), true).unwrap();
        assert_eq!(credentials.username.peek(), "user");
    }

    #[test]
    fn missing_preauth_facility_names_first_missing_field() {
        let auth =
            BpointAuthType::try_from(&ConnectorAuthDetails::new("user", "pass", "5353")).unwrap();
        let mut request = RequestFields::new();
        request.set(fields::PAYMENT_TYPE, "PREAUTH");

        let err = auth.credentials_for(&request, true).unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::MissingCredentials {
                field_name: "preauth_login"
            }
        );
    }

    #[test]
    fn empty_primary_credentials_are_rejected() {
        let err = BpointAuthType::try_from(&ConnectorAuthDetails::new("user", "", "5353"))
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::MissingCredentials {
                field_name: "password"
            }
        );
    }

    #[test]
    fn masked_envelope_hides_credentials_and_card_data() {
        let mut request = RequestFields::new();
        request.set(fields::MERCHANT_REFERENCE, "order-1");
        add_creditcard(&mut request, &card().into(), SandboxOverrides::default());

        let masked = masked_envelope(Action::ProcessPayment, &request).unwrap();
        assert!(!masked.contains("4111111111111111"));
        assert!(!masked.contains(">123<"));
        assert!(masked.contains("<ns0:MerchantReference>order-1</ns0:MerchantReference>"));
        assert!(!masked.contains("Longbob"));
        assert!(masked.contains(&format!("<ns0:CRN1>{REDACTED}</ns0:CRN1>")));
        assert!(masked.contains(&format!("<ns0:username>{REDACTED}</ns0:username>")));
    }

    #[test]
    fn soap_action_uses_service_namespace() {
        assert_eq!(
            Action::ProcessPayment.soap_action(),
            "urn:Eve/ProcessPayment"
        );
        assert_eq!(Action::DeleteToken.nested_element(), None);
        assert_eq!(PaymentType::Preauth.to_string(), "PREAUTH");
        assert_eq!(TxnType::InternetAnonymous.to_string(), "INTERNET_ANONYMOUS");
    }
}
