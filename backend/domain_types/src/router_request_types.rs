use common_utils::types::MinorUnit;
use hyperswitch_masking::{Maskable, Secret};

/// Order metadata shared by the payment operations.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct PaymentOptions {
    /// Sent as the processor's `MerchantReference`
    pub order_id: Option<String>,
    pub description: Option<String>,
}

impl PaymentOptions {
    pub fn with_order_id(order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(order_id.into()),
            description: None,
        }
    }
}

/// Filters accepted by a transaction search. Unset filters are not sent.
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct SearchParams {
    pub transaction_number: Option<String>,
    pub merchant_reference: Option<String>,
    pub crn1: Option<String>,
    pub amount: Option<MinorUnit>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub response_code: Option<String>,
}

impl SearchParams {
    pub fn for_transaction(transaction_number: impl Into<String>) -> Self {
        Self {
            transaction_number: Some(transaction_number.into()),
            ..Default::default()
        }
    }
}

/// A fully built outgoing call, handed to the transport as-is.
#[derive(Clone, Debug)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(String, Maskable<String>)>,
    /// Carries credentials and card data
    pub body: Secret<String>,
}
