use common_utils::{types::MinorUnit, CustomResult};
use domain_types::{
    errors::ConnectorError,
    payment_method_data::{Card, CardInput},
    router_request_types::{PaymentOptions, SearchParams},
    router_response_types::PaymentResult,
};
use hyperswitch_masking::Secret;

use crate::api::ConnectorCommon;

/// Caller-facing operations of a card gateway.
///
/// Processor-level outcomes (approved, declined, invalid) come back as a
/// [`PaymentResult`]; only configuration and transport problems are errors.
#[async_trait::async_trait]
pub trait PaymentGateway: ConnectorCommon + Send + Sync {
    /// Places a hold on the card without capturing funds.
    async fn authorize(
        &self,
        amount: MinorUnit,
        card: Card,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError>;

    async fn purchase(
        &self,
        amount: MinorUnit,
        card: CardInput,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError>;

    /// Reverses an earlier transaction, identified by its transaction number.
    async fn void(
        &self,
        transaction_number: &str,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError>;

    /// Tokenises a card; the token is returned under `billingid`.
    async fn store(
        &self,
        card: Card,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError>;

    async fn unstore(
        &self,
        token: Secret<String>,
        options: &PaymentOptions,
    ) -> CustomResult<PaymentResult, ConnectorError>;

    async fn search(&self, params: &SearchParams)
        -> CustomResult<PaymentResult, ConnectorError>;
}
