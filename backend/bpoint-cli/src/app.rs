use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use common_utils::{types::MinorUnit, CustomResult};
use connector_integration::connectors::Bpoint;
use domain_types::{
    payment_method_data::{Card, CardInput},
    router_request_types::{PaymentOptions, SearchParams},
    types::Connectors,
};
use error_stack::{report, ResultExt};
use external_services::HttpClient;
use hyperswitch_masking::Secret;
use interfaces::{api::ConnectorTransport, connector_types::PaymentGateway};
use serde_json::{json, Value};

use crate::{configs::Config, error::ApplicationError, logger};

/// Command line client for the BPOINT payment gateway.
///
/// Every command performs one gateway operation and prints the outcome as JSON.
#[derive(Debug, Parser)]
#[command(name = "bpoint", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file to load instead of `config/<environment>.toml`.
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the gateway's metadata and the configured endpoint.
    Info,
    /// Charge a card or a stored token.
    Purchase(PurchaseArgs),
    /// Place a hold on a card through the pre-authorisation facility.
    Authorize(AuthorizeArgs),
    /// Reverse an earlier transaction.
    Void(VoidArgs),
    /// Tokenise a card.
    Store(StoreArgs),
    /// Delete a stored card token.
    Unstore(UnstoreArgs),
    /// Search the merchant's transactions.
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct CardArgs {
    #[arg(long)]
    pub card_number: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=99))]
    pub exp_month: Option<u8>,
    /// Four digit expiry year
    #[arg(long)]
    pub exp_year: Option<u16>,
    #[arg(long)]
    pub cvc: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
}

impl CardArgs {
    pub fn into_card(self) -> CustomResult<Card, ApplicationError> {
        Ok(Card {
            card_number: Secret::new(required(self.card_number, "card-number")?),
            card_exp_month: required(self.exp_month, "exp-month")?,
            card_exp_year: required(self.exp_year, "exp-year")?,
            card_cvc: Secret::new(required(self.cvc, "cvc")?),
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

fn required<T>(value: Option<T>, flag: &str) -> CustomResult<T, ApplicationError> {
    value
        .ok_or(report!(ApplicationError::InvalidArguments))
        .attach_printable_lazy(|| format!("missing required flag --{flag}"))
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Sent to the processor as the merchant reference
    #[arg(long)]
    pub order_id: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<OrderArgs> for PaymentOptions {
    fn from(args: OrderArgs) -> Self {
        Self {
            order_id: args.order_id,
            description: args.description,
        }
    }
}

#[derive(Debug, Args)]
pub struct PurchaseArgs {
    /// Amount in cents
    #[arg(long)]
    pub amount: i64,
    /// Charge a stored card token instead of card details
    #[arg(long, conflicts_with_all = ["card_number", "exp_month", "exp_year", "cvc"])]
    pub token: Option<String>,
    #[command(flatten)]
    pub card: CardArgs,
    #[command(flatten)]
    pub order: OrderArgs,
}

impl PurchaseArgs {
    fn card_input(self) -> CustomResult<(CardInput, PaymentOptions), ApplicationError> {
        let card = match self.token {
            Some(token) => CardInput::Token(Secret::new(token)),
            None => CardInput::Card(self.card.into_card()?),
        };
        Ok((card, self.order.into()))
    }
}

#[derive(Debug, Args)]
pub struct AuthorizeArgs {
    /// Amount in cents
    #[arg(long)]
    pub amount: i64,
    #[command(flatten)]
    pub card: CardArgs,
    #[command(flatten)]
    pub order: OrderArgs,
}

#[derive(Debug, Args)]
pub struct VoidArgs {
    /// Transaction number of the payment to reverse
    #[arg(long)]
    pub transaction_number: String,
    #[command(flatten)]
    pub order: OrderArgs,
}

#[derive(Debug, Args)]
pub struct StoreArgs {
    #[command(flatten)]
    pub card: CardArgs,
}

#[derive(Debug, Args)]
pub struct UnstoreArgs {
    #[arg(long)]
    pub token: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub transaction_number: Option<String>,
    #[arg(long)]
    pub merchant_reference: Option<String>,
    #[arg(long)]
    pub crn1: Option<String>,
    /// Amount in cents
    #[arg(long)]
    pub amount: Option<i64>,
    #[arg(long)]
    pub from_date: Option<String>,
    #[arg(long)]
    pub to_date: Option<String>,
    #[arg(long)]
    pub response_code: Option<String>,
}

impl From<SearchArgs> for SearchParams {
    fn from(args: SearchArgs) -> Self {
        Self {
            transaction_number: args.transaction_number,
            merchant_reference: args.merchant_reference,
            crn1: args.crn1,
            amount: args.amount.map(MinorUnit::new),
            from_date: args.from_date,
            to_date: args.to_date,
            response_code: args.response_code,
        }
    }
}

/// Builds the gateway over the live HTTP transport and runs `command`.
pub async fn run(command: Command, config: &Config) -> CustomResult<Value, ApplicationError> {
    let transport: Arc<dyn ConnectorTransport> = Arc::new(HttpClient::new(config.proxy.clone()));
    let gateway = Bpoint::new(&config.bpoint_auth, &config.connectors, transport)
        .change_context(ApplicationError::GatewaySetupFailed)?;

    logger::debug!(test_mode = gateway.is_test_mode(), "BPOINT gateway ready");

    execute(&gateway, &config.connectors, command).await
}

/// Runs one command against `gateway` and renders the outcome.
pub async fn execute(
    gateway: &dyn PaymentGateway,
    connectors: &Connectors,
    command: Command,
) -> CustomResult<Value, ApplicationError> {
    let result = match command {
        Command::Info => return Ok(gateway_info(gateway, connectors)),
        Command::Purchase(args) => {
            let amount = MinorUnit::new(args.amount);
            let (card, options) = args.card_input()?;
            gateway.purchase(amount, card, &options).await
        }
        Command::Authorize(args) => {
            let card = args.card.into_card()?;
            gateway
                .authorize(MinorUnit::new(args.amount), card, &args.order.into())
                .await
        }
        Command::Void(args) => {
            gateway
                .void(&args.transaction_number, &args.order.into())
                .await
        }
        Command::Store(args) => {
            let card = args.card.into_card()?;
            gateway.store(card, &PaymentOptions::default()).await
        }
        Command::Unstore(args) => {
            gateway
                .unstore(Secret::new(args.token), &PaymentOptions::default())
                .await
        }
        Command::Search(args) => gateway.search(&args.into()).await,
    }
    .change_context(ApplicationError::GatewayCallFailed)?;

    logger::info!(
        success = result.success,
        message = %result.message,
        "Gateway operation completed"
    );

    serde_json::to_value(result).change_context(ApplicationError::OutputFailed)
}

pub fn gateway_info(gateway: &dyn PaymentGateway, connectors: &Connectors) -> Value {
    json!({
        "id": gateway.id(),
        "display_name": gateway.display_name(),
        "homepage_url": gateway.homepage_url(),
        "default_currency": gateway.default_currency(),
        "currency_unit": gateway.get_currency_unit(),
        "supported_countries": gateway.supported_countries(),
        "supported_card_networks": gateway.supported_card_networks(),
        "content_type": gateway.common_get_content_type(),
        "base_url": gateway.base_url(connectors),
        "test_mode": connectors.bpoint.test_mode,
    })
}
