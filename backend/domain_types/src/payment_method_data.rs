use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_number: Secret<String>,
    /// 1-12, or the sandbox sentinel 99
    pub card_exp_month: u8,
    /// Four digit year; only the last two digits go on the wire
    pub card_exp_year: u16,
    pub card_cvc: Secret<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Card {
    /// Name printed on the card, joined the way the processor stores it in `CRN1`.
    pub fn card_holder_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What the caller pays with: raw card data, or a token from an earlier `store`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CardInput {
    Card(Card),
    Token(Secret<String>),
}

impl From<Card> for CardInput {
    fn from(card: Card) -> Self {
        Self::Card(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_holder_name_skips_missing_parts() {
        let card = Card {
            first_name: Some("Longbob".to_string()),
            last_name: Some("Longsen".to_string()),
            ..Default::default()
        };
        assert_eq!(card.card_holder_name(), "Longbob Longsen");

        let card = Card {
            last_name: Some("Longsen".to_string()),
            ..Default::default()
        };
        assert_eq!(card.card_holder_name(), "Longsen");
    }
}
