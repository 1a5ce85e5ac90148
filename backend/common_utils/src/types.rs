//! Types that can be used in other crates

use std::{fmt, str::FromStr};

use error_stack::{Report, ResultExt};

use crate::errors::ParsingError;

/// This Unit struct represents MinorUnit in which core amount works
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
#[serde(transparent)]
pub struct MinorUnit(pub i64);

impl MinorUnit {
    /// forms a new minor unit from amount
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MinorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MinorUnit {
    type Err = Report<ParsingError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<i64>()
            .map(Self)
            .change_context(ParsingError::IntegerParsingError)
            .attach_printable_lazy(|| format!("invalid minor unit amount: {value:?}"))
    }
}
