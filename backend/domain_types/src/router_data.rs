use hyperswitch_masking::Secret;

/// Merchant credentials as they come out of configuration.
///
/// The primary set is always required. The `preauth_*` set belongs to the
/// separate pre-authorisation facility and is only checked when a
/// pre-authorisation is actually built.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ConnectorAuthDetails {
    pub login: Secret<String>,
    pub password: Secret<String>,
    pub merchant_number: Secret<String>,
    #[serde(default)]
    pub preauth_login: Option<Secret<String>>,
    #[serde(default)]
    pub preauth_password: Option<Secret<String>>,
    #[serde(default)]
    pub preauth_merchant_number: Option<Secret<String>>,
}

impl ConnectorAuthDetails {
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        merchant_number: impl Into<String>,
    ) -> Self {
        Self {
            login: Secret::new(login.into()),
            password: Secret::new(password.into()),
            merchant_number: Secret::new(merchant_number.into()),
            preauth_login: None,
            preauth_password: None,
            preauth_merchant_number: None,
        }
    }

    pub fn with_preauth_facility(
        mut self,
        login: impl Into<String>,
        password: impl Into<String>,
        merchant_number: impl Into<String>,
    ) -> Self {
        self.preauth_login = Some(Secret::new(login.into()));
        self.preauth_password = Some(Secret::new(password.into()));
        self.preauth_merchant_number = Some(Secret::new(merchant_number.into()));
        self
    }
}
