use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use configs::LookupConfig;

use super::{AddressLookup, LookupError};
use crate::client::domain::Address;

/// ViaCEP REST client: `GET {base_url}/{cep}/json/`.
#[derive(Clone, Debug)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

/// Wire shape of a ViaCEP answer. Unknown postal codes come back as
/// `{"erro": true}` (older deployments send the string `"true"`).
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    ibge: String,
    #[serde(default)]
    gia: String,
    #[serde(default)]
    ddd: String,
    #[serde(default)]
    siafi: String,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            Some(_) => true,
            None => false,
        }
    }

    /// Map onto the domain address, keyed by the code that was requested.
    fn into_address(self, postal_code: &str) -> Result<Address, LookupError> {
        if self.is_error() {
            return Err(LookupError::Unassigned(postal_code.to_string()));
        }
        let echoed: String = self.cep.chars().filter(|c| c.is_ascii_digit()).collect();
        if !echoed.is_empty() && echoed != postal_code {
            return Err(LookupError::Decode(format!("asked for {postal_code}, got {}", self.cep)));
        }
        Ok(Address {
            postal_code: postal_code.to_string(),
            street: self.logradouro,
            complement: self.complemento,
            district: self.bairro,
            city: self.localidade,
            state: self.uf,
            ibge: self.ibge,
            gia: self.gia,
            ddd: self.ddd,
            siafi: self.siafi,
        })
    }
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn from_config(cfg: &LookupConfig) -> Result<Self, LookupError> {
        Self::new(cfg.base_url.clone(), Duration::from_secs(cfg.timeout_secs))
    }

    pub fn base_url(&self) -> &str { &self.base_url }

    fn url_for(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, postal_code)
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn consult(&self, postal_code: &str) -> Result<Address, LookupError> {
        let resp = self
            .http
            .get(self.url_for(postal_code))
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "viacep_non_success");
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: ViaCepResponse = resp
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;
        let address = body.into_address(postal_code)?;
        debug!(city = %address.city, state = %address.state, "viacep_resolved");
        Ok(address)
    }
}
