use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ExchangeConfig;
use crate::currency::format::{format_general, format_grouped, format_long_date};
use crate::error::ConversionError;

const CONVERT_PATH: &str = "/exchangerates_data/convert";

/// What the user wants converted; currency codes are only uppercased, never checked
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from_currency: &str, to_currency: &str) -> Self {
        Self {
            amount,
            from_currency: from_currency.to_string(),
            to_currency: to_currency.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    success: bool,
    result: Option<f64>,
    info: Option<RateInfo>,
    date: Option<String>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct RateInfo {
    rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    info: Option<String>,
}

/// Client for the APILayer exchange-rate conversion endpoint
#[derive(Clone)]
pub struct CurrencyConverter {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl CurrencyConverter {
    pub fn new(config: &ExchangeConfig) -> Result<Self, ConversionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(
            http,
            config.api_key.clone(),
            &config.base_url,
        ))
    }

    pub fn with_client(http: reqwest::Client, api_key: Option<String>, base_url: &str) -> Self {
        Self {
            http,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Converts and always answers with text: either the formatted result or
    /// the message of whatever went wrong.
    pub async fn convert(&self, request: &ConversionRequest) -> String {
        match self.try_convert(request).await {
            Ok(message) => message,
            Err(e) => {
                warn!("Conversion failed: {}", e);
                e.to_string()
            }
        }
    }

    pub async fn try_convert(&self, request: &ConversionRequest) -> Result<String, ConversionError> {
        let api_key = self.api_key.as_deref().ok_or(ConversionError::MissingApiKey)?;

        let from = request.from_currency.to_uppercase();
        let to = request.to_currency.to_uppercase();
        // The query carries the exact amount; `%g` rounding is for display only
        let query_amount = request.amount.to_string();
        let amount = format_general(request.amount);

        info!("Converting {} {} to {}", query_amount, from, to);

        let response = self
            .http
            .get(format!("{}{}", self.base_url, CONVERT_PATH))
            .header("apikey", api_key)
            .query(&[
                ("amount", query_amount.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ConvertResponse = response.json().await?;
        debug!("Exchange-rate response: {:?}", body);

        if !body.success {
            let info = body
                .error
                .and_then(|error| error.info)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(ConversionError::Api(info));
        }

        let result = body.result.ok_or_else(|| missing("result"))?;
        let rate = body.info.and_then(|info| info.rate).ok_or_else(|| missing("rate"))?;
        let date = body.date.ok_or_else(|| missing("date"))?;
        let pretty_date =
            format_long_date(&date).map_err(|e| ConversionError::Unexpected(e.to_string()))?;

        Ok(format!(
            "According to APILayer Marketplace, {} {} = {} {} (Rate: {:.4}, Date: {})",
            amount,
            from,
            format_grouped(result, 2),
            to,
            rate,
            pretty_date
        ))
    }
}

fn missing(field: &str) -> ConversionError {
    ConversionError::Unexpected(format!("'{}' missing from response", field))
}
