use rig::{completion::ToolDefinition, tool::Tool};
use serde_json::json;

use crate::currency::convert::{ConversionRequest, CurrencyConverter};
use crate::error::ConversionError;

/// Exposes [`CurrencyConverter`] to the chat model as `convert_currency`
#[derive(Clone)]
pub struct ConvertCurrencyTool {
    converter: CurrencyConverter,
}

impl ConvertCurrencyTool {
    pub fn new(converter: CurrencyConverter) -> Self {
        Self { converter }
    }
}

impl Tool for ConvertCurrencyTool {
    const NAME: &'static str = "convert_currency";

    type Error = ConversionError;
    type Args = ConversionRequest;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Convert currency using APILayer Exchange Rates Data API.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "amount": {
                        "type": "number",
                        "description": "Amount of money in the source currency"
                    },
                    "from_currency": {
                        "type": "string",
                        "description": "Three-letter code of the source currency, e.g. USD"
                    },
                    "to_currency": {
                        "type": "string",
                        "description": "Three-letter code of the target currency, e.g. THB"
                    }
                },
                "required": ["amount", "from_currency", "to_currency"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        // The HTTP future is not Sync, so it runs as its own task
        let converter = self.converter.clone();
        tokio::spawn(async move { converter.convert(&args).await })
            .await
            .map_err(|e| ConversionError::Unexpected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExchangeConfig;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(server: &MockServer) -> ConvertCurrencyTool {
        let converter = CurrencyConverter::new(&ExchangeConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            timeout_secs: 15,
        })
        .unwrap();
        ConvertCurrencyTool::new(converter)
    }

    #[tokio::test]
    async fn test_definition_declares_typed_arguments() {
        let server = MockServer::start().await;

        let definition = tool(&server).definition(String::new()).await;

        assert_eq!(definition.name, "convert_currency");
        assert_eq!(
            definition.parameters["required"],
            json!(["amount", "from_currency", "to_currency"])
        );
        assert_eq!(definition.parameters["properties"]["amount"]["type"], "number");
    }

    #[tokio::test]
    async fn test_call_with_model_arguments() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("from", "EUR"))
            .and(query_param("to", "GBP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "result": 42.5,
                "info": { "rate": 0.85 },
                "date": "2024-03-01"
            })))
            .mount(&server)
            .await;

        let args: ConversionRequest = serde_json::from_value(json!({
            "amount": 50,
            "from_currency": "eur",
            "to_currency": "gbp"
        }))
        .unwrap();

        let output = tool(&server).call(args).await.unwrap();

        assert_eq!(
            output,
            "According to APILayer Marketplace, 50 EUR = 42.50 GBP (Rate: 0.8500, Date: March 01, 2024)"
        );
    }
}
