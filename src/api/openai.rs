// OpenAI chat completions client

use crate::config::Config;
use crate::error::AppError;
use std::time::Duration;

use super::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::TextGenerator;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

pub struct OpenAiClient {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        let base_url = config
            .openai_base_url
            .clone()
            .unwrap_or_else(|| OPENAI_BASE_URL.to_string());

        OpenAiClient {
            agent,
            api_key: config.openai_api_key.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.openai_model.clone(),
        }
    }
}

impl TextGenerator for OpenAiClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, AppError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request);

        let completion: ChatCompletionResponse = match response {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| AppError::JsonError(e.to_string()))?,
            Err(ureq::Error::Status(429, _)) => return Err(AppError::RateLimited),
            Err(ureq::Error::Status(status, resp)) => {
                return Err(AppError::Upstream {
                    service: "OpenAI",
                    status,
                    body: resp.into_string().unwrap_or_default(),
                })
            }
            Err(e) => return Err(AppError::HttpError(e.to_string())),
        };

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::JsonError("completion contained no message".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::Platform;
    use mockito::Matcher;

    fn test_config(base_url: String) -> Config {
        Config {
            riot_api_key: "RGAPI-test".to_string(),
            openai_api_key: "sk-test".to_string(),
            region: Platform::Na1,
            openai_model: "gpt-4o".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            riot_base_url: None,
            openai_base_url: Some(base_url),
        }
    }

    #[test]
    fn sends_system_and_user_messages() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("Authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "max_tokens": 1500,
                "messages": [
                    {"role": "system", "content": "be a coach"},
                    {"role": "user", "content": "analyze me"}
                ]
            })))
            .with_status(200)
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Strengths:\n- farming"}}]}"#,
            )
            .create();

        let client = OpenAiClient::new(&test_config(server.url()));
        let advice = client.generate("be a coach", "analyze me").unwrap();

        mock.assert();
        assert_eq!(advice, "Strengths:\n- farming");
    }

    #[test]
    fn provider_failure_is_surfaced() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("model overloaded")
            .create();

        let client = OpenAiClient::new(&test_config(server.url()));
        let err = client.generate("system", "prompt").unwrap_err();

        assert!(matches!(
            err,
            AppError::Upstream { status: 500, ref body, .. } if body == "model overloaded"
        ));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create();

        let client = OpenAiClient::new(&test_config(server.url()));
        assert!(matches!(
            client.generate("system", "prompt"),
            Err(AppError::JsonError(_))
        ));
    }
}
