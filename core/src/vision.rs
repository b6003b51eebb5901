//! The external vision collaborator.
//!
//! [`VisionProvider`] is the seam the gateway talks through; [`VisionModel`]
//! is the real implementation, speaking the OpenAI-compatible chat API with
//! the image attached as a base64 data URL.

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrlArgs,
    },
    Client,
};
use async_trait::async_trait;
use base64::Engine as _;
use tracing::info;

#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// One synchronous (from the caller's view) round trip: raw image bytes
    /// plus an instruction in, the model's text out. `mime_type` comes from
    /// the probe, never from caller input.
    async fn describe(&self, image: &[u8], mime_type: &str, instruction: &str) -> Result<String>;
}

pub struct VisionModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl VisionModel {
    /// Builds the client from the environment: `OPENAI_API_KEY` (required),
    /// `OPENAI_MODEL` (default "gpt-4o"), `OPENAI_BASE_URL` for any
    /// OpenAI-compatible endpoint.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY must be set in .env")?;
        let model = std::env::var("OPENAI_MODEL")
            .unwrap_or_else(|_| "gpt-4o".to_string());

        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            config = config.with_api_base(base);
        }
        let client = Client::with_config(config);

        info!("Vision client ready. Model: {}", model);
        Ok(Self { client, model })
    }

    /// Cheap text-only round trip used as a startup reachability check.
    pub async fn ping(&self) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content("Reply with 'ready'.")
                    .build()?,
            )])
            .build()?;

        let response = self.client.chat().create(request).await?;
        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl VisionProvider for VisionModel {
    async fn describe(&self, image: &[u8], mime_type: &str, instruction: &str) -> Result<String> {
        let data_url = encode_data_url(image, mime_type);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .max_tokens(1024u32)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(vec![
                    ChatCompletionRequestMessageContentPartTextArgs::default()
                        .text(instruction)
                        .build()?
                        .into(),
                    ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(
                            ImageUrlArgs::default()
                                .url(data_url)
                                .detail(ImageDetail::Auto)
                                .build()?,
                        )
                        .build()?
                        .into(),
                ])
                .build()?
                .into()])
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("vision backend request failed")?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .context("vision backend returned an empty response")
    }
}

fn encode_data_url(image: &[u8], mime_type: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(image);
    format!("data:{};base64,{}", mime_type, encoded)
}
