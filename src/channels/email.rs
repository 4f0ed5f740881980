use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::config::EmailConfig;
use crate::error::{ AppError, Result };

use super::{ NotificationChannel, NotificationMessage };

/// Posts notifications to the marketplace's email API.
pub struct EmailChannel {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailChannel {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::builder().timeout(Duration::from_secs(10)).build().unwrap(),
            config,
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        let payload = json!({
            "from": self.config.from_address,
            "to_user": message.user_id,
            "subject": message.title,
            "text": message.body,
        });

        let response = self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send().await
            .map_err(|e| AppError::Delivery(format!("Email API error: {}", e)))?;

        if !response.status().is_success() {
            return Err(
                AppError::Delivery(format!("Email API returned status: {}", response.status()))
            );
        }

        Ok(())
    }
}
