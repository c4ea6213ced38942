//! Shared bot marketplace operations.

use serde_json::Value;

use super::client::ApiClient;
use crate::domain::{BotId, SubscriptionRequest};
use crate::error::Result;

const SHARED: &str = "shared-bots";

impl ApiClient {
    /// `GET /shared-bots/marketplace`
    pub async fn get_shared_bots_marketplace(&self) -> Result<Value> {
        self.get(&[SHARED, "marketplace"]).await
    }

    /// `POST /shared-bots/subscribe`
    pub async fn subscribe_to_shared_bot(&self, subscription: &SubscriptionRequest) -> Result<Value> {
        self.post_json(&[SHARED, "subscribe"], subscription).await
    }

    /// `DELETE /shared-bots/unsubscribe/{id}`
    pub async fn unsubscribe_from_shared_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.delete(&[SHARED, "unsubscribe", bot_id.as_str()]).await
    }

    /// `GET /shared-bots/my-subscriptions`
    pub async fn get_my_shared_bot_subscriptions(&self) -> Result<Value> {
        self.get(&[SHARED, "my-subscriptions"]).await
    }

    /// `GET /shared-bots/{id}/performance`
    pub async fn get_shared_bot_performance(&self, bot_id: &BotId) -> Result<Value> {
        self.get(&[SHARED, bot_id.as_str(), "performance"]).await
    }
}
