//! Ad moderation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::ApiClient;
use crate::prelude::*;

pub const AD_STATUS_ENDPOINT: &str = "api/v1/ads/update/status";

/// Moderation state of an ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Pending,
    Active,
    Inactive,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdStatusUpdate {
    pub status: AdStatus,
}

impl ApiClient {
    /// Sets the status of ad `id`, returning the API's answer unchanged.
    pub async fn update_ad_status(&self, id: &str, status: AdStatus) -> Result<Value> {
        info!("Updating ad {id} status to {status:?}");
        let request = self
            .client
            .put(self.path(&format!("{AD_STATUS_ENDPOINT}/{id}")))
            .json(&AdStatusUpdate { status });
        self.send(request).await
    }
}
