use std::sync::Arc;

use tracing::debug;

use super::unwrap_nested;
use crate::api::{ApiClient, ApiError, RequestOptions};
use crate::models::Campaign;
use crate::notify::{messages, Notifier};

const CAMPAIGNS_PATH: &str = "/campaigns";

/// Listing filters for campaigns. Unset fields are not sent.
#[derive(Debug, Clone, Default)]
pub struct CampaignQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl CampaignQuery {
    fn into_options(self) -> RequestOptions {
        let mut options = RequestOptions::get();
        if let Some(status) = self.status {
            options = options.query("status", status);
        }
        if let Some(page) = self.page {
            options = options.query("page", page);
        }
        if let Some(limit) = self.limit {
            options = options.query("limit", limit);
        }
        options
    }
}

#[derive(Clone)]
pub struct CampaignService {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

impl CampaignService {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn list_campaigns(&self, query: CampaignQuery) -> Result<Vec<Campaign>, ApiError> {
        let envelope = self.api.request(CAMPAIGNS_PATH, query.into_options()).await;
        let campaigns: Vec<Campaign> =
            unwrap_nested(envelope, self.notifier.as_ref(), messages::CAMPAIGNS_FETCH_FAILED)?;
        debug!(count = campaigns.len(), "Fetched campaigns");
        Ok(campaigns)
    }

    pub async fn get_campaign(&self, id: i64) -> Result<Campaign, ApiError> {
        let envelope = self.api.get(&format!("{}/{}", CAMPAIGNS_PATH, id)).await;
        unwrap_nested(envelope, self.notifier.as_ref(), messages::CAMPAIGN_FETCH_FAILED)
    }
}
