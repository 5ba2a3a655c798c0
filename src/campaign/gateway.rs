use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use crate::error::Error;
use crate::gateway::HttpClient;

use super::{Campaign, CampaignId, CampaignPatch, NewCampaign};

const CAMPAIGNS: &str = "campaigns";

#[async_trait]
pub trait CampaignGateway: Send + Sync {
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, Error>;

    async fn update_campaign(
        &self,
        campaign_id: &CampaignId,
        patch: &CampaignPatch,
    ) -> Result<(), Error>;

    async fn delete_campaign(&self, campaign_id: &CampaignId) -> Result<(), Error>;
}

#[derive(Clone, Debug)]
pub struct HttpCampaignGateway {
    http: HttpClient,
}

impl HttpCampaignGateway {
    pub fn new(http: HttpClient) -> HttpCampaignGateway {
        HttpCampaignGateway { http }
    }
}

#[async_trait]
impl CampaignGateway for HttpCampaignGateway {
    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let request = self.http.request(Method::GET, &[CAMPAIGNS]);
        let campaigns: Vec<Campaign> = self.http.send(request).await?.json().await?;
        debug!(count = campaigns.len(), "fetched campaigns");

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign, Error> {
        let request = self.http.request(Method::POST, &[CAMPAIGNS]).json(campaign);
        let campaign: Campaign = self.http.send(request).await?.json().await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn update_campaign(
        &self,
        campaign_id: &CampaignId,
        patch: &CampaignPatch,
    ) -> Result<(), Error> {
        let request = self
            .http
            .request(Method::PUT, &[CAMPAIGNS, campaign_id.as_str()])
            .json(patch);
        self.http.send(request).await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_campaign(&self, campaign_id: &CampaignId) -> Result<(), Error> {
        let request = self
            .http
            .request(Method::DELETE, &[CAMPAIGNS, campaign_id.as_str()]);
        self.http.send(request).await?;

        Ok(())
    }
}
