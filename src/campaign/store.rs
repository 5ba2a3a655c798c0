use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::Error;
use crate::gateway::Gateway;
use crate::normalize::parse_list;

use super::{Campaign, CampaignId, CampaignStatus, Draft, DraftField};

/// What a refresh does with drafts the user has edited but not submitted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DraftPolicy {
    /// Every draft is re-rendered from the fetched campaign.
    #[default]
    Discard,
    /// Edited draft fields survive a refresh unless the server now holds the
    /// same list.
    Preserve,
}

#[derive(Debug, Default)]
struct StoreState {
    campaigns: Vec<Campaign>,
    drafts: HashMap<CampaignId, Draft>,
    applied: u64,
}

/// Server-fetched campaigns plus one editable draft per campaign.
///
/// Campaigns only change through [`CampaignStore::refresh`]; drafts change
/// through refresh and [`CampaignStore::set_draft_field`].
#[derive(Debug, Default)]
pub struct CampaignStore {
    policy: DraftPolicy,
    requested: AtomicU64,
    state: RwLock<StoreState>,
}

impl CampaignStore {
    pub fn new(policy: DraftPolicy) -> CampaignStore {
        CampaignStore {
            policy,
            ..CampaignStore::default()
        }
    }

    #[tracing::instrument(skip(self, db))]
    pub async fn refresh(&self, db: &dyn Gateway) -> Result<(), Error> {
        let ticket = self.requested.fetch_add(1, Ordering::SeqCst) + 1;
        let campaigns = db.campaigns().fetch_campaigns().await?;
        self.apply(ticket, campaigns);

        Ok(())
    }

    fn apply(&self, ticket: u64, fetched: Vec<Campaign>) -> bool {
        let mut state = self.write();
        if ticket < state.applied {
            debug!(ticket, applied = state.applied, "discarding stale campaign list");
            return false;
        }

        let campaigns: Vec<Campaign> = fetched
            .into_iter()
            .filter(|campaign| {
                if campaign.status == CampaignStatus::Deleted {
                    debug!(campaign_id = %campaign.id, "hiding deleted campaign");
                    return false;
                }
                true
            })
            .collect();

        let drafts = match self.policy {
            DraftPolicy::Discard => campaigns
                .iter()
                .map(|campaign| (campaign.id.clone(), Draft::from_campaign(campaign)))
                .collect(),
            DraftPolicy::Preserve => preserve_edits(&state, &campaigns),
        };

        info!(ticket, count = campaigns.len(), "applied campaign list");
        state.campaigns = campaigns;
        state.drafts = drafts;
        state.applied = ticket;

        true
    }

    pub fn campaigns(&self) -> Vec<Campaign> {
        self.read().campaigns.clone()
    }

    pub fn campaign(&self, campaign_id: &CampaignId) -> Option<Campaign> {
        self.read()
            .campaigns
            .iter()
            .find(|campaign| &campaign.id == campaign_id)
            .cloned()
    }

    pub fn draft(&self, campaign_id: &CampaignId) -> Option<Draft> {
        self.read().drafts.get(campaign_id).cloned()
    }

    pub fn drafts(&self) -> HashMap<CampaignId, Draft> {
        self.read().drafts.clone()
    }

    pub fn set_draft_field(
        &self,
        campaign_id: &CampaignId,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        let mut state = self.write();
        let draft = state
            .drafts
            .get_mut(campaign_id)
            .ok_or_else(|| Error::CampaignNotFound {
                campaign_id: campaign_id.clone(),
            })?;
        *draft.field_mut(field) = value.into();

        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// A field counts as edited when its text no longer matches what the previous
// campaign rendered to. Edits that already match the fetched list are dropped.
fn preserve_edits(previous: &StoreState, campaigns: &[Campaign]) -> HashMap<CampaignId, Draft> {
    let baselines: HashMap<&CampaignId, Draft> = previous
        .campaigns
        .iter()
        .map(|campaign| (&campaign.id, Draft::from_campaign(campaign)))
        .collect();

    campaigns
        .iter()
        .map(|campaign| {
            let mut draft = Draft::from_campaign(campaign);
            let edited = previous.drafts.get(&campaign.id);
            let baseline = baselines.get(&campaign.id);
            if let (Some(edited), Some(baseline)) = (edited, baseline) {
                for field in DraftField::ALL {
                    let text = edited.field(field);
                    if text != baseline.field(field) && parse_list(text) != campaign.list(field) {
                        *draft.field_mut(field) = text.to_owned();
                    }
                }
            }
            (campaign.id.clone(), draft)
        })
        .collect()
}
