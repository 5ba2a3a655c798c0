use tracing::{info, warn};

use crate::busy::{BusyFlag, InFlight};
use crate::error::Error;
use crate::gateway::Gateway;
use crate::normalize::parse_list;
use crate::notify::{Notice, Notifier};

use super::{
    Campaign, CampaignId, CampaignPatch, CampaignStatus, CampaignStore, DraftField, NewCampaign,
};

/// Creation form as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignForm {
    pub name: String,
    pub description: String,
    pub leads: String,
}

impl CampaignForm {
    pub fn clear(&mut self) {
        *self = CampaignForm::default();
    }

    fn validate(&self) -> Result<NewCampaign, Error> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::MissingField { field: "name" });
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(Error::MissingField {
                field: "description",
            });
        }

        let leads = parse_list(&self.leads);
        if leads.is_empty() {
            return Err(Error::MissingField { field: "leads" });
        }

        Ok(NewCampaign {
            name: name.to_owned(),
            description: description.to_owned(),
            status: CampaignStatus::Active,
            leads,
            account_ids: vec![],
        })
    }
}

/// Runs campaign mutations against the gateway and re-syncs the store after
/// each one. Local state is never patched directly.
pub struct CampaignManager<'a> {
    db: &'a dyn Gateway,
    store: &'a CampaignStore,
    notifier: &'a dyn Notifier,
    creating: BusyFlag,
    in_flight: InFlight<CampaignId>,
}

impl<'a> CampaignManager<'a> {
    pub fn new(
        db: &'a dyn Gateway,
        store: &'a CampaignStore,
        notifier: &'a dyn Notifier,
    ) -> CampaignManager<'a> {
        CampaignManager {
            db,
            store,
            notifier,
            creating: BusyFlag::default(),
            in_flight: InFlight::default(),
        }
    }

    pub fn store(&self) -> &CampaignStore {
        self.store
    }

    pub fn is_creating(&self) -> bool {
        self.creating.is_busy()
    }

    pub fn is_pending(&self, campaign_id: &CampaignId) -> bool {
        self.in_flight.contains(campaign_id)
    }

    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), Error> {
        self.store.refresh(self.db).await.map_err(|err| self.fail(err))
    }

    #[tracing::instrument(skip(self, form))]
    pub async fn create_campaign(&self, form: &mut CampaignForm) -> Result<Campaign, Error> {
        let _busy = self.creating.acquire().map_err(|err| self.fail(err))?;
        let new_campaign = form.validate().map_err(|err| self.fail(err))?;

        let campaign = self
            .db
            .campaigns()
            .create_campaign(&new_campaign)
            .await
            .map_err(|err| self.fail(err))?;

        form.clear();
        info!(campaign_id = %campaign.id, "created campaign");
        self.notifier
            .notify(Notice::success(format!("Created campaign {}", campaign.name)));
        self.reconcile().await;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_campaign(&self, campaign_id: &CampaignId) -> Result<(), Error> {
        let _pending = self
            .in_flight
            .acquire(campaign_id)
            .map_err(|err| self.fail(err))?;

        self.db
            .campaigns()
            .delete_campaign(campaign_id)
            .await
            .map_err(|err| self.fail(err))?;

        info!(%campaign_id, "deleted campaign");
        self.notifier.notify(Notice::success("Deleted campaign"));
        self.reconcile().await;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_status(
        &self,
        campaign_id: &CampaignId,
        current_status: CampaignStatus,
    ) -> Result<CampaignStatus, Error> {
        let new_status = current_status
            .toggled()
            .ok_or_else(|| Error::CampaignIsDeleted {
                campaign_id: campaign_id.clone(),
            })
            .map_err(|err| self.fail(err))?;
        let _pending = self
            .in_flight
            .acquire(campaign_id)
            .map_err(|err| self.fail(err))?;

        self.db
            .campaigns()
            .update_campaign(campaign_id, &CampaignPatch::status(new_status))
            .await
            .map_err(|err| self.fail(err))?;

        info!(%campaign_id, %new_status, "changed campaign status");
        self.notifier
            .notify(Notice::success(format!("Campaign is now {}", new_status)));
        self.reconcile().await;

        Ok(new_status)
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_loaded_status(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<CampaignStatus, Error> {
        let campaign = self
            .store
            .campaign(campaign_id)
            .ok_or_else(|| Error::CampaignNotFound {
                campaign_id: campaign_id.clone(),
            })
            .map_err(|err| self.fail(err))?;

        self.toggle_status(campaign_id, campaign.status).await
    }

    pub fn edit_draft(
        &self,
        campaign_id: &CampaignId,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        self.store
            .set_draft_field(campaign_id, field, value)
            .map_err(|err| self.fail(err))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_campaign(&self, campaign_id: &CampaignId) -> Result<(), Error> {
        let draft = self
            .store
            .draft(campaign_id)
            .ok_or_else(|| Error::CampaignNotFound {
                campaign_id: campaign_id.clone(),
            })
            .map_err(|err| self.fail(err))?;
        let _pending = self
            .in_flight
            .acquire(campaign_id)
            .map_err(|err| self.fail(err))?;

        let patch = CampaignPatch::lists(
            parse_list(&draft.leads_text),
            parse_list(&draft.account_ids_text),
        );
        self.db
            .campaigns()
            .update_campaign(campaign_id, &patch)
            .await
            .map_err(|err| self.fail(err))?;

        info!(%campaign_id, "updated campaign lists");
        self.notifier.notify(Notice::success("Updated campaign"));
        self.reconcile().await;

        Ok(())
    }

    // The mutation already succeeded, so a failed re-sync is only reported.
    async fn reconcile(&self) {
        if let Err(error) = self.store.refresh(self.db).await {
            warn!(%error, "failed to refresh campaigns after mutation");
            self.notifier.notify(Notice::error(format!(
                "The campaign list could not be refreshed: {}",
                error.error_message()
            )));
        }
    }

    fn fail(&self, error: Error) -> Error {
        warn!(%error, "campaign operation failed");
        self.notifier.notify(Notice::from(&error));
        error
    }
}
