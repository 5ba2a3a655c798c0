use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::normalize::format_list;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod gateway;
pub mod manager;
pub mod store;

pub use manager::{CampaignForm, CampaignManager};
pub use store::{CampaignStore, DraftPolicy};

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: CampaignId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: CampaignStatus,
    #[serde(default)]
    pub leads: Vec<String>,
    #[serde(default, rename = "accountIDs")]
    pub account_ids: Vec<String>,
}

impl Campaign {
    pub fn list(&self, field: DraftField) -> &[String] {
        match field {
            DraftField::Leads => &self.leads,
            DraftField::AccountIds => &self.account_ids,
        }
    }
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Active,
    Inactive,
    Deleted,
}

impl CampaignStatus {
    /// The status a toggle switches to. Deleted is terminal and has none.
    pub fn toggled(self) -> Option<CampaignStatus> {
        match self {
            CampaignStatus::Active => Some(CampaignStatus::Inactive),
            CampaignStatus::Inactive => Some(CampaignStatus::Active),
            CampaignStatus::Deleted => None,
        }
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CampaignStatus::Active => "ACTIVE",
            CampaignStatus::Inactive => "INACTIVE",
            CampaignStatus::Deleted => "DELETED",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub status: CampaignStatus,
    pub leads: Vec<String>,
    #[serde(rename = "accountIDs")]
    pub account_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leads: Option<Vec<String>>,
    #[serde(rename = "accountIDs", skip_serializing_if = "Option::is_none")]
    pub account_ids: Option<Vec<String>>,
}

impl CampaignPatch {
    pub fn status(status: CampaignStatus) -> CampaignPatch {
        CampaignPatch {
            status: Some(status),
            ..CampaignPatch::default()
        }
    }

    pub fn lists(leads: Vec<String>, account_ids: Vec<String>) -> CampaignPatch {
        CampaignPatch {
            leads: Some(leads),
            account_ids: Some(account_ids),
            ..CampaignPatch::default()
        }
    }
}

/// Editable text mirror of a campaign's list fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub leads_text: String,
    pub account_ids_text: String,
}

impl Draft {
    pub fn from_campaign(campaign: &Campaign) -> Draft {
        Draft {
            leads_text: format_list(&campaign.leads),
            account_ids_text: format_list(&campaign.account_ids),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Leads => &self.leads_text,
            DraftField::AccountIds => &self.account_ids_text,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Leads => &mut self.leads_text,
            DraftField::AccountIds => &mut self.account_ids_text,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DraftField {
    Leads,
    AccountIds,
}

impl DraftField {
    pub const ALL: [DraftField; 2] = [DraftField::Leads, DraftField::AccountIds];
}
