use serde::{Deserialize, Serialize};

use crate::normalize::SparsePayload;

pub mod gateway;
pub mod manager;

pub use manager::{apply_response, build_request, MessageGenerator};

pub type MessageRequest = SparsePayload<ProfileField>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    LinkedinUrl,
    Name,
    JobTitle,
    Company,
    Location,
    Summary,
}

impl ProfileField {
    pub const ALL: [ProfileField; 6] = [
        ProfileField::LinkedinUrl,
        ProfileField::Name,
        ProfileField::JobTitle,
        ProfileField::Company,
        ProfileField::Location,
        ProfileField::Summary,
    ];
}

/// Profile lookup form. An empty string means the field was not supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageProfile {
    pub linkedin_url: String,
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub summary: String,
}

impl MessageProfile {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::LinkedinUrl => &self.linkedin_url,
            ProfileField::Name => &self.name,
            ProfileField::JobTitle => &self.job_title,
            ProfileField::Company => &self.company,
            ProfileField::Location => &self.location,
            ProfileField::Summary => &self.summary,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PersonalizedMessage {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub message: String,
}
