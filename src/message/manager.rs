use tracing::{info, warn};

use crate::busy::BusyFlag;
use crate::error::{Error, ErrorKind};
use crate::gateway::Gateway;
use crate::normalize::build_sparse_payload;
use crate::notify::{Notice, Notifier};

use super::{MessageProfile, MessageRequest, PersonalizedMessage, ProfileField};

const GENERATION_FAILED: &str = "Something went wrong. Please check your input and try again.";

pub fn build_request(profile: &MessageProfile) -> Result<MessageRequest, Error> {
    let request = build_sparse_payload(
        ProfileField::ALL
            .iter()
            .map(|&field| (field, profile.field(field))),
    );
    if request.is_empty() {
        return Err(Error::InsufficientProfile);
    }

    Ok(request)
}

/// Replaces the profile with what the server resolved, keeping the LinkedIn
/// URL the user looked up.
pub fn apply_response(profile: &MessageProfile, response: &PersonalizedMessage) -> MessageProfile {
    let resolved = |value: &Option<String>| value.clone().unwrap_or_default();

    MessageProfile {
        linkedin_url: profile.linkedin_url.clone(),
        name: resolved(&response.name),
        job_title: resolved(&response.job_title),
        company: resolved(&response.company),
        location: resolved(&response.location),
        summary: resolved(&response.summary),
    }
}

pub struct MessageGenerator<'a> {
    db: &'a dyn Gateway,
    notifier: &'a dyn Notifier,
    loading: BusyFlag,
}

impl<'a> MessageGenerator<'a> {
    pub fn new(db: &'a dyn Gateway, notifier: &'a dyn Notifier) -> MessageGenerator<'a> {
        MessageGenerator {
            db,
            notifier,
            loading: BusyFlag::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    #[tracing::instrument(skip(self, profile))]
    pub async fn generate(&self, profile: &mut MessageProfile) -> Result<String, Error> {
        let request = build_request(profile).map_err(|err| self.fail(err))?;
        let _loading = self.loading.acquire().map_err(|err| self.fail(err))?;

        let response = self
            .db
            .messages()
            .generate_message(&request)
            .await
            .map_err(|err| self.fail(err))?;

        *profile = apply_response(profile, &response);
        info!(fields = request.len(), "generated personalized message");
        self.notifier.notify(Notice::success(response.message.clone()));

        Ok(response.message)
    }

    fn fail(&self, error: Error) -> Error {
        warn!(%error, "message generation failed");
        let notice = match error.kind() {
            ErrorKind::Validation => Notice::from(&error),
            ErrorKind::Network | ErrorKind::Server => Notice::error(GENERATION_FAILED),
        };
        self.notifier.notify(notice);
        error
    }
}
