use std::fmt::{Debug, Display};

use derivative::Derivative;

use crate::campaign::CampaignId;

#[derive(Debug, Derivative)]
#[derivative(PartialEq)]
pub enum Error {
    // validation
    MissingField {
        field: &'static str,
    },
    InsufficientProfile,
    CampaignNotFound {
        campaign_id: CampaignId,
    },
    CampaignIsDeleted {
        campaign_id: CampaignId,
    },
    OperationInProgress,
    InvalidBaseUrl {
        url: String,
    },

    // network
    RequestTimedOut,
    FailedRequest(#[derivative(PartialEq = "ignore")] reqwest::Error),

    // server
    ServerRejected {
        status: u16,
        body: String,
    },
    InvalidResponse(#[derivative(PartialEq = "ignore")] reqwest::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Server,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingField { .. } => ErrorKind::Validation,
            Error::InsufficientProfile => ErrorKind::Validation,
            Error::CampaignNotFound { .. } => ErrorKind::Validation,
            Error::CampaignIsDeleted { .. } => ErrorKind::Validation,
            Error::OperationInProgress => ErrorKind::Validation,
            Error::InvalidBaseUrl { .. } => ErrorKind::Validation,
            Error::RequestTimedOut => ErrorKind::Network,
            Error::FailedRequest(_) => ErrorKind::Network,
            Error::ServerRejected { .. } => ErrorKind::Server,
            Error::InvalidResponse(_) => ErrorKind::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MissingField { .. } => "E4001000",
            Error::InsufficientProfile => "E4001001",
            Error::CampaignNotFound { .. } => "E4041000",
            Error::CampaignIsDeleted { .. } => "E4091000",
            Error::OperationInProgress => "E4091001",
            Error::InvalidBaseUrl { .. } => "E4001002",
            Error::RequestTimedOut => "E5041000",
            Error::FailedRequest(_) => "E5031000",
            Error::ServerRejected { .. } => "E5021000",
            Error::InvalidResponse(_) => "E5021001",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::MissingField { .. } => "A required field was left empty",
            Error::InsufficientProfile => {
                "Please provide a LinkedIn URL or fill in at least one field."
            }
            Error::CampaignNotFound { .. } => "The requested campaign is not loaded",
            Error::CampaignIsDeleted { .. } => {
                "The requested campaign is deleted and its status cannot change"
            }
            Error::OperationInProgress => "Another request is already in progress",
            Error::InvalidBaseUrl { .. } => "The configured API base URL is not usable",
            Error::RequestTimedOut => "The server did not respond in time",
            Error::FailedRequest(_) => "The server could not be reached",
            Error::ServerRejected { .. } => "The server rejected the request",
            Error::InvalidResponse(_) => "The server sent a response that could not be read",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{} ({})", self.error_message(), self.error_code())?;
        match self {
            Error::MissingField { field } => write!(f, ": {}", field),
            Error::InvalidBaseUrl { url } => write!(f, ": {}", url),
            Error::CampaignNotFound { campaign_id } | Error::CampaignIsDeleted { campaign_id } => {
                write!(f, ": {}", campaign_id)
            }
            Error::ServerRejected { status, body } if body.is_empty() => {
                write!(f, ": status {}", status)
            }
            Error::ServerRejected { status, body } => write!(f, ": status {}: {}", status, body),
            Error::FailedRequest(err) | Error::InvalidResponse(err) => write!(f, ": {}", err),
            _ => Ok(()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::RequestTimedOut
        } else if error.is_decode() {
            Error::InvalidResponse(error)
        } else {
            Error::FailedRequest(error)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FailedRequest(err) => Some(err),
            Error::InvalidResponse(err) => Some(err),
            _ => None,
        }
    }
}
