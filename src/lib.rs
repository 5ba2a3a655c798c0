//! Client-side engine for managing outreach campaigns and requesting
//! personalized outreach messages from a remote API.

pub mod busy;
pub mod campaign;
pub mod config;
pub mod error;
pub mod gateway;
pub mod message;
pub mod normalize;
pub mod notify;
pub mod typedid;

pub use campaign::{
    Campaign, CampaignForm, CampaignId, CampaignManager, CampaignStatus, CampaignStore, Draft,
    DraftField, DraftPolicy,
};
pub use config::Config;
pub use error::{Error, ErrorKind};
pub use gateway::{Gateway, HttpGateway};
pub use message::{MessageGenerator, MessageProfile, ProfileField};
pub use notify::{Notice, NoticeLevel, Notifier};
