use std::time::Duration;

use clap::Args;

use crate::campaign::DraftPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub draft_policy: DraftPolicy,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            draft_policy: DraftPolicy::default(),
        }
    }
}

impl Config {
    pub fn with_base_url(base_url: impl Into<String>) -> Config {
        Config {
            base_url: base_url.into(),
            ..Config::default()
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ConfigArgs {
    /// Base URL of the campaign API
    #[arg(long, global = true, env = "OUTREACH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[arg(
        long,
        global = true,
        env = "OUTREACH_TIMEOUT_MS",
        default_value_t = DEFAULT_TIMEOUT_MS
    )]
    pub timeout_ms: u64,

    /// Keep edited drafts across refreshes instead of resetting them
    #[arg(long, global = true)]
    pub keep_drafts: bool,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Config {
        Config {
            base_url: args.base_url,
            timeout: Duration::from_millis(args.timeout_ms.max(1)),
            draft_policy: if args.keep_drafts {
                DraftPolicy::Preserve
            } else {
                DraftPolicy::Discard
            },
        }
    }
}
