use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

use outreach::config::ConfigArgs;
use outreach::{
    CampaignForm, CampaignId, CampaignManager, CampaignStore, Config, DraftField, Error,
    HttpGateway, MessageGenerator, MessageProfile, Notice, NoticeLevel, Notifier,
};

#[derive(Debug, Parser)]
#[command(name = "outreach", version, about = "Manage outreach campaigns")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    config: ConfigArgs,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List campaigns with their editable lead and account lists
    List,
    /// Create an active campaign
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Comma separated lead ids
        #[arg(long)]
        leads: String,
    },
    /// Delete a campaign
    Delete { id: CampaignId },
    /// Switch a campaign between ACTIVE and INACTIVE
    Toggle { id: CampaignId },
    /// Replace a campaign's leads and/or account ids
    Update {
        id: CampaignId,
        /// Comma separated lead ids
        #[arg(long)]
        leads: Option<String>,
        /// Comma separated account ids
        #[arg(long)]
        account_ids: Option<String>,
    },
    /// Generate a personalized outreach message
    Generate {
        #[arg(long, default_value = "")]
        linkedin_url: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        job_title: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long, default_value = "")]
        summary: String,
    },
}

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => println!("{}", notice.message),
            NoticeLevel::Error => eprintln!("error: {}", notice.message),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_span_events(FmtSpan::NEW)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = Config::from(cli.config);
    info!("using campaign api: {}", config.base_url);
    let notifier = ConsoleNotifier;
    let db = match HttpGateway::new(&config) {
        Ok(db) => db,
        Err(err) => {
            notifier.notify(Notice::from(&err));
            return ExitCode::FAILURE;
        }
    };
    let store = CampaignStore::new(config.draft_policy);
    let manager = CampaignManager::new(&db, &store, &notifier);
    let generator = MessageGenerator::new(&db, &notifier);

    // failures were already reported through the notifier
    match run(cli.command, &manager, &generator).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

async fn run(
    command: Command,
    manager: &CampaignManager<'_>,
    generator: &MessageGenerator<'_>,
) -> Result<(), Error> {
    match command {
        Command::List => {
            manager.refresh().await?;
        }
        Command::Create {
            name,
            description,
            leads,
        } => {
            let mut form = CampaignForm {
                name,
                description,
                leads,
            };
            manager.create_campaign(&mut form).await?;
        }
        Command::Delete { id } => {
            manager.refresh().await?;
            manager.delete_campaign(&id).await?;
        }
        Command::Toggle { id } => {
            manager.refresh().await?;
            manager.toggle_loaded_status(&id).await?;
        }
        Command::Update {
            id,
            leads,
            account_ids,
        } => {
            manager.refresh().await?;
            if let Some(leads) = leads {
                manager.edit_draft(&id, DraftField::Leads, leads)?;
            }
            if let Some(account_ids) = account_ids {
                manager.edit_draft(&id, DraftField::AccountIds, account_ids)?;
            }
            manager.update_campaign(&id).await?;
        }
        Command::Generate {
            linkedin_url,
            name,
            job_title,
            company,
            location,
            summary,
        } => {
            let mut profile = MessageProfile {
                linkedin_url,
                name,
                job_title,
                company,
                location,
                summary,
            };
            generator.generate(&mut profile).await?;
            println!("{:#?}", profile);
            return Ok(());
        }
    }

    print_campaigns(manager.store());

    Ok(())
}

fn print_campaigns(store: &CampaignStore) {
    let drafts = store.drafts();
    for campaign in store.campaigns() {
        println!("{}  {}  [{}]", campaign.id, campaign.name, campaign.status);
        if !campaign.description.is_empty() {
            println!("    {}", campaign.description);
        }
        if let Some(draft) = drafts.get(&campaign.id) {
            println!("    leads:    {}", draft.leads_text);
            println!("    accounts: {}", draft.account_ids_text);
        }
    }
}
