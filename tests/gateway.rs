mod common;

use std::time::Duration;

use serde_json::json;

use common::{campaign_json, start, FakeApi};
use outreach::campaign::gateway::CampaignGateway;
use outreach::campaign::{CampaignPatch, NewCampaign};
use outreach::message::gateway::MessageGateway;
use outreach::message::MessageRequest;
use outreach::{CampaignId, CampaignStatus, Config, Error, ErrorKind, Gateway, HttpGateway, ProfileField};

fn gateway(base_url: String) -> HttpGateway {
    HttpGateway::new(&Config::with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn fetch_campaigns_reads_server_payload() {
    let api = FakeApi::with_campaigns(vec![
        campaign_json("c1", "ACTIVE", &["l1", "l2"], &["a1"]),
        campaign_json("c2", "INACTIVE", &[], &[]),
    ]);
    let db = gateway(start(api));

    let campaigns = db.campaigns().fetch_campaigns().await.unwrap();

    assert_eq!(campaigns.len(), 2);
    assert_eq!(campaigns[0].id.as_str(), "c1");
    assert_eq!(campaigns[0].leads, vec!["l1", "l2"]);
    assert_eq!(campaigns[0].account_ids, vec!["a1"]);
    assert_eq!(campaigns[1].status, CampaignStatus::Inactive);
}

#[tokio::test]
async fn create_posts_full_campaign_body() {
    let api = FakeApi::with_campaigns(vec![]);
    let db = gateway(start(api.clone()));

    let created = db
        .campaigns()
        .create_campaign(&NewCampaign {
            name: "Spring push".into(),
            description: "Q2".into(),
            status: CampaignStatus::Active,
            leads: vec!["l1".into()],
            account_ids: vec![],
        })
        .await
        .unwrap();

    assert_eq!(created.id.as_str(), "new-1");
    assert_eq!(created.name, "Spring push");
    let posted = api.requests_to("POST");
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].path, "/campaigns");
    assert_eq!(
        posted[0].body,
        json!({
            "name": "Spring push",
            "description": "Q2",
            "status": "ACTIVE",
            "leads": ["l1"],
            "accountIDs": []
        })
    );
}

#[tokio::test]
async fn update_sends_only_patched_fields() {
    let api = FakeApi::with_campaigns(vec![campaign_json("c1", "ACTIVE", &["l1"], &[])]);
    let db = gateway(start(api.clone()));
    let campaign_id: CampaignId = "c1".parse().unwrap();

    db.campaigns()
        .update_campaign(&campaign_id, &CampaignPatch::status(CampaignStatus::Inactive))
        .await
        .unwrap();

    let put = api.requests_to("PUT");
    assert_eq!(put[0].path, "/campaigns/c1");
    assert_eq!(put[0].body, json!({ "status": "INACTIVE" }));
    let stored = api.stored("c1").unwrap();
    assert_eq!(stored["status"], "INACTIVE");
    assert_eq!(stored["leads"], json!(["l1"]));
}

#[tokio::test]
async fn delete_targets_campaign_path() {
    let api = FakeApi::with_campaigns(vec![campaign_json("c1", "ACTIVE", &[], &[])]);
    let db = gateway(start(api.clone()));

    db.campaigns()
        .delete_campaign(&"c1".parse::<CampaignId>().unwrap())
        .await
        .unwrap();

    assert_eq!(api.requests_to("DELETE")[0].path, "/campaigns/c1");
    assert!(db.campaigns().fetch_campaigns().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_status_becomes_server_rejection() {
    let api = FakeApi::with_campaigns(vec![]);
    api.fail_with(500);
    let db = gateway(start(api));

    let result = db.campaigns().fetch_campaigns().await;

    assert_eq!(
        result.unwrap_err(),
        Error::ServerRejected {
            status: 500,
            body: "boom".into()
        }
    );
}

#[tokio::test]
async fn missing_campaign_is_a_server_rejection() {
    let api = FakeApi::with_campaigns(vec![]);
    let db = gateway(start(api));

    let result = db
        .campaigns()
        .delete_campaign(&"nope".parse::<CampaignId>().unwrap())
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Server);
    assert!(matches!(error, Error::ServerRejected { status: 404, .. }));
}

#[tokio::test]
async fn slow_server_times_out() {
    let api = FakeApi::with_campaigns(vec![]);
    api.delay(Duration::from_secs(3));
    let config = Config {
        timeout: Duration::from_millis(100),
        ..Config::with_base_url(start(api))
    };
    let db = HttpGateway::new(&config).unwrap();

    let result = db.campaigns().fetch_campaigns().await;

    assert_eq!(result.unwrap_err(), Error::RequestTimedOut);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let config = Config {
        timeout: Duration::from_millis(500),
        ..Config::with_base_url("http://127.0.0.1:1/")
    };
    let db = HttpGateway::new(&config).unwrap();

    let result = db.campaigns().fetch_campaigns().await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Network);
}

#[tokio::test]
async fn message_request_is_sparse() {
    let api = FakeApi::with_campaigns(vec![]);
    let db = gateway(start(api.clone()));
    let mut request = MessageRequest::new();
    request.insert(ProfileField::Name, "Grace".into());
    request.insert(ProfileField::Company, "Navy".into());

    let response = db.messages().generate_message(&request).await.unwrap();

    assert_eq!(response.name.as_deref(), Some("Grace"));
    assert_eq!(response.location, None);
    assert_eq!(response.message, "Hi Grace, loved your notes.");
    let posted = api.requests_to("POST");
    assert_eq!(posted[0].path, "/messages/personalized-message");
    assert_eq!(posted[0].body, json!({ "name": "Grace", "company": "Navy" }));
}

#[tokio::test]
async fn ids_with_reserved_characters_address_only_their_campaign() {
    let api = FakeApi::with_campaigns(vec![
        campaign_json("a", "ACTIVE", &[], &[]),
        campaign_json("a#b", "ACTIVE", &[], &[]),
        campaign_json("a b", "ACTIVE", &["l1"], &[]),
    ]);
    let db = gateway(start(api.clone()));

    db.campaigns()
        .delete_campaign(&"a#b".parse::<CampaignId>().unwrap())
        .await
        .unwrap();
    db.campaigns()
        .update_campaign(
            &"a b".parse::<CampaignId>().unwrap(),
            &CampaignPatch::status(CampaignStatus::Inactive),
        )
        .await
        .unwrap();

    assert_eq!(api.requests_to("DELETE")[0].path, "/campaigns/a#b");
    assert_eq!(api.requests_to("PUT")[0].path, "/campaigns/a b");
    assert_eq!(api.stored("a").unwrap()["status"], "ACTIVE");
    assert_eq!(api.stored("a#b").unwrap()["status"], "DELETED");
    assert_eq!(api.stored("a b").unwrap()["status"], "INACTIVE");
}

#[tokio::test]
async fn fetched_ids_are_kept_verbatim() {
    let api = FakeApi::with_campaigns(vec![
        campaign_json("ok", "ACTIVE", &[], &[]),
        campaign_json("x/y", "ACTIVE", &[], &[]),
        campaign_json(" padded", "INACTIVE", &[], &[]),
    ]);
    let db = gateway(start(api));

    let campaigns = db.campaigns().fetch_campaigns().await.unwrap();

    let ids: Vec<&str> = campaigns.iter().map(|campaign| campaign.id.as_str()).collect();
    assert_eq!(ids, vec!["ok", "x/y", " padded"]);
}
