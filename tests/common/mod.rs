#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};

use outreach::{Notice, Notifier};

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// In-process stand-in for the campaign API.
#[derive(Default)]
pub struct FakeApi {
    campaigns: Mutex<Vec<Value>>,
    requests: Mutex<Vec<Recorded>>,
    fail_with: Mutex<Option<u16>>,
    delay: Mutex<Option<Duration>>,
    next_id: Mutex<u32>,
}

impl FakeApi {
    pub fn with_campaigns(campaigns: Vec<Value>) -> Arc<FakeApi> {
        let api = FakeApi::default();
        *api.campaigns.lock().unwrap() = campaigns;
        Arc::new(api)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }

    pub fn stored(&self, id: &str) -> Option<Value> {
        self.campaigns
            .lock()
            .unwrap()
            .iter()
            .find(|campaign| campaign["_id"] == id)
            .cloned()
    }

    pub fn fail_with(&self, status: u16) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    fn record(&self, method: &'static str, path: String, body: Value) {
        self.requests
            .lock()
            .unwrap()
            .push(Recorded { method, path, body });
    }

    async fn gate(&self) -> Option<HttpResponse> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            actix_web::rt::time::sleep(delay).await;
        }

        let fail_with = *self.fail_with.lock().unwrap();
        fail_with.map(|status| {
            HttpResponse::build(StatusCode::from_u16(status).unwrap()).body("boom")
        })
    }
}

pub fn campaign_json(id: &str, status: &str, leads: &[&str], account_ids: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": format!("Campaign {}", id),
        "description": "seeded",
        "status": status,
        "leads": leads,
        "accountIDs": account_ids,
    })
}

async fn list_campaigns(api: web::Data<FakeApi>) -> HttpResponse {
    api.record("GET", "/campaigns".into(), Value::Null);
    if let Some(response) = api.gate().await {
        return response;
    }

    let visible: Vec<Value> = api
        .campaigns
        .lock()
        .unwrap()
        .iter()
        .filter(|campaign| campaign["status"] != "DELETED")
        .cloned()
        .collect();
    HttpResponse::Ok().json(visible)
}

async fn create_campaign(api: web::Data<FakeApi>, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    api.record("POST", "/campaigns".into(), body.clone());
    if let Some(response) = api.gate().await {
        return response;
    }

    let mut campaign = body;
    let id = {
        let mut next_id = api.next_id.lock().unwrap();
        *next_id += 1;
        format!("new-{}", next_id)
    };
    campaign["_id"] = Value::String(id);
    api.campaigns.lock().unwrap().push(campaign.clone());
    HttpResponse::Created().json(campaign)
}

async fn update_campaign(
    api: web::Data<FakeApi>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    let id = path.into_inner();
    let body = body.into_inner();
    api.record("PUT", format!("/campaigns/{}", id), body.clone());
    if let Some(response) = api.gate().await {
        return response;
    }

    let mut campaigns = api.campaigns.lock().unwrap();
    match campaigns.iter_mut().find(|campaign| campaign["_id"] == id.as_str()) {
        Some(campaign) => {
            if let (Some(target), Some(patch)) = (campaign.as_object_mut(), body.as_object()) {
                for (key, value) in patch {
                    target.insert(key.clone(), value.clone());
                }
            }
            HttpResponse::Ok().finish()
        }
        None => HttpResponse::NotFound().body("campaign not found"),
    }
}

async fn delete_campaign(api: web::Data<FakeApi>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    api.record("DELETE", format!("/campaigns/{}", id), Value::Null);
    if let Some(response) = api.gate().await {
        return response;
    }

    let mut campaigns = api.campaigns.lock().unwrap();
    match campaigns.iter_mut().find(|campaign| campaign["_id"] == id.as_str()) {
        Some(campaign) => {
            campaign["status"] = Value::String("DELETED".into());
            HttpResponse::Ok().finish()
        }
        None => HttpResponse::NotFound().body("campaign not found"),
    }
}

async fn personalized_message(api: web::Data<FakeApi>, body: web::Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    api.record("POST", "/messages/personalized-message".into(), body.clone());
    if let Some(response) = api.gate().await {
        return response;
    }

    let name = body["name"].as_str().unwrap_or("Ada Lovelace").to_owned();
    HttpResponse::Ok().json(json!({
        "name": name,
        "job_title": "Analyst",
        "company": "Analytical Engines",
        "location": null,
        "summary": "Writes programs for engines",
        "message": format!("Hi {}, loved your notes.", name),
    }))
}

/// Serves `api` on an ephemeral port and returns its base URL.
pub fn start(api: Arc<FakeApi>) -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let _ = actix_web::rt::System::new().block_on(async move {
            let data = web::Data::from(api);
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(data.clone())
                    .route("/campaigns", web::get().to(list_campaigns))
                    .route("/campaigns", web::post().to(create_campaign))
                    .route("/campaigns/{id}", web::put().to(update_campaign))
                    .route("/campaigns/{id}", web::delete().to(delete_campaign))
                    .route(
                        "/messages/personalized-message",
                        web::post().to(personalized_message),
                    )
            })
            .workers(1)
            .bind(("127.0.0.1", 0))?;

            tx.send(server.addrs()[0]).unwrap();
            server.run().await
        });
    });

    let addr = rx.recv().unwrap();
    format!("http://{}/", addr)
}

#[derive(Default)]
pub struct Recorder {
    notices: Mutex<Vec<Notice>>,
}

impl Recorder {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
