use reqwest::{Client, Method, RequestBuilder, Response, Url};

use crate::campaign::gateway::{CampaignGateway, HttpCampaignGateway};
use crate::config::Config;
use crate::error::Error;
use crate::message::gateway::{HttpMessageGateway, MessageGateway};

pub trait Gateway: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignGateway;
    fn messages(&self) -> &dyn MessageGateway;
}

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<HttpClient, Error> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| Error::InvalidBaseUrl {
                url: config.base_url.clone(),
            })?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(HttpClient { client, base_url })
    }

    // Each segment is percent-encoded, so ids never change the shape of the path.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServerRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

#[derive(Clone, Debug)]
pub struct HttpGateway {
    campaigns: HttpCampaignGateway,
    messages: HttpMessageGateway,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<HttpGateway, Error> {
        let http = HttpClient::new(config)?;

        Ok(HttpGateway {
            campaigns: HttpCampaignGateway::new(http.clone()),
            messages: HttpMessageGateway::new(http),
        })
    }
}

impl Gateway for HttpGateway {
    fn campaigns(&self) -> &dyn CampaignGateway {
        &self.campaigns
    }

    fn messages(&self) -> &dyn MessageGateway {
        &self.messages
    }
}
