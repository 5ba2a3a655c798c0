use async_trait::async_trait;
use reqwest::Method;

use crate::error::Error;
use crate::gateway::HttpClient;

use super::{MessageRequest, PersonalizedMessage};

const PERSONALIZED_MESSAGE: [&str; 2] = ["messages", "personalized-message"];

#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn generate_message(&self, request: &MessageRequest)
        -> Result<PersonalizedMessage, Error>;
}

#[derive(Clone, Debug)]
pub struct HttpMessageGateway {
    http: HttpClient,
}

impl HttpMessageGateway {
    pub fn new(http: HttpClient) -> HttpMessageGateway {
        HttpMessageGateway { http }
    }
}

#[async_trait]
impl MessageGateway for HttpMessageGateway {
    #[tracing::instrument(skip(self))]
    async fn generate_message(
        &self,
        request: &MessageRequest,
    ) -> Result<PersonalizedMessage, Error> {
        let builder = self
            .http
            .request(Method::POST, &PERSONALIZED_MESSAGE)
            .json(request);
        let message: PersonalizedMessage = self.http.send(builder).await?.json().await?;

        Ok(message)
    }
}
