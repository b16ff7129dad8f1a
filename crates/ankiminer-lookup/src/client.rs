use ankiminer_types::SentencesResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{EnglishDefinitions, JapaneseDefinition, LookupClient, LookupError};

/// HTTP client for the jisho, goo and corpus services
#[derive(Clone)]
pub struct HttpLookupClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLookupClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `<base>/<service>/<percent-encoded word>`
    pub fn service_url(&self, service: &str, word: &str) -> String {
        format!("{}/{}/{}", self.base_url, service, urlencoding::encode(word))
    }

    async fn get<T: DeserializeOwned>(&self, service: &str, word: &str) -> Result<T, LookupError> {
        let url = self.service_url(service, word);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        check_status(response.status(), url)?;

        let body = response.text().await?;
        decode(&body)
    }
}

fn check_status(status: reqwest::StatusCode, url: String) -> Result<(), LookupError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(LookupError::Status {
            status: status.as_u16(),
            url,
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, LookupError> {
    Ok(serde_json::from_str(body)?)
}

#[async_trait]
impl LookupClient for HttpLookupClient {
    async fn english_definition(&self, word: &str) -> Result<EnglishDefinitions, LookupError> {
        self.get("jisho", word).await
    }

    async fn japanese_definition(&self, word: &str) -> Result<JapaneseDefinition, LookupError> {
        self.get("goo", word).await
    }

    async fn example_sentences(&self, word: &str) -> Result<SentencesResult, LookupError> {
        self.get("corpus", word).await
    }
}
