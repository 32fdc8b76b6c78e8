//! HTTP implementation of [`Directory`] against the PeeringDB REST API.
//!
//! Requests are blocking and issued one at a time. No retries and no caching:
//! every call is a fresh round trip.

use super::query::{Directory, Entity, Filter};
use crate::config::{Credentials, Settings};
use crate::error::{PdbError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Longest slice of an unparseable error body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// API response envelope: `{"meta": {...}, "data": [...]}`.
#[derive(Deserialize, Debug, Default)]
struct Envelope {
    #[serde(default)]
    data: Vec<Value>,
    #[serde(default)]
    meta: Meta,
}

#[derive(Deserialize, Debug, Default)]
struct Meta {
    #[serde(default)]
    error: Option<String>,
}

pub struct PeeringDbClient {
    client: Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl PeeringDbClient {
    pub fn new(settings: &Settings) -> Result<PeeringDbClient> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("pdb-intersect/", env!("CARGO_PKG_VERSION")))
            .build()?;
        if settings.credentials.is_none() {
            log::warn!("No directory credentials, results may be incomplete");
        }
        Ok(PeeringDbClient {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials: settings.credentials.clone(),
        })
    }

    fn entity_url(&self, entity: Entity) -> String {
        format!("{}/{}", self.base_url, entity)
    }
}

impl Directory for PeeringDbClient {
    fn fetch(&self, entity: Entity, filter: &Filter) -> Result<Vec<Value>> {
        let url = self.entity_url(entity);
        log::debug!("GET {url}?{filter}");

        let mut request = self.client.get(&url).query(&filter.query_pairs());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.password));
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            log::warn!("GET {url}?{filter} failed with {status}");
            return Err(PdbError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let envelope = decode_envelope(entity, &body)?;
        log::debug!("got {} {entity} record(s)", envelope.data.len());
        Ok(envelope.data)
    }
}

fn decode_envelope(entity: Entity, body: &str) -> Result<Envelope> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::trace!("BODY START:\n\n{body}\n\nBODY END\n");
        PdbError::Decode {
            entity: entity.to_string(),
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

/// Best effort error text from a failed response body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Envelope>(body) {
        Ok(Envelope {
            meta: Meta { error: Some(msg) },
            ..
        }) => msg,
        _ => body.chars().take(MAX_ERROR_BODY).collect(),
    }
}
