//! Todoist Sync API client.
//!
//! Two read-only calls are used:
//!
//! - `POST {api_url}/sync` with `resource_types: ["projects"]` for projects
//! - `GET {api_url}/completed/get_all` for completed tasks
//!
//! Both authenticate with a bearer token. Only the first page of completed
//! tasks is requested.

use super::{RemoteProject, RemoteRecords, RemoteSource, RemoteTask};
use crate::libs::config::ConfigModule;
use crate::libs::error::{RecordKind, RecordValidationError, TransportError};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, RequestBuilder};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.todoist.com/sync/v9";
const SYNC_URL: &str = "sync";
const COMPLETED_URL: &str = "completed/get_all";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct Todoist {
    client: Client,
    config: TodoistConfig,
}

#[derive(Debug, Deserialize)]
struct ProjectRecord {
    #[serde(deserialize_with = "remote_id")]
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    #[serde(deserialize_with = "remote_id")]
    id: i64,
    content: String,
    #[serde(default, alias = "completed_at")]
    completed_date: Option<String>,
    #[serde(default, deserialize_with = "optional_remote_id")]
    project_id: Option<i64>,
}

impl From<ProjectRecord> for RemoteProject {
    fn from(record: ProjectRecord) -> Self {
        Self {
            remote_id: record.id,
            name: record.name,
        }
    }
}

impl From<TaskRecord> for RemoteTask {
    fn from(record: TaskRecord) -> Self {
        Self {
            remote_id: record.id,
            content: record.content,
            completed_at: record.completed_date,
            project_remote_id: record.project_id,
        }
    }
}

impl Todoist {
    pub fn new(config: &TodoistConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(TransportError::Client)?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Sends the request and returns the raw records stored under `field`.
    ///
    /// A missing field is treated as an empty list.
    async fn records(&self, request: RequestBuilder, endpoint: &str, field: &str) -> Result<Vec<Value>, TransportError> {
        let res = request
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let body = res.json::<Value>().await.map_err(|e| TransportError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let records = match body.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                return Err(TransportError::Decode {
                    endpoint: endpoint.to_string(),
                    reason: format!("field '{}' is not a list but {}", field, other),
                })
            }
        };

        msg_debug!(Message::RemoteRecordsFetched {
            endpoint: endpoint.to_string(),
            count: records.len(),
        });
        Ok(records)
    }
}

impl RemoteSource for Todoist {
    async fn try_fetch_projects(&self) -> Result<RemoteRecords<RemoteProject>, TransportError> {
        let request = self
            .client
            .post(self.url(SYNC_URL))
            .json(&json!({ "sync_token": "*", "resource_types": ["projects"] }));
        let records = self.records(request, SYNC_URL, "projects").await?;
        Ok(decode_records::<ProjectRecord, RemoteProject>(records, RecordKind::Project))
    }

    async fn try_fetch_completed_tasks(&self) -> Result<RemoteRecords<RemoteTask>, TransportError> {
        let request = self.client.get(self.url(COMPLETED_URL));
        let records = self.records(request, COMPLETED_URL, "items").await?;
        Ok(decode_records::<TaskRecord, RemoteTask>(records, RecordKind::Task))
    }
}

fn decode_records<W, T>(records: Vec<Value>, kind: RecordKind) -> RemoteRecords<T>
where
    W: DeserializeOwned + Into<T>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<W>(value).map(Into::into).map_err(|e| RecordValidationError::Malformed {
                kind,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Todoist ids are numeric strings in the v9 API and plain numbers in older payloads.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_id<E: de::Error>(self) -> Result<i64, E> {
        match self {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("id {:?} is not an integer", text))),
        }
    }
}

fn remote_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    RawId::deserialize(deserializer)?.into_id()
}

fn optional_remote_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<RawId>::deserialize(deserializer)?.map(RawId::into_id).transpose()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TodoistConfig {
    pub api_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl TodoistConfig {
    pub fn with_token(api_token: &str) -> Self {
        Self {
            api_token: api_token.to_string(),
            api_url: default_api_url(),
        }
    }

    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "todoist".to_string(),
            name: "Todoist".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_else(|| Self::with_token(""));
        msg_print!(Message::ConfigModuleTodoist);
        Ok(Self {
            api_token: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTodoistToken.to_string())
                .default(config.api_token)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTodoistApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}
