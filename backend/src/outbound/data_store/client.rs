//! Reqwest-backed PostgREST client shared by the table repositories.
//!
//! Owns transport details only: URL building, the `apikey`/bearer service
//! headers, `Prefer` negotiation and status/body mapping. Callers pick the
//! table, filters and row types.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

const RETURN_REPRESENTATION: &str = "return=representation";
const MERGE_DUPLICATES: &str = "return=representation,resolution=merge-duplicates";

/// Failures talking to the data store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostgrestError {
    /// The request never produced a response.
    #[error("data store transport error: {message}")]
    Transport { message: String },
    /// The data store answered with a non-success status.
    #[error("data store returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The body did not match the expected row shape.
    #[error("data store returned an unreadable body: {message}")]
    Decode { message: String },
    /// A write returned no representation.
    #[error("data store returned no rows for {table}")]
    Empty { table: String },
}

impl PostgrestError {
    /// Whether the failure happened before the data store answered.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// `col=eq.value` filter pair.
pub fn eq(column: &'static str, value: impl std::fmt::Display) -> (&'static str, String) {
    (column, format!("eq.{value}"))
}

/// `order=col.desc` pair.
pub fn order_desc(column: &'static str) -> (&'static str, String) {
    ("order", format!("{column}.desc"))
}

/// Client for `{base}/rest/v1/{table}` endpoints.
pub struct PostgrestClient {
    client: Client,
    rest_root: Url,
    service_key: Zeroizing<String>,
}

impl PostgrestClient {
    /// Build a client against the project at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: &Url,
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut rest_root = base_url.clone();
        let path = format!("{}/rest/v1/", rest_root.path().trim_end_matches('/'));
        rest_root.set_path(&path);
        Ok(Self {
            client,
            rest_root,
            service_key: Zeroizing::new(service_key.into()),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, PostgrestError> {
        self.rest_root
            .join(table)
            .map_err(|error| PostgrestError::Transport {
                message: format!("invalid table url for {table}: {error}"),
            })
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, PostgrestError> {
        let url = self.table_url(table)?;
        debug!(%method, table, "data store request");
        Ok(self
            .client
            .request(method, url)
            .header("apikey", self.service_key.as_str())
            .bearer_auth(self.service_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    /// `GET` rows matching `query` (`select=*` is always sent).
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&'static str, String)],
    ) -> Result<Vec<T>, PostgrestError> {
        let response = self
            .request(Method::GET, table)?
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_rows(response).await
    }

    /// First row matching `query`, if any.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&'static str, String)],
    ) -> Result<Option<T>, PostgrestError> {
        let mut filters = query.to_vec();
        filters.push(("limit", "1".to_owned()));
        let rows = self.select(table, &filters).await?;
        Ok(rows.into_iter().next())
    }

    /// `POST` a row and return its stored representation.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, PostgrestError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, table)?
            .header("Prefer", RETURN_REPRESENTATION)
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;
        first_row(table, decode_rows(response).await?)
    }

    /// `PATCH` rows matching `query` and return the first updated row.
    pub async fn update<B, T>(
        &self,
        table: &str,
        query: &[(&'static str, String)],
        changes: &B,
    ) -> Result<T, PostgrestError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PATCH, table)?
            .header("Prefer", RETURN_REPRESENTATION)
            .query(query)
            .json(changes)
            .send()
            .await
            .map_err(map_transport_error)?;
        first_row(table, decode_rows(response).await?)
    }

    /// Insert or merge a row keyed by `on_conflict`.
    pub async fn upsert<B, T>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &B,
    ) -> Result<T, PostgrestError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, table)?
            .header("Prefer", MERGE_DUPLICATES)
            .query(&[("on_conflict", on_conflict)])
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;
        first_row(table, decode_rows(response).await?)
    }
}

async fn decode_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, PostgrestError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| PostgrestError::Decode {
        message: error.to_string(),
    })
}

fn first_row<T>(table: &str, rows: Vec<T>) -> Result<T, PostgrestError> {
    rows.into_iter().next().ok_or_else(|| PostgrestError::Empty {
        table: table.to_owned(),
    })
}

fn map_transport_error(error: reqwest::Error) -> PostgrestError {
    PostgrestError::Transport {
        message: error.to_string(),
    }
}

/// PostgREST errors carry `message` (and often `details`) in a JSON object.
fn map_status_error(status: StatusCode, body: &[u8]) -> PostgrestError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_owned());
    PostgrestError::Status {
        status: status.as_u16(),
        message,
    }
}
