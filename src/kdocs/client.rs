use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::types::*;
use crate::config::Config;
use crate::error::{KdocsError, Result};

const USER_AGENT: &str = concat!("kdocs/", env!("CARGO_PKG_VERSION"));

/// Page size requested from every listing endpoint
const PAGE_SIZE: &str = "20";

/// Remote listing operations, one call per listing kind
///
/// Every call is a single attempt. Transport failures, non-2xx statuses and
/// malformed bodies all come back as errors; interpretation is left to the
/// caller.
pub trait DocsApi {
    /// Recently opened documents, newest first
    fn recent(&self, sid: &str) -> Result<Vec<LatestFile>>;

    /// Documents whose name matches `query`, newest first
    fn search(&self, sid: &str, query: &str) -> Result<SearchResponse>;

    /// Top-level groups, owned and shared
    fn groups(&self, sid: &str) -> Result<FileListResponse<Group>>;

    /// Children of `parent_id` inside `group_id`
    fn folder(&self, sid: &str, group_id: &str, parent_id: &str) -> Result<FileListResponse<File>>;

    /// Path segments from the group root down to `file_id`
    fn file_path(&self, sid: &str, group_id: i64, file_id: &str) -> Result<FilePathResponse>;
}

/// Kdocs drive API client
pub struct KdocsClient {
    client: Client,
    base_url: String,
}

impl KdocsClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api.base_url)
    }

    /// Create a client against an explicit API root
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        url::Url::parse(base_url).map_err(|e| {
            KdocsError::Config(format!("invalid api.base_url '{base_url}': {e}"))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make an authenticated GET request to the drive API
    fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        sid: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::COOKIE, format!("wps_sid={sid}"))
            .query(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(KdocsError::api(status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(KdocsError::Json)
    }
}

/// Query parameters shared by the group and folder endpoints
const LISTING_PARAMS: [(&str, &str); 7] = [
    ("linkgroup", "true"),
    ("include", "pic_thumbnail"),
    ("offset", "0"),
    ("count", PAGE_SIZE),
    ("orderby", "mtime"),
    ("order", "DESC"),
    ("append", "false"),
];

impl DocsApi for KdocsClient {
    fn recent(&self, sid: &str) -> Result<Vec<LatestFile>> {
        self.get(
            "/v3/roaming",
            sid,
            &[("without_sid", "true"), ("offset", "0"), ("count", PAGE_SIZE)],
        )
    }

    fn search(&self, sid: &str, query: &str) -> Result<SearchResponse> {
        self.get(
            "/v3/search/files",
            sid,
            &[
                ("offset", "0"),
                ("count", PAGE_SIZE),
                ("sort_by", "mtime"),
                ("order", "DESC"),
                ("search_group_info", "true"),
                ("search_operator_name", "true"),
                ("include_device_info", "true"),
                ("searchname", query),
                ("search_file_content", "false"),
                ("search_file_name", "true"),
            ],
        )
    }

    fn groups(&self, sid: &str) -> Result<FileListResponse<Group>> {
        self.get("/v5/groups/special/files", sid, &LISTING_PARAMS)
    }

    fn folder(&self, sid: &str, group_id: &str, parent_id: &str) -> Result<FileListResponse<File>> {
        let mut params: Vec<(&str, &str)> = LISTING_PARAMS.to_vec();
        params.push(("parentid", parent_id));
        self.get(&format!("/v5/groups/{group_id}/files"), sid, &params)
    }

    fn file_path(&self, sid: &str, group_id: i64, file_id: &str) -> Result<FilePathResponse> {
        self.get(&format!("/v5/groups/{group_id}/files/{file_id}/path"), sid, &[])
    }
}
