use crate::error::{LoadFailure, Result, ViewerError};
use crate::models::{Category, Dataset};
use crate::types::{PayloadMeta, RankPayload};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

pub const UPDATE_TIME_PATH: &str = "data/update_time.txt";

const USER_AGENT: &str = "GitRank Viewer/0.1.0";

/// Where leaderboard files are read from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch a resource (e.g. `data/top_repos_list.json`) as text.
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Human-readable location of a resource, used in error messages.
    fn locate(&self, path: &str) -> String;
}

/// Reads the data files from a web server.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(HttpSource { client, base })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.base.join(path)?;
        debug!(%url, "Fetching resource");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    fn locate(&self, path: &str) -> String {
        self.base
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.to_string())
    }
}

/// Reads the data files from a local directory (e.g. a checkout of the site).
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        debug!(path = %full.display(), "Reading resource");

        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ViewerError::NotFound(full.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn locate(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}

/// Build a source from a data root: `http(s)://` roots go over the network,
/// anything else is treated as a local directory.
pub fn source_for_root(root: &str, timeout: Duration) -> Result<Box<dyn DataSource>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(Box::new(HttpSource::new(root, timeout)?))
    } else {
        let path = PathBuf::from(root);
        if !path.is_dir() {
            return Err(ViewerError::ConfigError(format!(
                "Data root is neither a URL nor a directory: {}",
                root
            )));
        }
        Ok(Box::new(DirSource::new(path)))
    }
}

/// A successfully loaded category payload.
#[derive(Debug, Clone)]
pub struct LoadedCategory {
    pub category: Category,
    pub dataset: Dataset,
    pub meta: Option<PayloadMeta>,
}

pub async fn load_category<S>(
    source: &S,
    category: Category,
) -> std::result::Result<LoadedCategory, LoadFailure>
where
    S: DataSource + ?Sized,
{
    let path = category.resource_path();
    let location = source.locate(&path);

    let loaded = async {
        let text = source.fetch_text(&path).await?;
        let payload: RankPayload = serde_json::from_str(&text)?;
        let (list, meta) = payload.into_list();
        Ok::<_, ViewerError>((Dataset::from_raw(list)?, meta))
    }
    .await;

    match loaded {
        Ok((dataset, meta)) => {
            debug!(%category, entries = dataset.len(), "Category loaded");
            Ok(LoadedCategory {
                category,
                dataset,
                meta,
            })
        }
        Err(e) => {
            error!(%category, path = %location, error = %e, "Error fetching data");
            Err(LoadFailure::new(category, location, &e))
        }
    }
}

pub async fn load_update_timestamp<S>(source: &S) -> Result<String>
where
    S: DataSource + ?Sized,
{
    let text = source.fetch_text(UPDATE_TIME_PATH).await.map_err(|e| {
        error!(path = UPDATE_TIME_PATH, error = %e, "Error fetching update time");
        e
    })?;
    Ok(text.trim().to_string())
}

/// The registered-user count, from `meta` or one fallback read of the users list.
pub async fn resolve_user_count<S>(source: &S, meta: Option<&PayloadMeta>) -> Option<u64>
where
    S: DataSource + ?Sized,
{
    if let Some(count) = meta.and_then(PayloadMeta::user_total_count) {
        return Some(count);
    }

    let path = Category::TopUsersList.resource_path();
    let fallback = async {
        let text = source.fetch_text(&path).await?;
        let payload: RankPayload = serde_json::from_str(&text)?;
        Ok::<_, ViewerError>(payload.meta.and_then(|m| m.user_total_count()))
    }
    .await;

    match fallback {
        Ok(count) => count,
        Err(e) => {
            warn!(path = %path, error = %e, "Could not fetch separate user count");
            None
        }
    }
}
