use crate::error::{Result, ViewerError};
use crate::i18n::Lang;
use crate::models::Category;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::view_model::{StalePolicy, ViewerConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gitrank-viewer")]
#[command(about = "GitRank Viewer - Browse GitHub leaderboards (trending repos, top repos, top users) in the terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Site root holding the `data/` directory: an http(s) URL or a local path
    #[arg(long, env = "GITRANK_DATA_ROOT", default_value = "./public")]
    pub data_root: String,

    /// Display language (zh or en); detected from LANG when omitted
    #[arg(long, env = "GITRANK_LANG")]
    pub lang: Option<String>,

    /// Items shown per page
    #[arg(long, env = "GITRANK_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Ranking shown first
    #[arg(long, env = "GITRANK_CATEGORY", default_value = "daily_trending")]
    pub category: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "GITRANK_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Apply every finished load, even ones superseded by a newer request
    #[arg(long)]
    pub apply_stale_loads: bool,

    /// Render the first page once and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub fn viewer_config(&self) -> Result<ViewerConfig> {
        let lang = match &self.lang {
            Some(lang) => lang.parse::<Lang>()?,
            None => Lang::detect(),
        };
        if self.page_size == 0 {
            return Err(ViewerError::ConfigError(
                "--page-size must be a positive integer".to_string(),
            ));
        }
        let category: Category = self.category.parse()?;
        let stale_policy = if self.apply_stale_loads {
            StalePolicy::ApplyAll
        } else {
            StalePolicy::LatestWins
        };

        Ok(ViewerConfig {
            lang,
            items_per_page: self.page_size,
            category,
            stale_policy,
        })
    }
}
