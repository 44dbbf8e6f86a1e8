use crate::error::{Result, ViewerError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Ranking views published by the data job, one JSON file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DailyTrending,
    WeeklyTrending,
    MonthlyTrending,
    TopReposList,
    TopUsersList,
}

impl Category {
    /// Navigation order.
    pub const ALL: [Category; 5] = [
        Category::DailyTrending,
        Category::WeeklyTrending,
        Category::MonthlyTrending,
        Category::TopReposList,
        Category::TopUsersList,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::DailyTrending => "daily_trending",
            Self::WeeklyTrending => "weekly_trending",
            Self::MonthlyTrending => "monthly_trending",
            Self::TopReposList => "top_repos_list",
            Self::TopUsersList => "top_users_list",
        }
    }

    /// Resource path relative to the data root.
    pub fn resource_path(self) -> String {
        format!("data/{}.json", self.key())
    }

    /// The star-delta window this category ranks by, if it is a trending view.
    pub fn trending_window(self) -> Option<TrendingWindow> {
        match self {
            Self::DailyTrending => Some(TrendingWindow::OneDay),
            Self::WeeklyTrending => Some(TrendingWindow::SevenDays),
            Self::MonthlyTrending => Some(TrendingWindow::ThirtyDays),
            Self::TopReposList | Self::TopUsersList => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if (1..=Self::ALL.len()).contains(&n) {
                return Ok(Self::ALL[n - 1]);
            }
        }
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| {
                ViewerError::ConfigError(format!(
                    "Invalid category: {s}. Valid values are: daily_trending, weekly_trending, monthly_trending, top_repos_list, top_users_list"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingWindow {
    OneDay,
    SevenDays,
    ThirtyDays,
}

/// A repository's language field: either one name or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepoLanguage {
    One(String),
    Many(Vec<String>),
}

impl RepoLanguage {
    /// Display form; empty when there is nothing to show.
    pub fn joined(&self) -> String {
        match self {
            Self::One(s) => s.trim().to_string(),
            Self::Many(list) => list.join(", ").trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<RepoLanguage>,
    #[serde(rename = "accumulatedStars", default)]
    pub accumulated_stars: Option<u64>,
    /// Star deltas: `None` when the field is missing, `Some(None)` when it is `null`.
    #[serde(
        rename = "accumulatedStars_1d",
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub accumulated_stars_1d: Option<Option<u64>>,
    #[serde(
        rename = "accumulatedStars_7d",
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub accumulated_stars_7d: Option<Option<u64>>,
    #[serde(
        rename = "accumulatedStars_30d",
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub accumulated_stars_30d: Option<Option<u64>>,
}

// Only called for fields that are in the input, so a `null` lands as `Some(None)`.
fn present_field<'de, D>(deserializer: D) -> std::result::Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

impl RepoEntry {
    pub fn stars_for(&self, window: TrendingWindow) -> Option<Option<u64>> {
        match window {
            TrendingWindow::OneDay => self.accumulated_stars_1d,
            TrendingWindow::SevenDays => self.accumulated_stars_7d,
            TrendingWindow::ThirtyDays => self.accumulated_stars_30d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntry {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: Option<String>,
    pub url: String,
    #[serde(rename = "followersCount", default)]
    pub followers_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Repo,
    User,
}

impl EntryKind {
    /// Structural test over an untyped entry: a user carries `login` or `followersCount`.
    pub fn classify(raw: &Map<String, Value>) -> Self {
        if raw.contains_key("login") || raw.contains_key("followersCount") {
            Self::User
        } else {
            Self::Repo
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RankEntry {
    Repo(RepoEntry),
    User(UserEntry),
}

impl RankEntry {
    /// Classify and decode one raw list element.
    pub fn from_raw(raw: Map<String, Value>) -> Result<Self> {
        let kind = EntryKind::classify(&raw);
        let required: &[&str] = match kind {
            EntryKind::User => &["login", "url"],
            EntryKind::Repo => &["name", "url"],
        };
        if let Some(missing) = required.iter().find(|k| !raw.contains_key(**k)) {
            return Err(ViewerError::MissingField(missing.to_string()));
        }

        let value = Value::Object(raw);
        Ok(match kind {
            EntryKind::User => Self::User(serde_json::from_value(value)?),
            EntryKind::Repo => Self::Repo(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Repo(_) => EntryKind::Repo,
            Self::User(_) => EntryKind::User,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Repo(r) => &r.url,
            Self::User(u) => &u.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    /// 1-based position in the source list.
    pub rank: usize,
    pub entry: RankEntry,
}

/// A loaded ranking, replaced wholesale on every load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    entries: Vec<RankedEntry>,
}

impl Dataset {
    pub fn from_entries(entries: Vec<RankEntry>) -> Self {
        let entries = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| RankedEntry { rank: i + 1, entry })
            .collect();
        Self { entries }
    }

    pub fn from_raw(raw: Vec<Map<String, Value>>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                RankEntry::from_raw(item).map_err(|e| match e {
                    ViewerError::MissingField(field) => {
                        ViewerError::MissingField(format!("{} (entry {})", field, i + 1))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
