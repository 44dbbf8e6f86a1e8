use crate::i18n::{format_count, translate, Lang, TextKey};
use crate::models::{Category, RankEntry, RepoEntry, TrendingWindow, UserEntry};
use serde::Serialize;

pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/40";

/// A label/value pair on an item's details line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

impl Detail {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One list item, fully resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderedItem {
    Repo {
        display_rank: usize,
        name: String,
        url: String,
        title: String,
        stars: Detail,
        /// Emitted even when both halves are empty.
        trending: Detail,
        language: Option<Detail>,
        description: Option<String>,
    },
    User {
        display_rank: usize,
        display_name: String,
        avatar_url: String,
        url: String,
        title: String,
        followers: Detail,
    },
}

impl RenderedItem {
    pub fn display_rank(&self) -> usize {
        match self {
            Self::Repo { display_rank, .. } | Self::User { display_rank, .. } => *display_rank,
        }
    }
}

pub fn render_entry(
    entry: &RankEntry,
    display_rank: usize,
    category: Category,
    lang: Lang,
) -> RenderedItem {
    match entry {
        RankEntry::Repo(repo) => render_repo(repo, display_rank, category, lang),
        RankEntry::User(user) => render_user(user, display_rank, lang),
    }
}

fn render_repo(repo: &RepoEntry, display_rank: usize, category: Category, lang: Lang) -> RenderedItem {
    let stars = Detail::new(
        translate(lang, TextKey::Stars, &[]),
        count_or(repo.accumulated_stars, lang, "0"),
    );

    let trending = category
        .trending_window()
        .and_then(|window| repo.stars_for(window).map(|n| (window, n)))
        .map(|(window, n)| {
            let key = match window {
                TrendingWindow::OneDay => TextKey::Stars1d,
                TrendingWindow::SevenDays => TextKey::Stars7d,
                TrendingWindow::ThirtyDays => TextKey::Stars30d,
            };
            Detail::new(translate(lang, key, &[]), count_or(n, lang, "0"))
        })
        .unwrap_or_else(|| Detail::new("", ""));

    let language = repo
        .language
        .as_ref()
        .map(|l| l.joined())
        .filter(|l| !l.is_empty())
        .map(|l| Detail::new(translate(lang, TextKey::Language, &[]), l));

    RenderedItem::Repo {
        display_rank,
        name: repo.name.clone(),
        url: repo.url.clone(),
        title: translate(lang, TextKey::RepoTitle, &[repo.name.as_str()]),
        stars,
        trending,
        language,
        description: repo.description.clone().filter(|d| !d.is_empty()),
    }
}

fn render_user(user: &UserEntry, display_rank: usize, lang: Lang) -> RenderedItem {
    let display_name = match user.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => format!("{} ({})", user.login, name),
        None => user.login.clone(),
    };

    RenderedItem::User {
        display_rank,
        display_name,
        avatar_url: user
            .avatar_url
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
        url: user.url.clone(),
        title: translate(lang, TextKey::UserTitle, &[user.login.as_str()]),
        followers: Detail::new(
            translate(lang, TextKey::Followers, &[]),
            count_or(user.followers_count, lang, "N/A"),
        ),
    }
}

fn count_or(n: Option<u64>, lang: Lang, fallback: &str) -> String {
    n.map(|n| format_count(n, lang))
        .unwrap_or_else(|| fallback.to_string())
}
