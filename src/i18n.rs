//! Translation tables for the two supported display languages.
//!
//! Every [`TextKey`] has an entry in both tables; the `match` in
//! [`template`] is exhaustive, so a missing entry does not compile.
//! [`validate`] additionally checks that both languages agree on the
//! placeholder count of each template. Templates use positional `{0}`,
//! `{1}`, ... placeholders.

use crate::error::{Result, ViewerError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    /// Chinese (primary).
    Zh,
    /// English (secondary).
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Zh, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Pick a language from a locale tag such as `zh_CN.UTF-8` or `en-US`.
    /// Anything that is not Chinese is shown in English.
    pub fn from_locale_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("zh") {
            Self::Zh
        } else {
            Self::En
        }
    }

    /// Language of the environment (`LC_ALL`, then `LANG`).
    pub fn detect() -> Self {
        std::env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| std::env::var("LANG").ok())
            .map(|tag| Self::from_locale_tag(&tag))
            .unwrap_or(Self::En)
    }

    fn grouping_separator(self) -> char {
        match self {
            Self::Zh | Self::En => ',',
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            other => Err(ViewerError::ConfigError(format!(
                "Unsupported language: {other}. Valid values are: zh, en"
            ))),
        }
    }
}

macro_rules! text_keys {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TextKey {
            $($variant),+
        }

        impl TextKey {
            pub const ALL: &'static [TextKey] = &[$(TextKey::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(TextKey::$variant => $key),+
                }
            }
        }

        impl FromStr for TextKey {
            type Err = ViewerError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($key => Ok(TextKey::$variant),)+
                    _ => Err(ViewerError::MissingField(format!("translation key {s}"))),
                }
            }
        }
    };
}

text_keys! {
    Loading => "loading",
    FetchTimePrefix => "fetchTimePrefix",
    UpdateTimePrefix => "updateTimePrefix",
    Page => "page",
    Prev => "prev",
    Next => "next",
    RepoTitle => "repoTitle",
    UserTitle => "userTitle",
    Stars => "stars",
    Followers => "followers",
    Language => "language",
    Description => "description",
    DailyTrending => "daily_trending",
    WeeklyTrending => "weekly_trending",
    MonthlyTrending => "monthly_trending",
    TopReposList => "top_repos_list",
    TopUsersList => "top_users_list",
    MainTitle => "mainTitle",
    LangLabel => "langLabel",
    GithubUserCount => "githubUserCount",
    ItemsPerPage => "itemsPerPage",
    DataSource => "dataSource",
    ProjectSource => "projectSource",
    NoItems => "noItems",
    ErrorLoading => "errorLoading",
    ErrorUpdateTime => "errorUpdateTime",
    Title => "title",
    Stars1d => "stars_1d",
    Stars7d => "stars_7d",
    Stars30d => "stars_30d",
}

impl TextKey {
    /// Keys shown as plain static labels around the list.
    pub const STATIC: [TextKey; 5] = [
        TextKey::MainTitle,
        TextKey::LangLabel,
        TextKey::ItemsPerPage,
        TextKey::DataSource,
        TextKey::ProjectSource,
    ];

    /// Number of positional arguments the template expects.
    pub fn arity(self, lang: Lang) -> usize {
        placeholder_count(template(lang, self))
    }
}

pub fn template(lang: Lang, key: TextKey) -> &'static str {
    use TextKey::*;
    match lang {
        Lang::Zh => match key {
            Loading => "正在加载数据...",
            FetchTimePrefix => "上次数据抓取时间: ",
            UpdateTimePrefix => "最近更新时间：",
            Page => "页",
            Prev => "上一页",
            Next => "下一页",
            RepoTitle => "{0} - 仓库详情",
            UserTitle => "{0} - 用户详情",
            Stars => "🌟总数",
            Followers => "粉丝数",
            Language => "语言",
            Description => "描述",
            DailyTrending => "🔥最近一天最热项目",
            WeeklyTrending => "🔥🔥最近一周最热项目",
            MonthlyTrending => "🔥🔥🔥最近一月最热项目",
            TopReposList => "获的🌟最多的项目",
            TopUsersList => "追随者最多的开发者🧑‍💻",
            MainTitle => "GitHub 封神榜",
            LangLabel => "语言",
            GithubUserCount => "GitHub 当前注册用户总数：",
            ItemsPerPage => "每页显示:",
            DataSource => "数据来源: GitHub API",
            ProjectSource => "项目源码",
            NoItems => "没有找到项目。",
            ErrorLoading => {
                "加载 {0} 数据时出错。详情: {1}。请确保数据文件存在于 {2} 且抓取脚本已运行。"
            }
            ErrorUpdateTime => "获取更新时间失败",
            Title => "GitHub 封神榜",
            Stars1d => "今日新增🌟",
            Stars7d => "本周新增🌟",
            Stars30d => "本月新增🌟",
        },
        Lang::En => match key {
            Loading => "Loading data...",
            FetchTimePrefix => "Last data fetch time: ",
            UpdateTimePrefix => "Last updated: ",
            Page => "Page",
            Prev => "Previous",
            Next => "Next",
            RepoTitle => "{0} - Repository Details",
            UserTitle => "{0} - User Details",
            Stars => "🌟Stars",
            Followers => "Followers",
            Language => "Language",
            Description => "Description",
            DailyTrending => "🔥Daily Trending",
            WeeklyTrending => "🔥🔥Weekly Trending",
            MonthlyTrending => "🔥🔥🔥Monthly Trending",
            TopReposList => "Top Repos",
            TopUsersList => "Top Coders🧑‍💻",
            MainTitle => "GitHub Legend Leaderboard",
            LangLabel => "Language",
            GithubUserCount => "GitHub Registered Users:",
            ItemsPerPage => "Items per page:",
            DataSource => "Data Source: GitHub API",
            ProjectSource => "Project Source",
            NoItems => "No items found for this page.",
            ErrorLoading => {
                "Error loading data for {0}. Details: {1}. Please ensure the data file exists at {2} and the fetch script has run."
            }
            ErrorUpdateTime => "Failed to fetch update time",
            Title => "GitHub Legend Leaderboard",
            Stars1d => "🌟Stars (Today increased)",
            Stars7d => "🌟Stars (This Week increased)",
            Stars30d => "🌟Stars (This Month increased)",
        },
    }
}

/// Resolve `key` in `lang`, substituting `args` positionally.
/// One left-to-right pass, so argument text is never expanded again.
pub fn translate(lang: Lang, key: TextKey, args: &[&str]) -> String {
    let template = template(lang, key);
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let arg = tail[1..].find('}').and_then(|end| {
            tail[1..1 + end]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|arg| (*arg, end + 2))
        });
        match arg {
            Some((arg, consumed)) => {
                out.push_str(arg);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Like [`translate`], but for an untyped key. Unknown keys come back unchanged.
pub fn translate_str(lang: Lang, key: &str, args: &[&str]) -> String {
    match key.parse::<TextKey>() {
        Ok(k) => translate(lang, k, args),
        Err(_) => key.to_string(),
    }
}

/// Check that both tables agree on every template's placeholder count.
pub fn validate() -> Result<()> {
    for &key in TextKey::ALL {
        let zh = key.arity(Lang::Zh);
        let en = key.arity(Lang::En);
        if zh != en {
            return Err(ViewerError::ConfigError(format!(
                "translation {} takes {} argument(s) in zh but {} in en",
                key.as_str(),
                zh,
                en
            )));
        }
        for lang in Lang::ALL {
            if template(lang, key).trim().is_empty() {
                return Err(ViewerError::ConfigError(format!(
                    "translation {} is empty in {}",
                    key.as_str(),
                    lang
                )));
            }
        }
    }
    Ok(())
}

fn placeholder_count(template: &str) -> usize {
    (0..)
        .take_while(|i| template.contains(&format!("{{{i}}}")))
        .count()
}

/// Group digits in thousands with the language's separator: `1234567` -> `1,234,567`.
pub fn format_count(n: u64, lang: Lang) -> String {
    let digits = n.to_string();
    let sep = lang.grouping_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

impl From<crate::models::Category> for TextKey {
    fn from(category: crate::models::Category) -> Self {
        use crate::models::Category;
        match category {
            Category::DailyTrending => TextKey::DailyTrending,
            Category::WeeklyTrending => TextKey::WeeklyTrending,
            Category::MonthlyTrending => TextKey::MonthlyTrending,
            Category::TopReposList => TextKey::TopReposList,
            Category::TopUsersList => TextKey::TopUsersList,
        }
    }
}
