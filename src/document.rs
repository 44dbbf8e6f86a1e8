use crate::format::RenderedItem;
use crate::i18n::{Lang, TextKey};
use crate::models::Category;
use chrono::{DateTime, Local};
use serde::Serialize;

/// The list container: either a message or the items of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ListRegion {
    Message(String),
    Items(Vec<RenderedItem>),
}

impl ListRegion {
    pub fn items(&self) -> &[RenderedItem] {
        match self {
            Self::Items(items) => items,
            Self::Message(_) => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Message(m) => Some(m),
            Self::Items(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationRegion {
    pub prev_label: String,
    pub prev_enabled: bool,
    /// e.g. `Page 2 / 5`
    pub page_info: String,
    pub next_label: String,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub category: Category,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LangLink {
    pub code: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticText {
    pub key: &'static str,
    pub text: String,
}

/// Everything the viewer shows. The view-model writes it; a renderer draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub lang: &'static str,
    pub title: String,
    pub static_texts: Vec<StaticText>,
    pub nav: Vec<NavButton>,
    pub lang_links: Vec<LangLink>,
    pub items_per_page: usize,
    pub update_time: String,
    pub fetch_time_footer: String,
    pub user_count: String,
    pub list: ListRegion,
    pub pagination: Option<PaginationRegion>,
    #[serde(skip)]
    pub loaded_at: Option<DateTime<Local>>,
}

impl Document {
    pub fn new(lang: Lang, items_per_page: usize) -> Self {
        Self {
            lang: lang.code(),
            title: String::new(),
            static_texts: Vec::new(),
            nav: Vec::new(),
            lang_links: Vec::new(),
            items_per_page,
            update_time: String::new(),
            fetch_time_footer: String::new(),
            user_count: String::new(),
            list: ListRegion::Message(String::new()),
            pagination: None,
            loaded_at: None,
        }
    }

    pub fn static_text(&self, key: TextKey) -> Option<&str> {
        self.static_texts
            .iter()
            .find(|s| s.key == key.as_str())
            .map(|s| s.text.as_str())
    }

    pub fn nav_label(&self, category: Category) -> Option<&str> {
        self.nav
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.label.as_str())
    }

    pub fn active_category(&self) -> Option<Category> {
        self.nav.iter().find(|b| b.active).map(|b| b.category)
    }
}
