use crate::document::{Document, LangLink, ListRegion, NavButton, PaginationRegion, StaticText};
use crate::error::{LoadFailure, Result};
use crate::format::render_entry;
use crate::i18n::{format_count, translate, Lang, TextKey};
use crate::models::{Category, Dataset};
use crate::pagination::{Pagination, DEFAULT_PAGE_SIZE};
use crate::source::{load_category, load_update_timestamp, resolve_user_count, DataSource, LoadedCategory};
use crate::types::PayloadMeta;
use chrono::Local;
use tracing::{debug, info, warn};

const NOT_AVAILABLE: &str = "N/A";

/// What to do with a load that finishes after a newer one was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Only the most recently requested load is applied.
    #[default]
    LatestWins,
    /// Every completion is applied, so the last one to finish wins.
    ApplyAll,
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub lang: Lang,
    pub items_per_page: usize,
    pub category: Category,
    pub stale_policy: StalePolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            lang: Lang::En,
            items_per_page: DEFAULT_PAGE_SIZE,
            category: Category::DailyTrending,
            stale_policy: StalePolicy::default(),
        }
    }
}

/// Identifies one load request. Sequence numbers only ever grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub seq: u64,
    pub category: Category,
}

/// The category read of one load.
pub type LoadOutcome = std::result::Result<LoadedCategory, LoadFailure>;

/// A status-line read started after a load has been applied. These never
/// hold up the list.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusRequest {
    UpdateTime,
    UserCount(Option<PayloadMeta>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// `None` when the timestamp could not be read.
    UpdateTime(Option<String>),
    UserCount(Option<u64>),
}

/// Run the category read of a load. Never touches view-model state.
pub async fn fetch_outcome<S>(source: &S, ticket: LoadTicket) -> LoadOutcome
where
    S: DataSource + ?Sized,
{
    load_category(source, ticket.category).await
}

/// Status reads that follow `outcome`. A failed load skips the timestamp but
/// still resolves the user count through the users list.
pub fn status_requests(outcome: &LoadOutcome) -> Vec<StatusRequest> {
    match outcome {
        Ok(loaded) => vec![
            StatusRequest::UpdateTime,
            StatusRequest::UserCount(loaded.meta.clone()),
        ],
        Err(_) => vec![StatusRequest::UserCount(None)],
    }
}

pub async fn fetch_status<S>(source: &S, request: StatusRequest) -> StatusUpdate
where
    S: DataSource + ?Sized,
{
    match request {
        StatusRequest::UpdateTime => StatusUpdate::UpdateTime(load_update_timestamp(source).await.ok()),
        StatusRequest::UserCount(meta) => {
            StatusUpdate::UserCount(resolve_user_count(source, meta.as_ref()).await)
        }
    }
}

/// Run one load to the end in sequence: the category, then its status reads.
/// Returns false when the load was discarded as stale.
pub async fn complete_load<S>(vm: &mut LeaderboardViewModel, source: &S, ticket: LoadTicket) -> bool
where
    S: DataSource + ?Sized,
{
    let outcome = fetch_outcome(source, ticket).await;
    let requests = status_requests(&outcome);
    if !vm.apply_load(ticket, outcome) {
        return false;
    }
    for request in requests {
        let update = fetch_status(source, request).await;
        vm.apply_status(ticket, update);
    }
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DataState {
    Loading,
    Ready,
    Failed(String),
}

/// Leaderboard state: dataset, pagination, category and language, plus the
/// document they render into.
pub struct LeaderboardViewModel {
    dataset: Dataset,
    data_state: DataState,
    pagination: Pagination,
    category: Category,
    lang: Lang,
    stale_policy: StalePolicy,
    load_seq: u64,
    update_time: Option<Option<String>>,
    user_count: Option<Option<u64>>,
    document: Document,
}

impl LeaderboardViewModel {
    pub fn new(config: ViewerConfig) -> Result<Self> {
        let pagination = Pagination::new(config.items_per_page)?;
        let mut vm = Self {
            dataset: Dataset::default(),
            data_state: DataState::Loading,
            pagination,
            category: config.category,
            lang: config.lang,
            stale_policy: config.stale_policy,
            load_seq: 0,
            update_time: None,
            user_count: None,
            document: Document::new(config.lang, pagination.items_per_page()),
        };
        vm.render_chrome();
        vm.render_list();
        vm.render_pagination();
        Ok(vm)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn current_seq(&self) -> u64 {
        self.load_seq
    }

    pub fn t(&self, key: TextKey, args: &[&str]) -> String {
        translate(self.lang, key, args)
    }

    /// Start (re)loading `category`. The caller runs [`fetch_outcome`] for the
    /// returned ticket and hands the result to [`Self::apply_load`].
    pub fn begin_load(&mut self, category: Category) -> LoadTicket {
        self.load_seq += 1;
        self.category = category;
        self.pagination.reset();
        self.data_state = DataState::Loading;
        debug!(%category, seq = self.load_seq, "Load requested");

        self.render_nav();
        self.document.list = ListRegion::Message(self.t(TextKey::Loading, &[]));
        self.document.pagination = None;

        LoadTicket {
            seq: self.load_seq,
            category,
        }
    }

    fn is_stale(&self, ticket: LoadTicket) -> bool {
        ticket.seq != self.load_seq && self.stale_policy == StalePolicy::LatestWins
    }

    /// Apply a finished category read. Returns false when it was discarded as stale.
    pub fn apply_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if self.is_stale(ticket) {
            debug!(
                category = %ticket.category,
                seq = ticket.seq,
                current = self.load_seq,
                "Discarding stale load"
            );
            return false;
        }

        match outcome {
            Ok(loaded) => {
                info!(category = %loaded.category, entries = loaded.dataset.len(), "Dataset applied");
                self.dataset = loaded.dataset;
                self.data_state = DataState::Ready;
            }
            Err(failure) => {
                let label = self.t(failure.category.into(), &[]);
                let message = self.t(
                    TextKey::ErrorLoading,
                    &[label.as_str(), failure.message.as_str(), failure.path.as_str()],
                );
                self.dataset = Dataset::default();
                self.data_state = DataState::Failed(message);
                self.update_time = Some(None);
            }
        }

        self.pagination.reset();
        self.document.loaded_at = Some(Local::now());

        self.render_status();
        self.render_list();
        self.render_pagination();
        true
    }

    /// Apply a finished status read; only the status lines change.
    pub fn apply_status(&mut self, ticket: LoadTicket, update: StatusUpdate) -> bool {
        if self.is_stale(ticket) {
            debug!(seq = ticket.seq, current = self.load_seq, "Discarding stale status");
            return false;
        }

        match update {
            StatusUpdate::UpdateTime(time) => {
                if time.is_none() {
                    warn!("Update time unavailable");
                }
                self.update_time = Some(time);
            }
            StatusUpdate::UserCount(count) => self.user_count = Some(count),
        }
        self.render_status();
        true
    }

    pub fn select_category(&mut self, category: Category) -> LoadTicket {
        self.begin_load(category)
    }

    pub fn reload(&mut self) -> LoadTicket {
        self.begin_load(self.category)
    }

    /// Change the page size; goes back to page 1 without reloading.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<()> {
        self.pagination.set_items_per_page(items_per_page)?;
        self.document.items_per_page = items_per_page;
        debug!(items_per_page, "Page size changed");
        self.render_list();
        self.render_pagination();
        Ok(())
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next(self.dataset.len());
        if moved {
            self.render_list();
            self.render_pagination();
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pagination.prev();
        if moved {
            self.render_list();
            self.render_pagination();
        }
        moved
    }

    /// Switch the display language. Re-translates everything already shown and
    /// reloads the current category; `None` if `lang` is already active.
    pub fn switch_language(&mut self, lang: Lang) -> Option<LoadTicket> {
        if lang == self.lang {
            return None;
        }
        info!(from = %self.lang, to = %lang, "Switching language");
        self.lang = lang;
        self.document.lang = lang.code();
        self.render_chrome();
        Some(self.begin_load(self.category))
    }

    fn render_chrome(&mut self) {
        self.document.title = self.t(TextKey::Title, &[]);
        self.document.static_texts = TextKey::STATIC
            .iter()
            .map(|&key| StaticText {
                key: key.as_str(),
                text: self.t(key, &[]),
            })
            .collect();
        self.document.lang_links = Lang::ALL
            .iter()
            .map(|&l| LangLink {
                code: l.code(),
                active: l == self.lang,
            })
            .collect();
        self.render_nav();
        self.render_status();
        self.render_pagination();
    }

    fn render_nav(&mut self) {
        self.document.nav = Category::ALL
            .iter()
            .map(|&category| NavButton {
                category,
                label: self.t(category.into(), &[]),
                active: category == self.category,
            })
            .collect();
    }

    fn render_status(&mut self) {
        let time_text = match &self.update_time {
            None => self.t(TextKey::Loading, &[]),
            Some(Some(time)) => time.clone(),
            Some(None) => format!("{} ({})", NOT_AVAILABLE, self.t(TextKey::ErrorUpdateTime, &[])),
        };
        self.document.update_time = format!("{} {}", self.t(TextKey::UpdateTimePrefix, &[]).trim_end(), time_text);
        self.document.fetch_time_footer = format!("{} {}", self.t(TextKey::FetchTimePrefix, &[]).trim_end(), time_text);

        let count_text = match self.user_count {
            None => self.t(TextKey::Loading, &[]),
            Some(Some(count)) if count > 0 => format_count(count, self.lang),
            Some(_) => NOT_AVAILABLE.to_string(),
        };
        self.document.user_count = format!("{} {}", self.t(TextKey::GithubUserCount, &[]), count_text);
    }

    fn render_list(&mut self) {
        let page = self.pagination.page(self.dataset.entries());
        self.document.list = if page.items.is_empty() {
            let message = match &self.data_state {
                DataState::Failed(message) => message.clone(),
                DataState::Loading => self.t(TextKey::Loading, &[]),
                DataState::Ready => self.t(TextKey::NoItems, &[]),
            };
            ListRegion::Message(message)
        } else {
            ListRegion::Items(
                page.numbered()
                    .map(|(rank, item)| render_entry(&item.entry, rank, self.category, self.lang))
                    .collect(),
            )
        };
    }

    fn render_pagination(&mut self) {
        let Some(controls) = self.pagination.controls(self.dataset.len()) else {
            self.document.pagination = None;
            return;
        };
        self.document.pagination = Some(PaginationRegion {
            prev_label: self.t(TextKey::Prev, &[]),
            prev_enabled: controls.prev_enabled,
            page_info: format!(
                "{} {} / {}",
                self.t(TextKey::Page, &[]),
                controls.current_page,
                controls.total_pages
            ),
            next_label: self.t(TextKey::Next, &[]),
            next_enabled: controls.next_enabled,
        });
    }
}
