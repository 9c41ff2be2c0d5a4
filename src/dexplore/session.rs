//! # Session
//!
//! The controller. A [`Session`] owns everything one explorer run needs: the provider,
//! the record cache, the page cursor, both collections and the store that persists
//! them. User actions arrive as [`Intent`]s and [`Session::dispatch`] reduces
//! `intent + state` into new state plus a [`CmdResult`] to render.
//!
//! ## Page loads
//!
//! A page load never edits the live cursor in place. It works on a copy of the
//! [`PageState`], fetches what that copy points at, and only then commits the copy
//! back. A failed load therefore leaves the session exactly as it was.
//!
//! Every load also takes a [`LoadTicket`] from a generation counter before it starts.
//! A completion is committed only if its ticket is still the latest one issued; older
//! completions are dropped as [`Commit::Stale`], so a slow response cannot overwrite
//! the result of a newer request.
//!
//! ## Persistence
//!
//! Favorites and team are written through the [`CollectionStore`] right after every
//! successful mutation. If the write fails the in-memory collection is rolled back so
//! it never drifts from what is on disk.

use crate::cache::CreatureCache;
use crate::collections::{Favorites, Team, FAVORITES_LIMIT, TEAM_LIMIT};
use crate::commands::{self, CmdResult};
use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::filter::{FilterCriteria, FilterEngine};
use crate::model::CreatureRecord;
use crate::pagination::{PageMode, PageState, PAGE_SIZE};
use crate::provider::{id_from_url, DataProvider};
use crate::store::CollectionStore;
use tracing::debug;

/// A typed user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    /// Jump to a page (1-based) of whatever list is active.
    Goto(u32),
    /// Load the current page again.
    Reload,
    Search(String),
    ApplyFilter(FilterCriteria),
    ClearFilters,
    ToggleFavorite(u32),
    RemoveFavorite(u32),
    ClearFavorites,
    ShowFavorites,
    AddToTeam(u32),
    /// 0-based slot.
    RemoveFromTeam(usize),
    ClearTeam,
    ShowTeam,
    Open(u32),
    ListCategories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    /// Issues a ticket newer than every ticket issued before it.
    pub fn issue(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Stale,
}

/// The records behind one page, ready to commit.
#[derive(Debug, Clone, Default)]
pub struct LoadedPage {
    pub records: Vec<CreatureRecord>,
    /// Provider count, present for default-listing loads.
    pub listing_total: Option<u32>,
    /// Overrides the page label, e.g. `Result: pikachu` for a search.
    pub heading: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub page_size: u32,
    pub favorites_limit: usize,
    pub team_limit: usize,
    pub engine: FilterEngine,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            favorites_limit: FAVORITES_LIMIT,
            team_limit: TEAM_LIMIT,
            engine: FilterEngine::default(),
        }
    }
}

impl From<&DexConfig> for SessionOptions {
    fn from(config: &DexConfig) -> Self {
        Self {
            page_size: config.page_size,
            favorites_limit: config.favorites_limit(),
            team_limit: config.team_limit(),
            engine: config.filter_engine(),
        }
    }
}

pub struct Session<P, S> {
    pub(crate) provider: P,
    pub(crate) store: S,
    pub(crate) cache: CreatureCache,
    pub(crate) page: PageState,
    pub(crate) favorites: Favorites,
    pub(crate) team: Team,
    pub(crate) engine: FilterEngine,
    loads: LoadTracker,
    current: LoadedPage,
}

impl<P: DataProvider, S: CollectionStore> Session<P, S> {
    /// Restores both collections from `store`. Team records seed the cache, so team
    /// members never need refetching.
    pub fn open(provider: P, store: S, options: SessionOptions) -> Result<Self> {
        let favorites = Favorites::from_ids(store.load_favorites()?, options.favorites_limit);
        let team = Team::from_records(store.load_team()?, options.team_limit);

        let mut cache = CreatureCache::new();
        cache.seed(team.members().iter().cloned());

        debug!(
            favorites = favorites.len(),
            team = team.len(),
            "session restored"
        );

        Ok(Self {
            provider,
            store,
            cache,
            page: PageState::new(options.page_size),
            favorites,
            team,
            engine: options.engine,
            loads: LoadTracker::default(),
            current: LoadedPage::default(),
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &CreatureCache {
        &self.cache
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    /// Records on the last committed page.
    pub fn current_records(&self) -> &[CreatureRecord] {
        &self.current.records
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Result<CmdResult> {
        debug!(?intent, "dispatch");
        match intent {
            Intent::Next => commands::browse::next(self).await,
            Intent::Prev => commands::browse::prev(self).await,
            Intent::Goto(page) => commands::browse::goto(self, page).await,
            Intent::Reload => commands::browse::reload(self).await,
            Intent::Search(query) => commands::search::run(self, &query).await,
            Intent::ApplyFilter(criteria) => commands::filter::apply(self, &criteria).await,
            Intent::ClearFilters => commands::filter::clear(self).await,
            Intent::ToggleFavorite(id) => commands::favorites::toggle(self, id).await,
            Intent::RemoveFavorite(id) => commands::favorites::remove(self, id),
            Intent::ClearFavorites => commands::favorites::clear(self),
            Intent::ShowFavorites => commands::favorites::list(self).await,
            Intent::AddToTeam(id) => commands::team::add(self, id).await,
            Intent::RemoveFromTeam(slot) => commands::team::remove(self, slot),
            Intent::ClearTeam => commands::team::clear(self),
            Intent::ShowTeam => Ok(commands::team::show(self)),
            Intent::Open(id) => commands::detail::run(self, id).await,
            Intent::ListCategories => commands::types::run(self).await,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.loads.issue()
    }

    /// Installs `page` and `loaded` as the live page, unless a newer load started after
    /// `ticket` was issued.
    pub fn commit(&mut self, ticket: LoadTicket, mut page: PageState, loaded: LoadedPage) -> Commit {
        if !self.loads.is_current(ticket) {
            debug!(?ticket, "discarding stale page load");
            return Commit::Stale;
        }
        if let Some(total) = loaded.listing_total {
            page.set_listing_total(total);
        }
        self.page = page;
        self.current = loaded;
        Commit::Applied
    }

    /// Loads whatever `candidate` points at and commits it.
    pub(crate) async fn navigate(&mut self, candidate: PageState) -> Result<CmdResult> {
        let ticket = self.begin_load();
        let loaded = load_page(&self.provider, &mut self.cache, &candidate).await?;
        self.commit(ticket, candidate, loaded);
        Ok(self.page_view())
    }

    /// The committed page as a renderable result.
    pub fn page_view(&self) -> CmdResult {
        let info = self.page.info();
        let heading = self
            .current
            .heading
            .clone()
            .unwrap_or_else(|| info.label());
        CmdResult::default()
            .with_creatures(self.current.records.clone())
            .with_page(info)
            .with_heading(heading)
            .with_favorite_ids(self.favorites.ids().to_vec())
    }

    /// Resolves a free-form name or id to a record, through the cache.
    pub async fn resolve(&mut self, query: &str) -> Result<CreatureRecord> {
        let key = crate::provider::normalize_query(query)?;
        self.cache.fetch(&self.provider, &key).await
    }

    /// Display name for an id without touching the network.
    pub(crate) fn display_name(&self, id: u32) -> String {
        self.cache
            .get(id)
            .map(|r| r.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub(crate) fn persist_favorites(&mut self, previous: Favorites) -> Result<()> {
        if let Err(e) = self.store.save_favorites(self.favorites.ids()) {
            self.favorites = previous;
            return Err(e);
        }
        Ok(())
    }

    pub(crate) fn persist_team(&mut self, previous: Team) -> Result<()> {
        if let Err(e) = self.store.save_team(self.team.members()) {
            self.team = previous;
            return Err(e);
        }
        Ok(())
    }
}

/// Fetches the records for the page `state` points at.
///
/// Default mode asks the provider for one listing page; explicit mode slices the id
/// list. Either way every record is resolved through the cache in a single join.
pub(crate) async fn load_page<P>(
    provider: &P,
    cache: &mut CreatureCache,
    state: &PageState,
) -> Result<LoadedPage>
where
    P: DataProvider + ?Sized,
{
    match state.mode() {
        PageMode::Default => {
            let listing = provider.list_page(state.offset(), state.page_size()).await?;
            let ids = listing
                .results
                .iter()
                .map(|entry| {
                    id_from_url(&entry.url).ok_or_else(|| {
                        DexError::Network(format!("listing entry without an id: {}", entry.name))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;
            let records = cache.resolve_many(provider, &ids).await?;
            Ok(LoadedPage {
                records,
                listing_total: Some(listing.count),
                heading: None,
            })
        }
        PageMode::Explicit(_) => {
            let ids = state.explicit_slice().unwrap_or_default();
            let records = cache.resolve_many(provider, ids).await?;
            Ok(LoadedPage {
                records,
                ..Default::default()
            })
        }
    }
}
