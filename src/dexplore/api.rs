//! # API Facade
//!
//! A thin facade over the [`Session`] and the command layer, and the single entry point
//! for every explorer operation regardless of the UI driving it.
//!
//! The facade normalizes inputs (free-form names to ids, 1-based slots to 0-based)
//! and returns `Result<CmdResult>`. It holds no business logic and does no I/O of its
//! own beyond what the session's provider and store do.
//!
//! ## Generic Over Provider and Store
//!
//! - Production: `DexApi<HttpProvider, FileStore>`
//! - Testing: `DexApi<MemProvider, InMemoryStore>`

use crate::commands::{self, CmdResult};
use crate::config::DexConfig;
use crate::error::{DexError, Result};
use crate::filter::FilterCriteria;
use crate::provider::DataProvider;
use crate::session::{Intent, Session, SessionOptions};
use crate::store::CollectionStore;

pub struct DexApi<P: DataProvider, S: CollectionStore> {
    session: Session<P, S>,
    config: DexConfig,
}

impl<P: DataProvider, S: CollectionStore> DexApi<P, S> {
    pub fn new(provider: P, store: S, config: DexConfig) -> Result<Self> {
        let session = Session::open(provider, store, SessionOptions::from(&config))?;
        Ok(Self { session, config })
    }

    pub fn session(&self) -> &Session<P, S> {
        &self.session
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Result<CmdResult> {
        self.session.dispatch(intent).await
    }

    /// Page `page` (1-based) of the default listing.
    pub async fn browse(&mut self, page: u32) -> Result<CmdResult> {
        commands::browse::listing(&mut self.session, page).await
    }

    /// Page `page` (1-based) of whatever list is active: the listing, a search result
    /// or filter matches.
    pub async fn goto(&mut self, page: u32) -> Result<CmdResult> {
        self.dispatch(Intent::Goto(page)).await
    }

    pub async fn next_page(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::Next).await
    }

    pub async fn prev_page(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::Prev).await
    }

    pub async fn search(&mut self, query: &str) -> Result<CmdResult> {
        self.dispatch(Intent::Search(query.to_string())).await
    }

    pub async fn filter(&mut self, criteria: FilterCriteria, page: u32) -> Result<CmdResult> {
        commands::filter::apply_at(&mut self.session, &criteria, page).await
    }

    pub async fn clear_filters(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ClearFilters).await
    }

    pub async fn show(&mut self, query: &str) -> Result<CmdResult> {
        let id = self.resolve_id(query).await?;
        self.dispatch(Intent::Open(id)).await
    }

    pub async fn categories(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ListCategories).await
    }

    pub async fn favorites(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ShowFavorites).await
    }

    pub async fn toggle_favorite(&mut self, query: &str) -> Result<CmdResult> {
        let id = self.resolve_id(query).await?;
        self.dispatch(Intent::ToggleFavorite(id)).await
    }

    pub async fn remove_favorite(&mut self, query: &str) -> Result<CmdResult> {
        let id = self.resolve_id(query).await?;
        self.dispatch(Intent::RemoveFavorite(id)).await
    }

    pub async fn clear_favorites(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ClearFavorites).await
    }

    pub async fn team(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ShowTeam).await
    }

    pub async fn add_to_team(&mut self, query: &str) -> Result<CmdResult> {
        let id = self.resolve_id(query).await?;
        self.dispatch(Intent::AddToTeam(id)).await
    }

    /// Removes the member in `slot`, counted from 1 as shown in the team grid.
    pub async fn remove_from_team(&mut self, slot: usize) -> Result<CmdResult> {
        let index = slot
            .checked_sub(1)
            .ok_or_else(|| DexError::InvalidInput("team slots start at 1".into()))?;
        self.dispatch(Intent::RemoveFromTeam(index)).await
    }

    pub async fn clear_team(&mut self) -> Result<CmdResult> {
        self.dispatch(Intent::ClearTeam).await
    }

    pub fn config(&self) -> Result<CmdResult> {
        Ok(CmdResult::default().with_config(self.config.clone()))
    }

    /// Numeric queries are taken as ids without a lookup; names go through the cache.
    /// Commands that add to a collection confirm the id exists themselves.
    async fn resolve_id(&mut self, query: &str) -> Result<u32> {
        let key = crate::provider::normalize_query(query)?;
        match key.parse::<u32>() {
            Ok(id) => Ok(id),
            Err(_) => self.session.resolve(&key).await.map(|r| r.id),
        }
    }
}
