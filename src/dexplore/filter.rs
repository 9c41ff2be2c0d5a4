//! # Filter Engine
//!
//! Narrows the catalog by category, ability, move and effort yield.
//!
//! ## Algorithm
//!
//! 1. Each category contributes its member set; sets are intersected in order. The
//!    first set becomes the running candidate set.
//! 2. An ability, then a move, intersect the same way. These two lookups are
//!    **fail-closed**: if the provider cannot resolve the name (or the request fails
//!    for any other reason) the candidate set becomes empty. A mistyped ability empties
//!    the result instead of being silently ignored.
//! 3. With no constraint at all the candidates are the whole catalog (see
//!    [`Universe`]).
//! 4. An effort-yield stat fetches full records for every candidate in sequential
//!    batches and keeps those yielding a positive effort in that stat.
//!
//! Category and catalog listing failures abort the whole run.
//!
//! Results are always in ascending id order.

use crate::cache::CreatureCache;
use crate::error::{DexError, Result};
use crate::model::EffortStat;
use crate::provider::{id_from_url, DataProvider};
use std::collections::BTreeSet;
use tracing::{debug, warn};

pub const MAX_FILTER_CATEGORIES: usize = 2;
pub const DEFAULT_DETAIL_BATCH_SIZE: usize = 80;

/// User-supplied constraints. Names are stored trimmed and lower-cased; blank input
/// means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub categories: Vec<String>,
    pub ability: Option<String>,
    pub move_name: Option<String>,
    pub effort_stat: Option<EffortStat>,
}

fn normalized(raw: &str) -> Option<String> {
    let value = raw.trim().to_lowercase();
    (!value.is_empty()).then_some(value)
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, name: &str) -> Self {
        if let Some(name) = normalized(name) {
            self.categories.push(name);
        }
        self
    }

    pub fn with_ability(mut self, name: &str) -> Self {
        self.ability = normalized(name);
        self
    }

    pub fn with_move(mut self, name: &str) -> Self {
        self.move_name = normalized(name);
        self
    }

    pub fn with_effort_stat(mut self, stat: EffortStat) -> Self {
        self.effort_stat = Some(stat);
        self
    }

    /// True when no constraint of any kind was given.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.ability.is_none()
            && self.move_name.is_none()
            && self.effort_stat.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.len() > MAX_FILTER_CATEGORIES {
            return Err(DexError::InvalidInput(format!(
                "at most {} types can be combined",
                MAX_FILTER_CATEGORIES
            )));
        }
        Ok(())
    }
}

/// Candidate set used when no set constraint was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Universe {
    /// Ids `1..=n`. Will under-cover the catalog once the provider grows past `n`.
    Fixed(u32),
    /// Every id in the provider's sequential listing, fetched at filter time.
    Listing,
}

#[derive(Debug, Clone, Copy)]
pub struct FilterEngine {
    pub universe: Universe,
    pub detail_batch_size: usize,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self {
            universe: Universe::Listing,
            detail_batch_size: DEFAULT_DETAIL_BATCH_SIZE,
        }
    }
}

fn narrow(candidates: Option<BTreeSet<u32>>, set: BTreeSet<u32>) -> BTreeSet<u32> {
    match candidates {
        Some(current) => current.intersection(&set).copied().collect(),
        None => set,
    }
}

impl FilterEngine {
    pub fn new(universe: Universe, detail_batch_size: usize) -> Self {
        Self {
            universe,
            detail_batch_size: detail_batch_size.max(1),
        }
    }

    /// Runs the filter and returns the matching ids in ascending order.
    pub async fn run<P>(
        &self,
        provider: &P,
        cache: &mut CreatureCache,
        criteria: &FilterCriteria,
    ) -> Result<Vec<u32>>
    where
        P: DataProvider + ?Sized,
    {
        criteria.validate()?;

        let mut candidates: Option<BTreeSet<u32>> = None;

        for name in &criteria.categories {
            let members = provider.category(name).await?;
            candidates = Some(narrow(candidates, members.ids));
        }

        if let Some(ability) = &criteria.ability {
            candidates = Some(match provider.ability(ability).await {
                Ok(members) => narrow(candidates, members.ids),
                Err(e) => {
                    warn!(ability = %ability, error = %e, "ability lookup failed, no matches");
                    BTreeSet::new()
                }
            });
        }

        if let Some(move_name) = &criteria.move_name {
            candidates = Some(match provider.move_learners(move_name).await {
                Ok(members) => narrow(candidates, members.ids),
                Err(e) => {
                    warn!(move_name = %move_name, error = %e, "move lookup failed, no matches");
                    BTreeSet::new()
                }
            });
        }

        let candidates = match candidates {
            Some(set) => set,
            None => self.universe_ids(provider).await?,
        };
        debug!(candidates = candidates.len(), "set constraints applied");

        let Some(stat) = criteria.effort_stat else {
            return Ok(candidates.into_iter().collect());
        };
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<u32> = candidates.into_iter().collect();
        let records = cache
            .resolve_batched(provider, &ids, self.detail_batch_size)
            .await?;

        let mut matched: Vec<u32> = records
            .into_iter()
            .filter(|r| r.effort_for(stat).is_some_and(|effort| effort > 0))
            .map(|r| r.id)
            .collect();
        matched.sort_unstable();
        matched.dedup();
        Ok(matched)
    }

    async fn universe_ids<P>(&self, provider: &P) -> Result<BTreeSet<u32>>
    where
        P: DataProvider + ?Sized,
    {
        match self.universe {
            Universe::Fixed(ceiling) => Ok((1..=ceiling).collect()),
            Universe::Listing => {
                let first = provider.list_page(0, 1).await?;
                let listing = provider.list_page(0, first.count).await?;
                Ok(listing
                    .results
                    .iter()
                    .filter_map(|entry| id_from_url(&entry.url))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::fixtures::starter_catalog;

    async fn run(engine: FilterEngine, criteria: FilterCriteria) -> Result<Vec<u32>> {
        let provider = starter_catalog();
        let mut cache = CreatureCache::new();
        engine.run(&provider, &mut cache, &criteria).await
    }

    #[tokio::test]
    async fn two_categories_intersect() {
        let criteria = FilterCriteria::new()
            .with_category("grass")
            .with_category("poison");
        let ids = run(FilterEngine::default(), criteria).await.unwrap();
        assert_eq!(ids, vec![1, 2, 3, 43]);
        assert!(!ids.contains(&4));
    }

    #[tokio::test]
    async fn disjoint_categories_yield_nothing() {
        let criteria = FilterCriteria::new()
            .with_category("grass")
            .with_category("fire");
        assert!(run(FilterEngine::default(), criteria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_category_inputs_are_ignored() {
        let criteria = FilterCriteria::new()
            .with_category("  ")
            .with_category(" FIRE ");
        assert_eq!(criteria.categories, vec!["fire"]);
        assert_eq!(run(FilterEngine::default(), criteria).await.unwrap(), vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn unresolvable_ability_yields_empty_result() {
        let criteria = FilterCriteria::new()
            .with_category("grass")
            .with_ability("not-an-ability");
        assert_eq!(run(FilterEngine::default(), criteria).await.unwrap(), Vec::<u32>::new());
    }

    #[tokio::test]
    async fn ability_network_failure_is_also_fail_closed() {
        let provider = starter_catalog().failing("ability/blaze");
        let mut cache = CreatureCache::new();
        let criteria = FilterCriteria::new().with_ability("blaze");
        let ids = FilterEngine::default()
            .run(&provider, &mut cache, &criteria)
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn ability_alone_seeds_candidates() {
        let criteria = FilterCriteria::new().with_ability("blaze");
        assert_eq!(run(FilterEngine::default(), criteria).await.unwrap(), vec![4, 5, 6]);
    }

    #[tokio::test]
    async fn move_narrows_categories() {
        let criteria = FilterCriteria::new()
            .with_category("poison")
            .with_move("razor-leaf");
        assert_eq!(run(FilterEngine::default(), criteria).await.unwrap(), vec![1, 2, 3, 43]);

        let criteria = FilterCriteria::new()
            .with_category("fire")
            .with_move("razor-leaf");
        assert!(run(FilterEngine::default(), criteria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_move_yields_empty_result() {
        let criteria = FilterCriteria::new().with_move("splashy-splash");
        assert!(run(FilterEngine::default(), criteria).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_failure_aborts() {
        let provider = starter_catalog();
        let mut cache = CreatureCache::new();
        let criteria = FilterCriteria::new().with_category("cosmic");
        let err = FilterEngine::default()
            .run(&provider, &mut cache, &criteria)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn no_constraints_fixed_universe_is_full_range() {
        let ids = run(FilterEngine::new(Universe::Fixed(1010), 80), FilterCriteria::new())
            .await
            .unwrap();
        assert_eq!(ids.len(), 1010);
        assert_eq!(ids.first(), Some(&1));
        assert_eq!(ids.last(), Some(&1010));
    }

    #[tokio::test]
    async fn no_constraints_listing_universe_follows_provider() {
        let provider = starter_catalog();
        let mut cache = CreatureCache::new();
        let ids = FilterEngine::default()
            .run(&provider, &mut cache, &FilterCriteria::new())
            .await
            .unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 10, 43]);
        assert_eq!(provider.call_count("pokemon?"), 2);
    }

    #[tokio::test]
    async fn effort_stat_keeps_positive_yields_only() {
        let criteria = FilterCriteria::new()
            .with_category("grass")
            .with_effort_stat(EffortStat::SpecialDefense);
        assert_eq!(run(FilterEngine::default(), criteria).await.unwrap(), vec![2, 3]);
    }

    #[tokio::test]
    async fn effort_stat_over_whole_catalog_uses_batches() {
        let provider = starter_catalog();
        let mut cache = CreatureCache::new();
        let criteria = FilterCriteria::new().with_effort_stat(EffortStat::Speed);
        let ids = FilterEngine::new(Universe::Listing, 2)
            .run(&provider, &mut cache, &criteria)
            .await
            .unwrap();
        assert_eq!(ids, vec![4, 5]);
        assert_eq!(cache.len(), 9);
    }

    #[tokio::test]
    async fn empty_candidates_skip_detail_fetches() {
        let provider = starter_catalog();
        let mut cache = CreatureCache::new();
        let criteria = FilterCriteria::new()
            .with_ability("nope")
            .with_effort_stat(EffortStat::Hp);
        let ids = FilterEngine::default()
            .run(&provider, &mut cache, &criteria)
            .await
            .unwrap();
        assert!(ids.is_empty());
        assert_eq!(provider.call_count("pokemon/"), 0);
    }

    #[tokio::test]
    async fn detail_failure_during_effort_filter_aborts() {
        let provider = starter_catalog().failing("pokemon/5");
        let mut cache = CreatureCache::new();
        let criteria = FilterCriteria::new()
            .with_category("fire")
            .with_effort_stat(EffortStat::Speed);
        assert!(FilterEngine::default()
            .run(&provider, &mut cache, &criteria)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn more_than_two_categories_is_rejected() {
        let criteria = FilterCriteria::new()
            .with_category("grass")
            .with_category("poison")
            .with_category("fire");
        let err = run(FilterEngine::default(), criteria).await.unwrap_err();
        assert!(matches!(err, DexError::InvalidInput(_)));
    }

    #[test]
    fn empty_criteria_detection() {
        assert!(FilterCriteria::new().with_category(" ").is_empty());
        assert!(!FilterCriteria::new()
            .with_effort_stat(EffortStat::Hp)
            .is_empty());
    }
}
