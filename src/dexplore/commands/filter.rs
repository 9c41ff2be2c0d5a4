use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::FilterCriteria;
use crate::provider::DataProvider;
use crate::session::{load_page, Session};
use crate::store::CollectionStore;
use tracing::info;

/// Runs the filter and shows page 1 of the matches.
pub async fn apply<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    criteria: &FilterCriteria,
) -> Result<CmdResult> {
    let ticket = session.begin_load();
    let engine = session.engine;
    let ids = engine
        .run(&session.provider, &mut session.cache, criteria)
        .await?;
    info!(matches = ids.len(), "filter applied");

    let mut candidate = session.page.clone();
    candidate.enter_explicit(ids);
    let loaded = load_page(&session.provider, &mut session.cache, &candidate).await?;
    let empty = loaded.records.is_empty();
    session.commit(ticket, candidate, loaded);

    let mut result = session.page_view();
    if empty {
        result.add_message(CmdMessage::info("No Pokémon match these filters"));
    }
    Ok(result)
}

/// Like [`apply`], then jumps to `page` of the matches.
pub async fn apply_at<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    criteria: &FilterCriteria,
    page: u32,
) -> Result<CmdResult> {
    let result = apply(session, criteria).await?;
    if page == 1 {
        return Ok(result);
    }
    crate::commands::browse::goto(session, page).await
}

/// Drops any search or filter and goes back to page 1 of the default listing.
pub async fn clear<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let mut candidate = session.page.clone();
    candidate.enter_default();
    session.navigate(candidate).await
}
