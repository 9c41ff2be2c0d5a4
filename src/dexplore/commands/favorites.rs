use crate::collections::Toggled;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DexError, Result};
use crate::provider::DataProvider;
use crate::session::Session;
use crate::store::CollectionStore;
use tracing::info;

fn favorites_view<P: DataProvider, S: CollectionStore>(session: &Session<P, S>) -> CmdResult {
    CmdResult::default().with_favorite_ids(session.favorites.ids().to_vec())
}

/// Adding looks the creature up first (cache or provider), so an id that does not
/// exist never reaches storage. Removing stays offline.
pub async fn toggle<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    id: u32,
) -> Result<CmdResult> {
    if !session.favorites.contains(id) {
        if let Err(e @ DexError::LimitExceeded { .. }) = session.favorites.ensure_room() {
            let mut result = favorites_view(session);
            result.add_message(CmdMessage::warning(e.to_string()));
            return Ok(result);
        }
        session
            .cache
            .fetch(&session.provider, &id.to_string())
            .await?;
    }

    let previous = session.favorites.clone();
    let name = session.display_name(id);
    let outcome = session.favorites.toggle(id)?;
    session.persist_favorites(previous)?;
    info!(id = id, ?outcome, "favorites updated");

    let mut result = favorites_view(session);
    result.add_message(CmdMessage::success(match outcome {
        Toggled::Added => format!("★ Added {} to favorites", name),
        Toggled::Removed => format!("☆ Removed {} from favorites", name),
    }));
    Ok(result)
}

pub fn remove<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    id: u32,
) -> Result<CmdResult> {
    let previous = session.favorites.clone();
    let name = session.display_name(id);

    if !session.favorites.remove(id) {
        let mut result = favorites_view(session);
        result.add_message(CmdMessage::info(format!("{} is not a favorite", name)));
        return Ok(result);
    }
    session.persist_favorites(previous)?;
    info!(id = id, "favorite removed");

    let mut result = favorites_view(session);
    result.add_message(CmdMessage::success(format!("Removed {} from favorites", name)));
    Ok(result)
}

pub fn clear<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let previous = session.favorites.clone();
    let count = previous.len();
    session.favorites.clear();
    session.persist_favorites(previous)?;
    info!(count = count, "favorites cleared");

    let mut result = favorites_view(session);
    result.add_message(CmdMessage::success(format!("Cleared {} favorites", count)));
    Ok(result)
}

/// Resolves every favorite id to a record (cache first) for the favorites grid.
pub async fn list<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let ids = session.favorites.ids().to_vec();
    let records = session
        .cache
        .resolve_many(&session.provider, &ids)
        .await?;

    let heading = format!(
        "Favorites ({}/{})",
        session.favorites.len(),
        session.favorites.limit()
    );
    let mut result = favorites_view(session)
        .with_creatures(records)
        .with_heading(heading);
    if ids.is_empty() {
        result.add_message(CmdMessage::info("No favorites yet"));
    }
    Ok(result)
}
