use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DexError, Result};
use crate::provider::DataProvider;
use crate::session::Session;
use crate::store::CollectionStore;
use tracing::info;

/// The fixed-slot team grid.
pub fn show<P: DataProvider, S: CollectionStore>(session: &Session<P, S>) -> CmdResult {
    let slots = session
        .team
        .slots()
        .into_iter()
        .map(|slot| slot.cloned())
        .collect();
    CmdResult::default()
        .with_team(slots)
        .with_favorite_ids(session.favorites.ids().to_vec())
        .with_heading(format!(
            "Team ({}/{})",
            session.team.len(),
            session.team.limit()
        ))
}

/// A full team is reported before any lookup is made.
pub async fn add<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    id: u32,
) -> Result<CmdResult> {
    if let Err(e @ DexError::LimitExceeded { .. }) = session.team.ensure_room() {
        let mut result = show(session);
        result.add_message(CmdMessage::warning(e.to_string()));
        return Ok(result);
    }
    let record = session
        .cache
        .fetch(&session.provider, &id.to_string())
        .await?;
    let name = record.name.clone();
    let previous = session.team.clone();

    session.team.add(record)?;
    session.persist_team(previous)?;
    info!(id = id, size = session.team.len(), "team member added");

    let mut result = show(session);
    result.add_message(CmdMessage::success(format!("Added {} to the team", name)));
    Ok(result)
}

/// Removes the member in `slot` (0-based).
pub fn remove<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    slot: usize,
) -> Result<CmdResult> {
    let previous = session.team.clone();
    let removed = session.team.remove(slot)?;
    session.persist_team(previous)?;
    info!(slot = slot, id = removed.id, "team member removed");

    let mut result = show(session);
    result.add_message(CmdMessage::success(format!(
        "Removed {} from slot {}",
        removed.name,
        slot + 1
    )));
    Ok(result)
}

pub fn clear<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let previous = session.team.clone();
    session.team.clear();
    session.persist_team(previous)?;
    info!("team cleared");

    let mut result = show(session);
    result.add_message(CmdMessage::success("Team cleared"));
    Ok(result)
}
