use crate::commands::CmdResult;
use crate::error::Result;
use crate::provider::DataProvider;
use crate::session::Session;
use crate::store::CollectionStore;

/// Full record for the detail view. Served from the cache when the record is already
/// on a page, in the team or among earlier lookups.
pub async fn run<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    id: u32,
) -> Result<CmdResult> {
    let record = session
        .cache
        .fetch(&session.provider, &id.to_string())
        .await?;
    Ok(CmdResult::default()
        .with_heading(record.name.clone())
        .with_detail(record)
        .with_favorite_ids(session.favorites.ids().to_vec()))
}
