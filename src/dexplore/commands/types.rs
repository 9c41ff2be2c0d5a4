use crate::commands::CmdResult;
use crate::error::Result;
use crate::provider::DataProvider;
use crate::session::Session;
use crate::store::CollectionStore;

/// Category names usable in a filter, sentinels excluded.
pub async fn run<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let categories = session
        .provider
        .categories()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    Ok(CmdResult::default().with_categories(categories))
}
