use crate::commands::CmdResult;
use crate::error::Result;
use crate::provider::DataProvider;
use crate::session::{LoadedPage, Session};
use crate::store::CollectionStore;

/// Exact lookup by name or id. The single match becomes a one-entry explicit list, so
/// both navigation directions are disabled.
pub async fn run<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    query: &str,
) -> Result<CmdResult> {
    let ticket = session.begin_load();
    let record = session.resolve(query).await?;

    let mut candidate = session.page.clone();
    candidate.enter_explicit(vec![record.id]);
    let heading = format!("Result: {}", record.name);
    session.commit(
        ticket,
        candidate,
        LoadedPage {
            records: vec![record],
            listing_total: None,
            heading: Some(heading),
        },
    );
    Ok(session.page_view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DexError;
    use crate::provider::memory::fixtures::starter_catalog;
    use crate::session::SessionOptions;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn numeric_queries_work_too() {
        let mut session =
            Session::open(starter_catalog(), InMemoryStore::new(), SessionOptions::default())
                .unwrap();
        let result = run(&mut session, "7").await.unwrap();
        assert_eq!(result.heading.as_deref(), Some("Result: squirtle"));
    }

    #[tokio::test]
    async fn blank_query_is_rejected_without_a_request() {
        let mut session =
            Session::open(starter_catalog(), InMemoryStore::new(), SessionOptions::default())
                .unwrap();
        let err = run(&mut session, "   ").await.unwrap_err();
        assert!(matches!(err, DexError::InvalidInput(_)));
        assert!(session.provider().calls().is_empty());
    }
}
