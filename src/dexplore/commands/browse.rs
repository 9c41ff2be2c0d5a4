use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::provider::DataProvider;
use crate::session::Session;
use crate::store::CollectionStore;

pub async fn next<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let mut candidate = session.page.clone();
    if !candidate.next() {
        let mut result = session.page_view();
        result.add_message(CmdMessage::info("Already on the last page"));
        return Ok(result);
    }
    session.navigate(candidate).await
}

pub async fn prev<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let mut candidate = session.page.clone();
    if !candidate.prev() {
        let mut result = session.page_view();
        result.add_message(CmdMessage::info("Already on the first page"));
        return Ok(result);
    }
    session.navigate(candidate).await
}

pub async fn goto<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    page: u32,
) -> Result<CmdResult> {
    let mut candidate = session.page.clone();
    candidate.goto(page)?;
    session.navigate(candidate).await
}

/// Page `page` of the default listing, leaving any active search or filter.
pub async fn listing<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
    page: u32,
) -> Result<CmdResult> {
    let mut candidate = session.page.clone();
    candidate.enter_default();
    candidate.goto(page)?;
    session.navigate(candidate).await
}

pub async fn reload<P: DataProvider, S: CollectionStore>(
    session: &mut Session<P, S>,
) -> Result<CmdResult> {
    let candidate = session.page.clone();
    session.navigate(candidate).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::memory::fixtures::numbered_catalog;
    use crate::session::SessionOptions;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn goto_requests_the_matching_listing_offset() {
        let provider = numbered_catalog(100);
        let mut session =
            Session::open(provider, InMemoryStore::new(), SessionOptions::default()).unwrap();

        let result = goto(&mut session, 4).await.unwrap();

        assert_eq!(result.creatures.len(), 10);
        assert_eq!(result.creatures[0].id, 91);
        assert_eq!(
            session.provider().call_count("pokemon?offset=90&limit=30"),
            1
        );
        assert_eq!(result.heading.as_deref(), Some("Page 4 (last)"));
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let mut session = Session::open(
            numbered_catalog(10),
            InMemoryStore::new(),
            SessionOptions::default(),
        )
        .unwrap();

        let result = goto(&mut session, 3).await.unwrap();

        assert!(result.creatures.is_empty());
        assert!(!result.page.unwrap().has_next);
    }

    #[tokio::test]
    async fn prev_on_first_page_is_a_notice() {
        let mut session = Session::open(
            numbered_catalog(10),
            InMemoryStore::new(),
            SessionOptions::default(),
        )
        .unwrap();
        let result = prev(&mut session).await.unwrap();
        assert_eq!(result.messages.len(), 1);
        assert!(session.provider().calls().is_empty());
    }

    #[tokio::test]
    async fn cached_pages_are_not_refetched() {
        let mut session = Session::open(
            numbered_catalog(60),
            InMemoryStore::new(),
            SessionOptions::default(),
        )
        .unwrap();
        reload(&mut session).await.unwrap();
        next(&mut session).await.unwrap();
        prev(&mut session).await.unwrap();

        assert_eq!(session.provider().call_count("pokemon/"), 60);
        assert_eq!(session.provider().call_count("pokemon?"), 3);
    }
}
