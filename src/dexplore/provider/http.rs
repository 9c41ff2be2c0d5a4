use super::{member_set, without_sentinels, DataProvider};
use crate::error::{DexError, Result};
use crate::model::{CreatureRecord, ListingPage, MemberSet, NamedResource};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Deserialize)]
struct MemberRef {
    pokemon: NamedResource,
}

/// Shape shared by `/type/{name}` and `/ability/{name}`.
#[derive(Deserialize)]
struct MembersPayload {
    name: String,
    #[serde(default)]
    pokemon: Vec<MemberRef>,
}

#[derive(Deserialize)]
struct MovePayload {
    name: String,
    #[serde(default)]
    learned_by_pokemon: Vec<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct CategoryIndex {
    #[serde(default)]
    results: Vec<NamedResource>,
}

/// Provider backed by the live REST API.
pub struct HttpProvider {
    client: reqwest::Client,
    base: String,
}

impl HttpProvider {
    pub fn new(base: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        kind: &'static str,
        key: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        if let Some(err) = status_error(response.status(), &url, kind, key) {
            return Err(err);
        }
        let body = response.bytes().await?;
        decode_body(&url, &body)
    }

    async fn members(&self, path: &str, kind: &'static str, name: &str) -> Result<MemberSet> {
        let payload: MembersPayload = self.get_json(path, kind, name).await?;
        Ok(member_set(
            &payload.name,
            payload.pokemon.iter().map(|m| m.pokemon.url.as_str()),
        ))
    }
}

/// 404 is `NotFound`, any other non-success status is `Network`.
fn status_error(status: StatusCode, url: &str, kind: &'static str, key: &str) -> Option<DexError> {
    match status {
        status if status.is_success() => None,
        StatusCode::NOT_FOUND => Some(DexError::not_found(kind, key)),
        status => Some(DexError::Network(format!("{} returned {}", url, status))),
    }
}

/// A body that does not match the expected shape is a transport failure, not a
/// serialization bug on our side.
fn decode_body<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| DexError::Network(format!("{} sent an unreadable body: {}", url, e)))
}

#[async_trait(?Send)]
impl DataProvider for HttpProvider {
    async fn list_page(&self, offset: u32, limit: u32) -> Result<ListingPage> {
        let path = format!("pokemon?offset={}&limit={}", offset, limit);
        self.get_json(&path, "listing", &format!("offset {}", offset))
            .await
    }

    async fn creature(&self, id_or_name: &str) -> Result<CreatureRecord> {
        self.get_json(&format!("pokemon/{}", id_or_name), "Pokémon", id_or_name)
            .await
    }

    async fn category(&self, name: &str) -> Result<MemberSet> {
        self.members(&format!("type/{}", name), "Type", name).await
    }

    async fn categories(&self) -> Result<Vec<NamedResource>> {
        let index: CategoryIndex = self.get_json("type?limit=100", "type index", "all").await?;
        Ok(without_sentinels(index.results))
    }

    async fn ability(&self, name: &str) -> Result<MemberSet> {
        self.members(&format!("ability/{}", name), "Ability", name)
            .await
    }

    async fn move_learners(&self, name: &str) -> Result<MemberSet> {
        let payload: MovePayload = self
            .get_json(&format!("move/{}", name), "Move", name)
            .await?;
        Ok(member_set(
            &payload.name,
            payload.learned_by_pokemon.iter().map(|p| p.url.as_str()),
        ))
    }
}
