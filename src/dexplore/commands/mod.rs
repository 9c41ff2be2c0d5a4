//! # Commands
//!
//! One module per user-facing operation. Every command takes the [`Session`] it acts
//! on and returns a [`CmdResult`]: the data to render plus leveled messages. Commands
//! never print; turning a `CmdResult` into terminal output is the CLI's job.
//!
//! Capacity limits are not errors at this level. A rejected favorite or team addition
//! comes back as a successful `CmdResult` carrying a [`MessageLevel::Warning`], with
//! the collection untouched.
//!
//! [`Session`]: crate::session::Session

use crate::config::DexConfig;
use crate::model::CreatureRecord;
use crate::pagination::PageInfo;

pub mod browse;
pub mod detail;
pub mod favorites;
pub mod filter;
pub mod search;
pub mod team;
pub mod types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records for the card grid, in display order.
    pub creatures: Vec<CreatureRecord>,
    pub page: Option<PageInfo>,
    /// Caption above the grid: `Page 2`, `Result: pikachu`, `Favorites (3/30)`.
    pub heading: Option<String>,
    pub detail: Option<CreatureRecord>,
    /// Fixed-slot team view, `None` entries are vacant slots.
    pub team: Option<Vec<Option<CreatureRecord>>>,
    /// Current favorites, for the card and detail markers.
    pub favorite_ids: Vec<u32>,
    pub categories: Vec<String>,
    pub config: Option<DexConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_creatures(mut self, creatures: Vec<CreatureRecord>) -> Self {
        self.creatures = creatures;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_detail(mut self, record: CreatureRecord) -> Self {
        self.detail = Some(record);
        self
    }

    pub fn with_team(mut self, slots: Vec<Option<CreatureRecord>>) -> Self {
        self.team = Some(slots);
        self
    }

    pub fn with_favorite_ids(mut self, ids: Vec<u32>) -> Self {
        self.favorite_ids = ids;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_config(mut self, config: DexConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorite_ids.contains(&id)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
