//! # Rendering
//!
//! Turns `CmdResult`s into terminal text. Layout math (column widths, truncation,
//! padding) is Unicode-width aware; colors come from `colored` and are only applied
//! when the terminal supports them.
//!
//! Every public `render_*` function has an `_internal` twin taking an explicit color
//! switch so tests can assert on plain text.

use colored::{ColoredString, Colorize};
use dexplore::commands::{CmdMessage, CmdResult, MessageLevel};
use dexplore::config::DexConfig;
use dexplore::model::CreatureRecord;
use dexplore::pagination::PageInfo;
use unicode_width::UnicodeWidthStr;

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 7;
const NAME_WIDTH: usize = 22;
const FAVORITE_MARKER: &str = "★";
const NOT_FAVORITE_MARKER: &str = "☆";

fn use_color() -> bool {
    console::colors_enabled()
}

fn line_width() -> usize {
    console::Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(LINE_WIDTH)
        .min(LINE_WIDTH)
}

fn paint(text: &str, color: bool, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn format_id(id: u32) -> String {
    format!("#{:04}", id)
}

fn pad_to(s: &str, width: usize) -> String {
    let shown = truncate_to_width(s, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Renders everything a result carries, in a fixed order: heading, cards, detail,
/// team, categories, config, navigation, messages.
pub fn render_result(result: &CmdResult) -> String {
    render_result_internal(result, use_color(), line_width())
}

fn render_result_internal(result: &CmdResult, color: bool, width: usize) -> String {
    let mut out = String::new();

    if let Some(heading) = &result.heading {
        if result.detail.is_none() && result.team.is_none() {
            out.push_str(&paint(heading, color, |s| s.bold()));
            out.push('\n');
        }
    }
    if result.page.is_some() || !result.creatures.is_empty() {
        out.push_str(&render_cards_internal(result, color, width));
    }
    if let Some(record) = &result.detail {
        out.push_str(&render_detail_internal(
            record,
            result.is_favorite(record.id),
            color,
        ));
    }
    if let Some(slots) = &result.team {
        if let Some(heading) = &result.heading {
            out.push_str(&paint(heading, color, |s| s.bold()));
            out.push('\n');
        }
        out.push_str(&render_team_internal(slots, color));
    }
    if !result.categories.is_empty() {
        out.push_str(&render_categories(&result.categories));
    }
    if let Some(config) = &result.config {
        out.push_str(&render_config(config));
    }
    if let Some(info) = &result.page {
        out.push_str(&render_nav_internal(info, color));
    }
    out.push_str(&render_messages_internal(&result.messages, color));
    out
}

fn render_cards_internal(result: &CmdResult, color: bool, width: usize) -> String {
    if result.creatures.is_empty() {
        return format!("{}\n", paint("No Pokémon to show.", color, |s| s.dimmed()));
    }

    // id, gap, name, gap, categories, gap, marker
    let categories_width = width.saturating_sub(ID_WIDTH + NAME_WIDTH + 8).max(10);

    let mut out = String::new();
    for record in &result.creatures {
        let marker = if result.is_favorite(record.id) {
            paint(FAVORITE_MARKER, color, |s| s.yellow())
        } else {
            paint(NOT_FAVORITE_MARKER, color, |s| s.dimmed())
        };
        let categories = record.category_names().join("/");
        out.push_str(&format!(
            "  {}  {}  {}  {}\n",
            paint(&pad_to(&format_id(record.id), ID_WIDTH), color, |s| s.dimmed()),
            paint(&pad_to(&record.name, NAME_WIDTH), color, |s| s.bold()),
            paint(&pad_to(&categories, categories_width), color, |s| s.cyan()),
            marker
        ));
    }
    out
}

fn render_nav_internal(info: &PageInfo, color: bool) -> String {
    let prev = if info.has_prev {
        "◀ prev".to_string()
    } else {
        paint("◀ prev", color, |s| s.dimmed())
    };
    let next = if info.has_next {
        "next ▶".to_string()
    } else {
        paint("next ▶", color, |s| s.dimmed())
    };
    let total = info
        .total
        .map(|t| format!(" of {}", t))
        .unwrap_or_default();
    format!("\n  {}   {}{}   {}\n", prev, info.label(), total, next)
}

fn render_detail_internal(record: &CreatureRecord, favorite: bool, color: bool) -> String {
    let mut out = String::new();
    let marker = if favorite {
        paint(&format!("{} Favorite", FAVORITE_MARKER), color, |s| s.yellow())
    } else {
        format!("{} Favorite", NOT_FAVORITE_MARKER)
    };
    out.push_str(&format!(
        "{}  {}  {}\n",
        paint(&record.name, color, |s| s.bold()),
        paint(&format_id(record.id), color, |s| s.dimmed()),
        marker
    ));
    out.push_str(&format!("Types: {}\n", record.category_names().join(", ")));
    out.push_str(&format!("Abilities: {}\n", record.ability_names().join(", ")));
    out.push_str("Stats:\n");
    for stat in &record.stats {
        out.push_str(&format!("  {}: {}\n", stat.stat.name, stat.base_stat));
    }

    let yields = record.effort_yields();
    if yields.is_empty() {
        out.push_str("EV yield: 0\n");
    } else {
        let parts: Vec<String> = yields
            .iter()
            .map(|(stat, effort)| format!("{} +{}", stat, effort))
            .collect();
        out.push_str(&format!("EV yield: {}\n", parts.join(", ")));
    }

    if let Some(url) = record.primary_sprite() {
        out.push_str(&format!("Sprite: {}\n", url));
    }
    if let Some(url) = record.animated_sprite() {
        out.push_str(&format!("Animated: {}\n", url));
    }
    out
}

fn render_team_internal(slots: &[Option<CreatureRecord>], color: bool) -> String {
    let mut out = String::new();
    for (i, slot) in slots.iter().enumerate() {
        let line = match slot {
            Some(record) => format!(
                "  {}. {}  {}  {}",
                i + 1,
                paint(&pad_to(&record.name, NAME_WIDTH), color, |s| s.bold()),
                paint(&pad_to(&format_id(record.id), ID_WIDTH), color, |s| s.dimmed()),
                record.category_names().join("/")
            ),
            None => format!("  {}. {}", i + 1, paint("Empty", color, |s| s.dimmed())),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_categories(categories: &[String]) -> String {
    categories.iter().map(|c| format!("{}\n", c)).collect()
}

fn render_config(config: &DexConfig) -> String {
    let ceiling = config
        .catalog_ceiling
        .map(|c| c.to_string())
        .unwrap_or_else(|| "none (live listing)".to_string());
    [
        format!("api_base = {}", config.api_base),
        format!("page_size = {}", config.page_size),
        format!("detail_batch_size = {}", config.detail_batch_size),
        format!("catalog_ceiling = {}", ceiling),
        format!("favorites_limit = {}", config.favorites_limit()),
        format!("team_limit = {}", config.team_limit()),
        format!("user_agent = {}", config.user_agent),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

fn render_messages_internal(messages: &[CmdMessage], color: bool) -> String {
    messages
        .iter()
        .map(|m| {
            let text = match m.level {
                MessageLevel::Info => paint(&m.content, color, |s| s.dimmed()),
                MessageLevel::Success => paint(&m.content, color, |s| s.green()),
                MessageLevel::Warning => paint(&m.content, color, |s| s.yellow()),
                MessageLevel::Error => paint(&m.content, color, |s| s.red()),
            };
            format!("{}\n", text)
        })
        .collect()
}

pub fn print_result(result: &CmdResult) {
    let output = render_result(result);
    if !output.is_empty() {
        print!("{}", output);
    }
}
