//! Human-readable alert messages.
//!
//! Templates are plain text; [`escape`] makes them safe for the chat
//! transport's parse mode, target names included.

use crate::alert::event::{AlertEvent, AlertKind};
use crate::config::ParseMode;
use crate::registry::TargetKind;

/// Characters MarkdownV2 reserves outside entities.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Characters legacy Markdown reserves.
const MARKDOWN_RESERVED: &[char] = &['_', '*', '`', '['];

/// Render the chat message for an event in `mode`.
///
/// Proxies are named by role, URL targets by key. Outages carry the response
/// code; a reminder reads the same as the original outage message.
pub fn format_message(event: &AlertEvent, mode: ParseMode) -> String {
    let name = match event.target_kind {
        TargetKind::ExternalProxy => "External",
        TargetKind::InternalProxy => "Internal",
        TargetKind::GenericUrl => event.target_key.as_str(),
    };

    let text = match event.kind {
        AlertKind::Recovered => format!("[ + ] {}", name),
        AlertKind::WentDown | AlertKind::StillDown => {
            format!("[ - ] {} - {}", name, event.response_code)
        }
    };
    escape(&text, mode)
}

/// Escape plain text so the bot API renders it literally.
pub fn escape(text: &str, mode: ParseMode) -> String {
    match mode {
        ParseMode::MarkdownV2 => escape_chars(text, MARKDOWN_V2_RESERVED),
        ParseMode::Markdown => escape_chars(text, MARKDOWN_RESERVED),
        ParseMode::Html => text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
        ParseMode::Plain => text.to_string(),
    }
}

fn escape_chars(text: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if reserved.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
