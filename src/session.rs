//! Session codec: saves and restores the action log as JSON.
//!
//! The document shape is `{"history": [...], "historyIndex": n}`. Field names
//! follow the drawing files the web app has always written (`type` is `draw`,
//! `text` or `clear`; draw entries carry `isShape` and `isEnded`), so older
//! saves keep loading. Unknown fields are ignored and optional ones default.
//!
//! Loading is all-or-nothing: [`decode`] either returns a complete log or an
//! error, never a partial one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{Action, ActionId, Shape, Stroke, Text};
use crate::consts::{FALLBACK_COLOR, FALLBACK_SIZE};
use crate::geometry::Point;
use crate::history::ActionLog;
use crate::input::{Tool, ToolKind};

/// Why a session document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Not valid JSON (or serialization failed).
    #[error("session is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// `history` is absent or not an array.
    #[error("session has no history array")]
    MissingHistory,
    /// `historyIndex` is absent or not an integer.
    #[error("session historyIndex is missing or not an integer")]
    InvalidHistoryIndex,
    /// `historyIndex` points outside the history.
    #[error("session historyIndex {index} out of range for {len} entries")]
    IndexOutOfRange { index: i64, len: usize },
    /// An entry could not be turned into an action.
    #[error("history entry {index} is invalid: {reason}")]
    InvalidAction { index: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryType {
    Draw,
    Text,
    Clear,
}

/// One history entry as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    #[serde(rename = "type")]
    kind: EntryType,
    id: ActionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
    #[serde(default, alias = "filled", skip_serializing_if = "Option::is_none")]
    fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_shape: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_ended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl Entry {
    fn bare(kind: EntryType, id: ActionId) -> Self {
        Self {
            kind,
            id,
            tool: None,
            points: Vec::new(),
            stroke_color: None,
            fill_color: None,
            size: None,
            fill: None,
            is_shape: None,
            is_ended: None,
            text: None,
            position: None,
            color: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    history: &'a [Entry],
    history_index: i64,
}

// =============================================================
// Encode
// =============================================================

/// Serialize every entry (including the redo tail) and the cursor.
///
/// # Errors
///
/// Returns `Err` only if JSON serialization fails.
pub fn encode(log: &ActionLog) -> Result<String, SessionError> {
    let history: Vec<Entry> = log.entries().iter().map(entry_from_action).collect();
    let doc = Document { history: &history, history_index: log.history_index() };
    Ok(serde_json::to_string(&doc)?)
}

fn entry_from_action(action: &Action) -> Entry {
    match action {
        Action::Stroke(s) => Entry {
            tool: Some(Tool::from(s.tool).name().to_owned()),
            points: s.points.clone(),
            stroke_color: Some(s.stroke_color.clone()),
            fill_color: s.fill_color.clone(),
            size: Some(s.size),
            is_shape: Some(false),
            is_ended: Some(!s.open),
            ..Entry::bare(EntryType::Draw, s.id)
        },
        Action::Shape(s) => Entry {
            tool: Some(Tool::from(s.kind).name().to_owned()),
            points: s.points.to_vec(),
            stroke_color: Some(s.stroke_color.clone()),
            fill_color: s.fill_color.clone(),
            size: Some(s.size),
            fill: Some(s.filled),
            is_shape: Some(true),
            is_ended: Some(!s.open),
            ..Entry::bare(EntryType::Draw, s.id)
        },
        Action::Text(t) => Entry {
            text: Some(t.text.clone()),
            position: Some(t.position),
            color: Some(t.color.clone()),
            size: Some(t.size),
            ..Entry::bare(EntryType::Text, t.id)
        },
        Action::Clear { id } => Entry::bare(EntryType::Clear, *id),
    }
}

// =============================================================
// Decode
// =============================================================

/// Parse and validate a session document into a log.
///
/// Every action comes back sealed: nothing is mid-gesture after a load.
///
/// # Errors
///
/// Returns `Err` if the text is not JSON, `history` is not an array,
/// `historyIndex` is not an integer in `-1..len`, or any entry is malformed.
pub fn decode(text: &str) -> Result<ActionLog, SessionError> {
    let doc: Value = serde_json::from_str(text)?;
    let history = doc
        .get("history")
        .and_then(Value::as_array)
        .ok_or(SessionError::MissingHistory)?;
    let index = doc
        .get("historyIndex")
        .and_then(integer)
        .ok_or(SessionError::InvalidHistoryIndex)?;

    let actions = history
        .iter()
        .enumerate()
        .map(|(i, value)| {
            decode_entry(value).map_err(|reason| SessionError::InvalidAction { index: i, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let len = actions.len();
    let visible = usize::try_from(index.saturating_add(1)).map_err(|_| SessionError::IndexOutOfRange { index, len })?;
    ActionLog::from_parts(actions, visible).ok_or(SessionError::IndexOutOfRange { index, len })
}

/// An integral JSON number (`3` or `3.0`).
#[allow(clippy::cast_possible_truncation)]
fn integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

fn decode_entry(value: &Value) -> Result<Action, String> {
    let entry = Entry::deserialize(value).map_err(|e| e.to_string())?;
    match entry.kind {
        EntryType::Clear => Ok(Action::Clear { id: entry.id }),
        EntryType::Text => decode_text(entry),
        EntryType::Draw => decode_draw(entry),
    }
}

fn decode_text(entry: Entry) -> Result<Action, String> {
    let text = entry.text.ok_or("text entry has no text")?;
    let position = entry.position.ok_or("text entry has no position")?;
    let color = entry
        .color
        .or(entry.stroke_color)
        .unwrap_or_else(|| FALLBACK_COLOR.to_owned());
    Ok(Action::Text(Text {
        id: entry.id,
        text,
        position,
        color,
        size: entry.size.unwrap_or(FALLBACK_SIZE),
    }))
}

fn decode_draw(entry: Entry) -> Result<Action, String> {
    let name = entry.tool.ok_or("draw entry has no tool")?;
    let tool: Tool = name.parse().map_err(|e: crate::input::UnknownTool| e.to_string())?;
    let stroke_color = entry.stroke_color.unwrap_or_else(|| FALLBACK_COLOR.to_owned());
    let size = entry.size.unwrap_or(FALLBACK_SIZE);

    match tool.kind() {
        ToolKind::Freehand(tool) => Ok(Action::Stroke(Stroke {
            id: entry.id,
            tool,
            points: entry.points,
            stroke_color,
            fill_color: entry.fill_color,
            size,
            open: false,
        })),
        ToolKind::Shape(kind) => {
            let points: [Point; 2] = entry
                .points
                .try_into()
                .map_err(|p: Vec<Point>| format!("shape needs 2 points, got {}", p.len()))?;
            Ok(Action::Shape(Shape {
                id: entry.id,
                kind,
                points,
                stroke_color,
                filled: entry.fill.unwrap_or(entry.fill_color.is_some()),
                fill_color: entry.fill_color,
                size,
                open: false,
            }))
        }
        ToolKind::Text => Err("text tool cannot appear in a draw entry".to_owned()),
    }
}
