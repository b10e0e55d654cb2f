use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::action::{Action, ActionId, IdGen, Shape, Stroke, Text, now_ms};
use crate::config::Config;
use crate::consts::EXPORT_MIME;
use crate::geometry::Point;
use crate::history::ActionLog;
use crate::input::{InputState, StyleState, Tool, ToolKind};
use crate::render;
use crate::session::{self, SessionError};
use crate::surface::{RenderError, Surface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The visible drawing changed; call render.
    RenderNeeded,
    /// Show this CSS cursor over the canvas.
    SetCursor(String),
    /// Open a text input box at `anchor`.
    BeginTextEdit { anchor: Point },
    /// Close the text input box.
    EndTextEdit,
    /// Undo/redo availability may have changed.
    HistoryChanged { can_undo: bool, can_redo: bool },
}

impl Effect {
    /// Whether the host's text input box should open or close.
    #[must_use]
    pub fn touches_text_box(&self) -> bool {
        matches!(self, Self::BeginTextEdit { .. } | Self::EndTextEdit)
    }
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub log: ActionLog,
    pub style: StyleState,
    pub input: InputState,
    pub config: Config,
    ids: IdGen,
    clock: fn() -> u64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            log: ActionLog::new(),
            style: StyleState::from_config(&config),
            input: InputState::Idle,
            config,
            ids: IdGen::default(),
            clock: now_ms,
        }
    }

    // --- Style ---

    /// Switch tools. An in-progress stroke or shape is committed as though the
    /// pointer were released; pending text is committed when leaving the text tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        if tool != Tool::Text {
            self.end_text_edit(&mut effects);
        }
        if self.style.tool != tool {
            debug!("tool: {} -> {}", self.style.tool.name(), tool.name());
        }
        self.style.tool = tool;
        effects.push(Effect::SetCursor(tool.css_cursor().to_owned()));
        effects
    }

    pub fn set_stroke_color(&mut self, color: &str) {
        color.clone_into(&mut self.style.stroke_color);
    }

    /// Set the fill color. Empty, `none` and `transparent` disable fill.
    pub fn set_fill_color(&mut self, color: &str) {
        self.style.fill_color = match color.trim() {
            "" | "none" | "transparent" => None,
            c => Some(c.to_owned()),
        };
    }

    /// Set the slider brush size, clamped into the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.style.brush_size = self.config.clamp_brush_size(size);
    }

    // --- Gestures ---

    /// Pointer-down. Ignored if the point is not finite.
    pub fn start_action(&mut self, point: Point) -> Vec<Effect> {
        if !point.is_finite() {
            warn!("start_action: ignoring non-finite point {point:?}");
            return Vec::new();
        }
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);

        match self.style.tool.kind() {
            ToolKind::Text => {
                self.end_text_edit(&mut effects);
                self.input = InputState::TextEditing { anchor: point, buffer: String::new() };
                effects.push(Effect::BeginTextEdit { anchor: point });
            }
            ToolKind::Freehand(tool) => {
                self.end_text_edit(&mut effects);
                let stroke = Stroke {
                    id: self.next_id(),
                    tool,
                    points: vec![point],
                    stroke_color: self.style.stroke_color.clone(),
                    fill_color: self.style.fill_color.clone(),
                    size: self.style.stroke_size(tool, &self.config),
                    open: true,
                };
                self.log.begin_open(Action::Stroke(stroke));
                self.input = InputState::DrawingStroke;
                debug!("gesture: stroke started with {}", self.style.tool.name());
                effects.push(self.history_changed());
                effects.push(Effect::RenderNeeded);
            }
            ToolKind::Shape(kind) => {
                self.end_text_edit(&mut effects);
                let shape = Shape {
                    id: self.next_id(),
                    kind,
                    points: [point, point],
                    stroke_color: self.style.stroke_color.clone(),
                    filled: self.style.fill_color.is_some(),
                    fill_color: self.style.fill_color.clone(),
                    size: self.style.brush_size,
                    open: true,
                };
                self.input = InputState::DrawingShape { shape };
                debug!("gesture: {} started", self.style.tool.name());
                effects.push(Effect::RenderNeeded);
            }
        }
        effects
    }

    /// Pointer-move. Extends the open stroke or drags the shape's second point.
    pub fn update_action(&mut self, point: Point) -> Vec<Effect> {
        if !point.is_finite() {
            warn!("update_action: ignoring non-finite point {point:?}");
            return Vec::new();
        }
        let changed = match &mut self.input {
            InputState::DrawingStroke => {
                let mut pushed = false;
                self.log.mutate_open_tail(|action| {
                    if let Action::Stroke(stroke) = action {
                        pushed = stroke.push_point(point);
                    }
                });
                pushed
            }
            InputState::DrawingShape { shape } => {
                shape.drag_to(point);
                true
            }
            InputState::Idle | InputState::TextEditing { .. } => false,
        };
        if changed { vec![Effect::RenderNeeded] } else { Vec::new() }
    }

    /// Pointer-up, leave, or cancel. Seals the gesture and returns to idle.
    pub fn end_action(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        effects
    }

    /// Keep the pending text buffer in sync with the host's input box.
    pub fn update_text(&mut self, text: &str) {
        if let InputState::TextEditing { buffer, .. } = &mut self.input {
            text.clone_into(buffer);
        }
    }

    /// Commit `text` at `point` (if non-empty) and close any text box.
    pub fn submit_text(&mut self, text: &str, point: Point) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        if matches!(self.input, InputState::TextEditing { .. }) {
            self.input = InputState::Idle;
            effects.push(Effect::EndTextEdit);
        }
        if !point.is_finite() {
            warn!("submit_text: ignoring non-finite point {point:?}");
            return effects;
        }
        if !text.is_empty() {
            self.commit_text(text.to_owned(), point);
            effects.push(self.history_changed());
            effects.push(Effect::RenderNeeded);
        }
        effects
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        if self.log.undo() {
            effects.push(self.history_changed());
            effects.push(Effect::RenderNeeded);
        }
        effects
    }

    pub fn redo(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        if self.log.redo() {
            effects.push(self.history_changed());
            effects.push(Effect::RenderNeeded);
        }
        effects
    }

    /// Append an undoable clear.
    pub fn clear(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finish_drawing(&mut effects);
        let id = self.next_id();
        self.log.append(Action::Clear { id });
        effects.push(self.history_changed());
        effects.push(Effect::RenderNeeded);
        effects
    }

    /// Drop all history and any gesture in progress.
    pub fn new_document(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if matches!(self.input, InputState::TextEditing { .. }) {
            effects.push(Effect::EndTextEdit);
        }
        self.input = InputState::Idle;
        self.log = ActionLog::new();
        info!("document: new");
        effects.push(self.history_changed());
        effects.push(Effect::RenderNeeded);
        effects
    }

    // --- Session ---

    /// Encode the log as a session document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if JSON serialization fails.
    pub fn serialize(&self) -> Result<String, SessionError> {
        session::encode(&self.log)
    }

    /// Replace the log with a decoded session. On failure nothing changes.
    pub fn deserialize(&mut self, text: &str) -> bool {
        match session::decode(text) {
            Ok(log) => {
                for action in log.entries() {
                    self.ids.observe(action.id());
                }
                info!("session: loaded {} actions, cursor {}", log.len(), log.history_index());
                if self.input.is_drawing() {
                    debug!("session: discarding gesture in progress");
                }
                self.log = log;
                self.input = InputState::Idle;
                true
            }
            Err(e) => {
                warn!("session: load rejected: {e}");
                false
            }
        }
    }

    // --- Render ---

    /// Replay the visible history plus any shape preview onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns the first surface error.
    pub fn render_to<S: Surface + ?Sized>(&self, surface: &mut S, width: f64, height: f64) -> Result<(), RenderError> {
        let preview = self.preview();
        render::draw(surface, width, height, self.log.visible(), preview.as_ref())
    }

    // --- Queries ---

    /// The uncommitted shape being dragged, as it would be committed now.
    #[must_use]
    pub fn preview(&self) -> Option<Action> {
        match &self.input {
            InputState::DrawingShape { shape } => Some(Action::Shape(shape.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// CSS cursor for the active tool.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        self.style.tool.css_cursor()
    }

    /// Where the open text box is anchored, if one is open.
    #[must_use]
    pub fn text_anchor(&self) -> Option<Point> {
        match &self.input {
            InputState::TextEditing { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    // --- Transitions ---

    /// Seal an in-progress stroke or commit the dragged shape, then go idle.
    fn finish_drawing(&mut self, effects: &mut Vec<Effect>) {
        match std::mem::take(&mut self.input) {
            InputState::DrawingStroke => {
                if let Some(Action::Stroke(stroke)) = self.log.open_tail() {
                    debug!("gesture: stroke sealed with {} points", stroke.points.len());
                }
                self.log.seal_open_tail();
            }
            InputState::DrawingShape { mut shape } => {
                shape.open = false;
                debug!("gesture: {:?} committed", shape.kind);
                self.log.append(Action::Shape(shape));
            }
            other => {
                self.input = other;
                return;
            }
        }
        effects.push(self.history_changed());
        effects.push(Effect::RenderNeeded);
    }

    /// Leave text editing, committing a non-empty buffer at its anchor.
    fn end_text_edit(&mut self, effects: &mut Vec<Effect>) {
        match std::mem::take(&mut self.input) {
            InputState::TextEditing { anchor, buffer } => {
                effects.push(Effect::EndTextEdit);
                if !buffer.is_empty() {
                    self.commit_text(buffer, anchor);
                    effects.push(self.history_changed());
                    effects.push(Effect::RenderNeeded);
                }
            }
            other => self.input = other,
        }
    }

    fn commit_text(&mut self, text: String, position: Point) {
        let action = Text {
            id: self.next_id(),
            text,
            position,
            color: self.style.stroke_color.clone(),
            size: self.style.text_size(&self.config),
        };
        self.log.append(Action::Text(action));
        debug!("gesture: text committed at ({}, {})", position.x, position.y);
    }

    fn next_id(&mut self) -> ActionId {
        self.ids.next((self.clock)())
    }

    fn history_changed(&self) -> Effect {
        Effect::HistoryChanged { can_undo: self.log.can_undo(), can_redo: self.log.can_redo() }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: Config) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call throws.
    pub fn render(&self) -> Result<(), RenderError> {
        let mut ctx = context_2d(&self.canvas)?;
        let (width, height) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.core.render_to(&mut ctx, width, height)
    }

    /// Resize the backing canvas and replay the log at the new size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the redraw fails.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.render()
    }

    /// Show `css` as the pointer cursor over the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the style property cannot be set.
    pub fn set_cursor(&self, css: &str) -> Result<(), RenderError> {
        self.canvas.style().set_property("cursor", css)?;
        Ok(())
    }

    /// Replay the visible history offscreen, flatten it onto the configured
    /// background, and return a PNG data URL. The shape preview is not included.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no document is available or a canvas call fails.
    pub fn export_png(&self) -> Result<String, RenderError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(RenderError::DocumentUnavailable)?;
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let (width, height) = (f64::from(w), f64::from(h));

        // Erasers punch holes, so replay on a transparent layer first.
        let layer = offscreen(&document, w, h)?;
        let mut layer_ctx = context_2d(&layer)?;
        render::draw(&mut layer_ctx, width, height, self.core.log.visible(), None)?;

        let flat = offscreen(&document, w, h)?;
        let mut flat_ctx = context_2d(&flat)?;
        flat_ctx.set_fill_color(&self.core.config.background);
        flat_ctx.fill_rect(0.0, 0.0, width, height);
        flat_ctx.draw_image_with_html_canvas_element(&layer, 0.0, 0.0)?;

        Ok(flat.to_data_url_with_type(EXPORT_MIME)?)
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RenderError> {
    canvas
        .get_context("2d")?
        .ok_or(RenderError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RenderError::ContextUnavailable)
}

fn offscreen(document: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, RenderError> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| RenderError::DocumentUnavailable)?;
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}
