//! JavaScript-facing wrapper around [`Engine`].
//!
//! Every mutating call applies the engine's [`Effect`]s immediately: the
//! canvas is redrawn when the visible drawing changed and the pointer cursor
//! follows the active tool. Render failures are logged rather than thrown so
//! one bad frame never breaks the host's event handlers.
//!
//! Calls that can open or close the text input box (`setTool`, `startAction`,
//! `submitText`, `newDocument`, `deserialize`) return `true` when they did; the
//! host then reads `textAnchor()` to show or hide it. Undo/redo availability
//! is read with `canUndo()`/`canRedo()` after any history call.

use log::{debug, error, warn};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::Config;
use crate::engine::{Effect, Engine};
use crate::geometry::Point;
use crate::input::Tool;

/// Module entry point: panic reporting and console logging.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        warn!("console logger already installed: {err}");
    }
    log::set_max_level(Config::default().log_level().to_level_filter());
}

/// A drawing pad bound to one canvas element.
#[wasm_bindgen]
pub struct Sketchpad {
    engine: Engine,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Bind to `canvas`, optionally with a JSON config object.
    ///
    /// # Errors
    ///
    /// Throws if the config is not valid.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<Sketchpad, JsError> {
        let config = match config {
            Some(text) => Config::from_json(&text)?,
            None => Config::default(),
        };
        log::set_max_level(config.log_level().to_level_filter());
        let cursor = config.tool.css_cursor();
        let pad = Self { engine: Engine::new(canvas, config) };
        pad.apply(vec![Effect::SetCursor(cursor.to_owned()), Effect::RenderNeeded]);
        Ok(pad)
    }

    // --- Style ---

    /// Switch tools by name. Returns whether the text box closed.
    ///
    /// # Errors
    ///
    /// Throws on an unknown tool name.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, name: &str) -> Result<bool, JsError> {
        let tool: Tool = name.parse()?;
        let effects = self.engine.core.set_tool(tool);
        Ok(self.apply(effects))
    }

    #[wasm_bindgen(js_name = setStrokeColor)]
    pub fn set_stroke_color(&mut self, color: &str) {
        self.engine.core.set_stroke_color(color);
    }

    #[wasm_bindgen(js_name = setFillColor)]
    pub fn set_fill_color(&mut self, color: &str) {
        self.engine.core.set_fill_color(color);
    }

    #[wasm_bindgen(js_name = setBrushSize)]
    pub fn set_brush_size(&mut self, size: f64) {
        self.engine.core.set_brush_size(size);
    }

    /// Brush size after clamping.
    #[wasm_bindgen(js_name = brushSize)]
    #[must_use]
    pub fn brush_size(&self) -> f64 {
        self.engine.core.style.brush_size
    }

    // --- Gestures ---

    /// Pointer-down. Returns whether the text box opened or closed.
    #[wasm_bindgen(js_name = startAction)]
    pub fn start_action(&mut self, x: f64, y: f64) -> bool {
        let effects = self.engine.core.start_action(Point::new(x, y));
        self.apply(effects)
    }

    #[wasm_bindgen(js_name = updateAction)]
    pub fn update_action(&mut self, x: f64, y: f64) {
        let effects = self.engine.core.update_action(Point::new(x, y));
        self.apply(effects);
    }

    #[wasm_bindgen(js_name = endAction)]
    pub fn end_action(&mut self) {
        let effects = self.engine.core.end_action();
        self.apply(effects);
    }

    #[wasm_bindgen(js_name = updateText)]
    pub fn update_text(&mut self, text: &str) {
        self.engine.core.update_text(text);
    }

    /// Commit text. Returns whether the text box closed.
    #[wasm_bindgen(js_name = submitText)]
    pub fn submit_text(&mut self, text: &str, x: f64, y: f64) -> bool {
        let effects = self.engine.core.submit_text(text, Point::new(x, y));
        self.apply(effects)
    }

    /// `[x, y]` of the open text box, or `undefined`.
    #[wasm_bindgen(js_name = textAnchor)]
    #[must_use]
    pub fn text_anchor(&self) -> Option<Vec<f64>> {
        self.engine.core.text_anchor().map(|p| vec![p.x, p.y])
    }

    // --- History ---

    /// Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        let before = self.engine.core.log.history_index();
        let effects = self.engine.core.undo();
        self.apply(effects);
        self.engine.core.log.history_index() != before
    }

    /// Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        let before = self.engine.core.log.history_index();
        let effects = self.engine.core.redo();
        self.apply(effects);
        self.engine.core.log.history_index() != before
    }

    pub fn clear(&mut self) {
        let effects = self.engine.core.clear();
        self.apply(effects);
    }

    /// Start over. Returns whether the text box closed.
    #[wasm_bindgen(js_name = newDocument)]
    pub fn new_document(&mut self) -> bool {
        let effects = self.engine.core.new_document();
        self.apply(effects)
    }

    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.engine.core.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.engine.core.can_redo()
    }

    // --- Surface ---

    /// Redraw the canvas from history.
    pub fn render(&self) {
        if let Err(err) = self.engine.render() {
            error!("render failed: {err}");
        }
    }

    /// Resize the canvas and redraw.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Err(err) = self.engine.resize(width, height) {
            error!("resize to {width}x{height} failed: {err}");
        }
    }

    /// CSS cursor for the active tool.
    #[must_use]
    pub fn cursor(&self) -> String {
        self.engine.core.cursor().to_owned()
    }

    /// Flatten the drawing onto the background and return a PNG data URL.
    ///
    /// # Errors
    ///
    /// Throws if the image cannot be produced.
    #[wasm_bindgen(js_name = exportImage)]
    pub fn export_image(&self) -> Result<String, JsError> {
        self.engine.export_png().map_err(|err| {
            error!("export failed: {err}");
            JsError::from(err)
        })
    }

    // --- Session ---

    /// Save the full history as JSON.
    ///
    /// # Errors
    ///
    /// Throws if serialization fails.
    pub fn serialize(&self) -> Result<String, JsError> {
        Ok(self.engine.core.serialize()?)
    }

    /// Load a saved session. Returns `false` and keeps the current drawing
    /// if the document is malformed; on success any text box is closed.
    pub fn deserialize(&mut self, text: &str) -> bool {
        let loaded = self.engine.core.deserialize(text);
        if loaded {
            self.apply(vec![Effect::EndTextEdit, Effect::RenderNeeded]);
        }
        loaded
    }
}

impl Sketchpad {
    /// Carry out `effects`. Returns whether the text box opened or closed.
    fn apply(&self, effects: Vec<Effect>) -> bool {
        let text_box = effects.iter().any(Effect::touches_text_box);
        let mut redraw = false;
        for effect in effects {
            match effect {
                Effect::RenderNeeded => redraw = true,
                Effect::SetCursor(css) => {
                    if let Err(err) = self.engine.set_cursor(&css) {
                        warn!("cursor update failed: {err}");
                    }
                }
                Effect::BeginTextEdit { anchor } => debug!("text box opened at ({}, {})", anchor.x, anchor.y),
                Effect::EndTextEdit => debug!("text box closed"),
                Effect::HistoryChanged { can_undo, can_redo } => {
                    debug!("history: can_undo={can_undo} can_redo={can_redo}");
                }
            }
        }
        if redraw {
            self.render();
        }
        text_box
    }
}
