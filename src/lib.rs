//! Drawing engine for the browser sketchpad.
//!
//! This crate is compiled to WebAssembly and runs in the browser. Every stroke,
//! shape, text run and clear is recorded as an action in a linear history with
//! a cursor; the canvas is always the result of replaying the visible part of
//! that history. Undo and redo only move the cursor, and a session is just the
//! history serialized to JSON. The host JavaScript layer wires DOM pointer and
//! keyboard events to [`wasm::Sketchpad`] and shows the text input box.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] controller |
//! | [`wasm`] | `#[wasm_bindgen]` facade exported to JavaScript |
//! | [`history`] | Action log with undo/redo cursor |
//! | [`action`] | Action records and id generation |
//! | [`geometry`] | Points and path synthesis for shapes and strokes |
//! | [`render`] | Clear-and-replay render pipeline |
//! | [`surface`] | 2D drawing surface trait and its Canvas2D implementation |
//! | [`input`] | Tools, style state, and the gesture state |
//! | [`session`] | JSON save/load of the history |
//! | [`config`] | Engine configuration |
//! | [`consts`] | Shared numeric and paint constants |

pub mod action;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod render;
pub mod session;
pub mod surface;
pub mod wasm;

#[cfg(test)]
mod testing;
