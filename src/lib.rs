// Library root
// -----------
// This crate exposes the research client as a library; the binary
// (`main.rs`) wires it to the terminal.
//
// Module responsibilities:
// - `api`: HTTP calls to the research backend and the request/response
//   shapes of its three endpoints.
// - `submit`: the research -> report pipeline behind one user action.
// - `report`: the downloadable PDF artifact.
// - `ui`: interactive menu, spinner and rendering of outcomes.
// - `config` / `error`: settings and the typed API error.
pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod submit;
pub mod ui;
