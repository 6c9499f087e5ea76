//! Report renderers.
//!
//! - [`terminal`] — colored, tabular output with a summary box; respects `--verbose` / `--quiet`.
//! - JSON output is the serialized [`Report`](crate::models::Report), written by `main`.

pub mod terminal;
