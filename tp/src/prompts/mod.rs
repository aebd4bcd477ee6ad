//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for the planning flows.
//!
//! Template loading chain:
//! 1. `{override-dir}/{name}.pmt` (user override, from config)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax. Optional clauses are wrapped in
//! `{{#if field}}...{{/if}}` so an empty field drops the whole sentence.

pub mod embedded;
mod loader;

pub use loader::{PromptLoader, format_amount};
