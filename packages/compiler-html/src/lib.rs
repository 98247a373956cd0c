//! # Lander HTML Compiler
//!
//! Renders a theme plus an ordered part list into a complete HTML document.
//!
//! - **Preview** output wraps every part with edit / move / delete controls
//!   and always keeps a footer toggle reachable.
//! - **Export** output is clean: no controls, hidden parts omitted.
//!
//! Images are either embedded as data URIs or linked by their archive path
//! (see [`AssetLinking`]). Rendering is a pure function of its inputs.

mod compiler;
mod context;
mod form;
mod fragments;
pub mod static_files;

#[cfg(test)]
mod tests;

pub use compiler::{
    compile_document, compile_entries, compile_page, AssetLinking, CompileError, CompileOptions,
    RenderMode,
};
pub use context::escape_html;
pub use form::compile_part_form;
