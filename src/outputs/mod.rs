//! Output writers for the JSON data file and the HTML page.
//!
//! # Submodules
//!
//! - [`json`]: Serializes the article list to the JSON data file
//! - [`html`]: Rewrites the page's embedded `const <name> = [...]` array
//!
//! Both replace their target atomically; a failed run leaves the previous
//! file in place.

pub mod html;
pub mod json;
