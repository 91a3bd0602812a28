//! # polyglot-render
//!
//! Output generation for polyglot.
//!
//! Takes a resolved site graph and produces the files of the built site:
//! HTML pages through user templates, `sitemap.xml`, Apache rewrite rules
//! and a JSON dump of the graph.

pub mod htaccess;
pub mod output;
pub mod sitemap;
pub mod templates;

pub use output::{render_site, write_site, OutputFile, RenderError};
pub use sitemap::generate_sitemap;
pub use templates::{PageContext, PageRenderer, TemplateError};
