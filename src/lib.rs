#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::IngestError;
pub use ingest::{Delimiter, parse_table};
pub use ir::FishboneTree;
pub use layout::{FishboneLayout, Primitive, compute_layout};
pub use render::render_svg;
pub use theme::{Background, Theme};

#[cfg(feature = "cli")]
pub use cli::run;
