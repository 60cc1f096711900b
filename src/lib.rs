//! Side-by-side comparison of two sequences of lines
//!
//! Lines are diffed, regrouped into aligned rows and rendered in two columns
//! padded by terminal display width, so CJK and other wide text lines up.

pub mod comparator;
pub mod config;
pub mod constant;
pub mod differ;
pub mod renderer;
pub mod width;

pub use comparator::{Comparator, CompareError, Comparison, ComparisonEvent, EventKind, Events};
pub use differ::{Indicator, LineDiffer, NdiffDiffer, TaggedLine};
pub use renderer::{
    InlineMarkedRenderer, LineStackedRenderer, RenderConfig, RenderError, Renderer, RendererKind,
};
