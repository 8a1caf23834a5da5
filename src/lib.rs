pub mod config;
pub mod fixture;
pub mod graph;
pub mod pipeline;
pub mod tabular;
pub mod view;

pub use graph::{normalize, Graph};
pub use pipeline::{load, LoadOptions, Loaded};
pub use tabular::{parse, FlatRecord, ParseError};
