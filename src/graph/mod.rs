pub mod classify;
pub mod diagnostics;
pub mod model;
pub mod normalize;

pub use classify::{classify, Entity};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use model::{Benefit, Graph, Line, Station, StationSize};
pub use normalize::{normalize, normalize_with_diagnostics};
