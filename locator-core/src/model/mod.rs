pub mod fix;

pub use fix::{Accuracy, AccuracyError, CoordinateResult, Fix};
