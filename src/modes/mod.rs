pub mod evaluate;
pub mod evolve;
pub mod train;

pub use evaluate::{EvaluateConfig, EvaluateMode};
pub use evolve::{EvolveConfig, EvolveMode};
pub use train::{TrainConfig, TrainMode};
