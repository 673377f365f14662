pub mod game_metrics;
pub mod log_stream;
pub mod training_stats;

pub use game_metrics::GameMetrics;
pub use log_stream::LogStream;
pub use training_stats::TrainingStats;
