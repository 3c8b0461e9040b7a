pub mod dataloader;
pub mod loss;
pub mod lr_scheduler;
pub mod optimizer;
pub mod parallel;
pub mod tokenizer;

pub use dataloader::{build_dataloader, Batch, Dataloader, DataloaderConfig};
pub use loss::{build_cross_entropy_loss, LossFn};
pub use lr_scheduler::{build_lr_schedulers, LrScheduler, LrSchedulerConfig};
pub use optimizer::{build_optimizers, Optimizer, OptimizerConfig};
pub use parallel::{parallelize_transformer, pipeline_transformer, ParallelDims};
pub use tokenizer::{build_tokenizer, Tokenizer};
