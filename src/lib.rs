pub mod components;
pub mod error;
pub mod model;
pub mod registry;
pub mod spec;
pub mod transformer_spec;

pub use components::{
    Batch, Dataloader, DataloaderConfig, LossFn, LrScheduler, LrSchedulerConfig, Optimizer,
    OptimizerConfig, ParallelDims, Tokenizer,
};
pub use error::SpecError;
pub use model::{
    AttnMaskType, DeepSeekV3Args, FlavorCatalog, MoEArgs, Model, ModelFamily, ScoreFunc,
    TitanModelArgs, TransformerModel, TransformerModelArgs,
};
pub use registry::{
    freeze_registry, get_train_spec, register_train_spec, TrainSpecRegistry, REGISTRY,
};
pub use spec::TrainSpec;
pub use transformer_spec::{install, install_from_env, train_spec_for, SPEC_NAME};

pub type Result<T> = anyhow::Result<T>;
