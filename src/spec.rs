use std::sync::Arc;

use crate::components::dataloader::{Dataloader, DataloaderConfig};
use crate::components::loss::LossFn;
use crate::components::lr_scheduler::{LrScheduler, LrSchedulerConfig};
use crate::components::optimizer::{Optimizer, OptimizerConfig};
use crate::components::parallel::ParallelDims;
use crate::components::tokenizer::Tokenizer;
use crate::error::SpecError;
use crate::model::{FlavorCatalog, Model, TransformerModelArgs};
use crate::Result;

pub type BuildModelFn =
    Arc<dyn Fn(&TransformerModelArgs) -> Result<Box<dyn Model>> + Send + Sync>;
pub type ParallelizeFn = Arc<dyn Fn(&mut dyn Model, &ParallelDims) -> Result<()> + Send + Sync>;
pub type PipeliningFn = Arc<dyn Fn(&mut dyn Model, &ParallelDims) -> Result<()> + Send + Sync>;
pub type BuildOptimizersFn =
    Arc<dyn Fn(&OptimizerConfig) -> Result<Box<dyn Optimizer>> + Send + Sync>;
pub type BuildLrSchedulersFn =
    Arc<dyn Fn(&LrSchedulerConfig) -> Result<Box<dyn LrScheduler>> + Send + Sync>;
pub type BuildDataloaderFn = Arc<
    dyn Fn(&TransformerModelArgs, &DataloaderConfig) -> Result<Box<dyn Dataloader>> + Send + Sync,
>;
pub type BuildTokenizerFn =
    Arc<dyn Fn(&TransformerModelArgs) -> Result<Box<dyn Tokenizer>> + Send + Sync>;
pub type BuildLossFn = Arc<dyn Fn() -> LossFn + Send + Sync>;

/// Everything a trainer needs to assemble a run for one model family: the
/// flavor catalog plus the construction entry points of every subsystem.
/// Pure aggregation; the callables are owned by their component modules and
/// shared here by reference count.
#[derive(Clone)]
pub struct TrainSpec {
    pub name: String,
    pub flavors: FlavorCatalog,
    pub build_model_fn: BuildModelFn,
    pub parallelize_fn: ParallelizeFn,
    pub pipelining_fn: PipeliningFn,
    pub build_optimizers_fn: BuildOptimizersFn,
    pub build_lr_schedulers_fn: BuildLrSchedulersFn,
    pub build_dataloader_fn: BuildDataloaderFn,
    pub build_tokenizer_fn: BuildTokenizerFn,
    pub build_loss_fn: BuildLossFn,
}

impl TrainSpec {
    pub fn model_args(&self, flavor: &str) -> std::result::Result<&TransformerModelArgs, SpecError> {
        self.flavors.get(flavor)
    }

    pub fn build_model(&self, flavor: &str) -> Result<Box<dyn Model>> {
        let args = self.model_args(flavor)?;
        (self.build_model_fn)(args)
    }
}

impl std::fmt::Debug for TrainSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainSpec")
            .field("name", &self.name)
            .field("flavors", &self.flavors.names())
            .finish_non_exhaustive()
    }
}
