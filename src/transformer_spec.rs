use std::sync::Arc;

use crate::components::{
    build_cross_entropy_loss, build_dataloader, build_lr_schedulers, build_optimizers,
    build_tokenizer, parallelize_transformer, pipeline_transformer,
};
use crate::error::SpecError;
use crate::model::{FlavorCatalog, Model, ModelFamily, TransformerModel, TransformerModelArgs};
use crate::registry::TrainSpecRegistry;
use crate::spec::TrainSpec;

/// Both families register under this one name; exactly one family is active
/// per process, so installing a second family is a duplicate registration.
pub const SPEC_NAME: &str = "transformer";

/// Assembles the train spec for the given family: the family's flavor
/// catalog plus the default builder for every subsystem.
pub fn train_spec_for(family: ModelFamily) -> TrainSpec {
    TrainSpec {
        name: SPEC_NAME.to_string(),
        flavors: FlavorCatalog::for_family(family),
        build_model_fn: Arc::new(|args: &TransformerModelArgs| {
            Ok(Box::new(TransformerModel::new(args)) as Box<dyn Model>)
        }),
        parallelize_fn: Arc::new(parallelize_transformer),
        pipelining_fn: Arc::new(pipeline_transformer),
        build_optimizers_fn: Arc::new(build_optimizers),
        build_lr_schedulers_fn: Arc::new(build_lr_schedulers),
        build_dataloader_fn: Arc::new(build_dataloader),
        build_tokenizer_fn: Arc::new(build_tokenizer),
        build_loss_fn: Arc::new(build_cross_entropy_loss),
    }
}

pub fn install(registry: &mut TrainSpecRegistry, family: ModelFamily) -> Result<(), SpecError> {
    registry.register(train_spec_for(family))
}

/// Environment-driven variant of [`install`]: reads `MODEL_TYPE` once to pick
/// the family. Intended for the composition root only; tests and library
/// callers should pass the family explicitly.
pub fn install_from_env(registry: &mut TrainSpecRegistry) -> Result<(), SpecError> {
    install(registry, ModelFamily::from_env())
}
