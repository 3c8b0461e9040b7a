pub mod args;
pub mod flavors;

pub use args::{
    AttnMaskType, DeepSeekV3Args, MoEArgs, ScoreFunc, TitanModelArgs, TransformerModelArgs,
};
pub use flavors::FlavorCatalog;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    Llama,
    DeepSeek,
}

impl ModelFamily {
    pub const ENV_VAR: &'static str = "MODEL_TYPE";

    /// Reads `MODEL_TYPE` once and logs which family was selected.
    pub fn from_env() -> Self {
        let value = std::env::var(Self::ENV_VAR).ok();
        let family = Self::from_env_value(value.as_deref());
        tracing::info!("using {} model", family);
        family
    }

    /// The literal "llama" selects the plain family; anything else, including
    /// an unset variable, selects the mixture-of-experts family.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("llama") => ModelFamily::Llama,
            _ => ModelFamily::DeepSeek,
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Llama => write!(f, "llama"),
            ModelFamily::DeepSeek => write!(f, "deepseek"),
        }
    }
}

pub trait Model: Send + Sync {
    fn args(&self) -> &TransformerModelArgs;
    fn param_count(&self) -> u64;
}

/// Opaque model instance handed back by the spec's model constructor. Holds
/// the resolved arguments and a size estimate; the forward pass lives in the
/// trainer's compute backend, not here.
pub struct TransformerModel {
    args: TransformerModelArgs,
    param_count: u64,
}

impl TransformerModel {
    pub fn new(args: &TransformerModelArgs) -> Self {
        Self {
            args: args.clone(),
            param_count: args.titan_args.param_count(),
        }
    }
}

impl Model for TransformerModel {
    fn args(&self) -> &TransformerModelArgs {
        &self.args
    }

    fn param_count(&self) -> u64 {
        self.param_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_env_value() {
        assert_eq!(ModelFamily::from_env_value(Some("llama")), ModelFamily::Llama);
        assert_eq!(ModelFamily::from_env_value(Some("deepseek")), ModelFamily::DeepSeek);
        assert_eq!(ModelFamily::from_env_value(Some("")), ModelFamily::DeepSeek);
        assert_eq!(ModelFamily::from_env_value(Some("LLAMA")), ModelFamily::DeepSeek);
        assert_eq!(ModelFamily::from_env_value(None), ModelFamily::DeepSeek);
    }

    #[test]
    fn test_family_display() {
        assert_eq!(ModelFamily::Llama.to_string(), "llama");
        assert_eq!(ModelFamily::DeepSeek.to_string(), "deepseek");
    }

    #[test]
    fn test_transformer_model_keeps_args() {
        let args = TransformerModelArgs::new(TitanModelArgs {
            dim: 256,
            n_layers: 6,
            n_heads: 16,
            vocab_size: 2000,
            ..Default::default()
        });

        let model = TransformerModel::new(&args);
        assert_eq!(model.args(), &args);
        assert_eq!(model.param_count(), args.titan_args.param_count());
    }
}
