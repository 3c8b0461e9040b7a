use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::args::{DeepSeekV3Args, MoEArgs, ScoreFunc, TitanModelArgs, TransformerModelArgs};
use super::ModelFamily;
use crate::error::SpecError;

/// Mapping from flavor name to fully-resolved model arguments. Built once
/// for the selected family and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlavorCatalog {
    flavors: BTreeMap<String, TransformerModelArgs>,
}

impl FlavorCatalog {
    pub fn for_family(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Llama => Self::llama(),
            ModelFamily::DeepSeek => Self::deepseek(),
        }
    }

    /// Plain-transformer presets of increasing scale, no overlay on any entry.
    pub fn llama() -> Self {
        Self::from_entries([
            (
                "debugmodel",
                TransformerModelArgs::new(TitanModelArgs {
                    max_seq_len: 2048,
                    dim: 256,
                    n_layers: 6,
                    n_heads: 16,
                    n_kv_heads: Some(16),
                    vocab_size: 2000,
                    rope_theta: 500000.0,
                    ..Default::default()
                }),
            ),
            (
                "medium",
                TransformerModelArgs::new(TitanModelArgs {
                    dim: 1024,
                    n_layers: 12,
                    ..Default::default()
                }),
            ),
            ("full", TransformerModelArgs::new(TitanModelArgs::default())),
        ])
    }

    /// Mixture-of-experts presets; currently only a debug-scale entry.
    pub fn deepseek() -> Self {
        Self::from_entries([(
            "debugmodel",
            TransformerModelArgs::new(TitanModelArgs {
                vocab_size: 2000,
                dim: 256,
                n_layers: 3,
                n_heads: 16,
                n_kv_heads: Some(16),
                ..Default::default()
            })
            .with_deepseek_v3(DeepSeekV3Args {
                inter_dim: Some(1024),
                moe_inter_dim: Some(256),
                n_dense_layers: Some(1),
                n_group: Some(2),
                topk_group: Some(1),
                kv_lora_rank: Some(16),
                q_lora_rank: Some(0),
                qk_nope_head_dim: Some(32),
                qk_rope_head_dim: Some(16),
                v_head_dim: Some(32),
                mscale: Some(0.70),
                moe_args: Some(MoEArgs {
                    num_experts: 8,
                    num_shared_experts: 2,
                    top_k: 3,
                    score_func: ScoreFunc::Softmax,
                    route_norm: true,
                    score_before_experts: false,
                }),
                ..Default::default()
            }),
        )])
    }

    fn from_entries<const N: usize>(entries: [(&str, TransformerModelArgs); N]) -> Self {
        Self {
            flavors: entries
                .into_iter()
                .map(|(name, args)| (name.to_string(), args))
                .collect(),
        }
    }

    pub fn get(&self, flavor: &str) -> Result<&TransformerModelArgs, SpecError> {
        self.flavors
            .get(flavor)
            .ok_or_else(|| SpecError::unknown_flavor(flavor, self.names()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.flavors.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.flavors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flavors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TransformerModelArgs)> {
        self.flavors.iter().map(|(name, args)| (name.as_str(), args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llama_catalog_keys() {
        let catalog = FlavorCatalog::llama();
        assert_eq!(catalog.names(), vec!["debugmodel", "full", "medium"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_deepseek_catalog_keys() {
        let catalog = FlavorCatalog::deepseek();
        assert_eq!(catalog.names(), vec!["debugmodel"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_llama_debugmodel_values() {
        let catalog = FlavorCatalog::for_family(ModelFamily::Llama);
        let args = catalog.get("debugmodel").unwrap();

        assert_eq!(args.titan_args.dim, 256);
        assert_eq!(args.titan_args.n_layers, 6);
        assert_eq!(args.titan_args.n_heads, 16);
        assert_eq!(args.titan_args.n_kv_heads, Some(16));
        assert_eq!(args.titan_args.vocab_size, 2000);
        assert_eq!(args.titan_args.max_seq_len, 2048);
        assert_eq!(args.titan_args.rope_theta, 500000.0);
        assert!(args.deepseek_v3_args.is_none());
    }

    #[test]
    fn test_llama_medium_and_full() {
        let catalog = FlavorCatalog::llama();

        let medium = catalog.get("medium").unwrap();
        assert_eq!(medium.titan_args.dim, 1024);
        assert_eq!(medium.titan_args.n_layers, 12);
        assert!(medium.deepseek_v3_args.is_none());

        let full = catalog.get("full").unwrap();
        assert_eq!(full.titan_args, TitanModelArgs::default());
    }

    #[test]
    fn test_deepseek_debugmodel_values() {
        let catalog = FlavorCatalog::for_family(ModelFamily::DeepSeek);
        let args = catalog.get("debugmodel").unwrap();

        assert_eq!(args.titan_args.dim, 256);
        assert_eq!(args.titan_args.n_layers, 3);
        assert_eq!(args.titan_args.n_heads, 16);
        assert_eq!(args.titan_args.n_kv_heads, Some(16));
        assert_eq!(args.titan_args.vocab_size, 2000);

        let overlay = args.deepseek_v3_args.as_ref().unwrap();
        assert_eq!(overlay.inter_dim, Some(1024));
        assert_eq!(overlay.moe_inter_dim, Some(256));
        assert_eq!(overlay.n_dense_layers, Some(1));
        assert_eq!(overlay.kv_lora_rank, Some(16));
        assert_eq!(overlay.q_lora_rank, Some(0));
        assert_eq!(overlay.mscale, Some(0.70));

        let moe = overlay.moe_args.as_ref().unwrap();
        assert_eq!(moe.num_experts, 8);
        assert_eq!(moe.num_shared_experts, 2);
        assert_eq!(moe.top_k, 3);
        assert_eq!(moe.score_func, ScoreFunc::Softmax);
        assert!(moe.route_norm);
        assert!(!moe.score_before_experts);
    }

    #[test]
    fn test_family_catalogs_are_mutually_exclusive() {
        let llama = FlavorCatalog::for_family(ModelFamily::Llama);
        let deepseek = FlavorCatalog::for_family(ModelFamily::DeepSeek);

        assert!(llama.iter().all(|(_, args)| args.deepseek_v3_args.is_none()));
        assert!(deepseek.iter().all(|(_, args)| args.deepseek_v3_args.is_some()));
        assert!(deepseek.get("medium").is_err());
        assert!(deepseek.get("full").is_err());
    }

    #[test]
    fn test_unknown_flavor_is_an_error() {
        let catalog = FlavorCatalog::llama();
        let err = catalog.get("gigantic").unwrap_err();

        match err {
            SpecError::UnknownFlavor { flavor, available } => {
                assert_eq!(flavor, "gigantic");
                assert!(available.contains("debugmodel"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
