use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AttnMaskType {
    #[default]
    Causal,
    BlockCausal,
}

/// Base architecture hyperparameters shared by all supported model families.
///
/// Any field can be overridden with struct-update syntax over the defaults.
/// `n_kv_heads`, when set, is expected not to exceed `n_heads`; that is a
/// model-construction concern and is not checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitanModelArgs {
    pub dim: usize,
    pub n_layers: usize,
    pub n_heads: usize,
    pub n_kv_heads: Option<usize>,
    pub vocab_size: usize,
    pub multiple_of: usize,
    pub ffn_dim_multiplier: Option<f64>,
    pub norm_eps: f64,
    pub rope_theta: f64,
    pub max_seq_len: usize,
    pub depth_init: bool,
    pub use_flex_attn: bool,
    pub attn_mask_type: AttnMaskType,
    pub eos_id: u32,
}

impl Default for TitanModelArgs {
    fn default() -> Self {
        Self {
            dim: 4096,
            n_layers: 32,
            n_heads: 32,
            n_kv_heads: None,
            vocab_size: 128256,
            multiple_of: 256,
            ffn_dim_multiplier: None,
            norm_eps: 1e-5,
            rope_theta: 10000.0,
            max_seq_len: 2048,
            depth_init: true,
            use_flex_attn: false,
            attn_mask_type: AttnMaskType::Causal,
            eos_id: 0,
        }
    }
}

impl TitanModelArgs {
    pub fn head_dim(&self) -> usize {
        self.dim / self.n_heads
    }

    pub fn n_kv_heads(&self) -> usize {
        self.n_kv_heads.unwrap_or(self.n_heads)
    }

    /// Hidden dimension of the feed-forward block: 2/3 of 4*dim, scaled by
    /// `ffn_dim_multiplier` and rounded up to a multiple of `multiple_of`.
    pub fn ffn_hidden_dim(&self) -> usize {
        let mut hidden = 4 * self.dim;
        hidden = 2 * hidden / 3;
        if let Some(multiplier) = self.ffn_dim_multiplier {
            hidden = (multiplier * hidden as f64) as usize;
        }
        self.multiple_of * hidden.div_ceil(self.multiple_of)
    }

    /// Estimated parameter count for a dense (non-MoE) transformer with
    /// untied input/output embeddings.
    pub fn param_count(&self) -> u64 {
        let dim = self.dim as u64;
        let head_dim = self.head_dim() as u64;
        let kv_dim = self.n_kv_heads() as u64 * head_dim;
        let ffn_hidden = self.ffn_hidden_dim() as u64;
        let vocab = self.vocab_size as u64;

        let attention = dim * dim + 2 * dim * kv_dim + dim * dim;
        let feed_forward = 3 * dim * ffn_hidden;
        let norms = 2 * dim;
        let per_layer = attention + feed_forward + norms;

        vocab * dim + self.n_layers as u64 * per_layer + dim + dim * vocab
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFunc {
    #[default]
    Softmax,
    Sigmoid,
}

/// Mixture-of-experts routing configuration, consumed as an opaque nested
/// record by the model constructor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoEArgs {
    pub num_experts: usize,
    pub num_shared_experts: usize,
    pub top_k: usize,
    pub score_func: ScoreFunc,
    pub route_norm: bool,
    pub score_before_experts: bool,
}

impl Default for MoEArgs {
    fn default() -> Self {
        Self {
            num_experts: 8,
            num_shared_experts: 1,
            top_k: 1,
            score_func: ScoreFunc::Softmax,
            route_norm: false,
            score_before_experts: true,
        }
    }
}

/// DeepSeek-specific overlay. Every field is optional; `None` means the
/// model's internal default applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeepSeekV3Args {
    pub moe_args: Option<MoEArgs>,
    pub n_group: Option<usize>,
    pub topk_group: Option<usize>,
    pub inter_dim: Option<usize>,
    pub moe_inter_dim: Option<usize>,
    pub n_dense_layers: Option<usize>,
    pub n_expert_groups: Option<usize>,
    pub n_limited_groups: Option<usize>,
    pub q_lora_rank: Option<usize>,
    pub kv_lora_rank: Option<usize>,
    pub qk_nope_head_dim: Option<usize>,
    pub qk_rope_head_dim: Option<usize>,
    pub v_head_dim: Option<usize>,
    pub original_seq_len: Option<usize>,
    pub rope_factor: Option<f64>,
    pub beta_fast: Option<i64>,
    pub beta_slow: Option<i64>,
    pub mscale: Option<f64>,
}

/// The unit of configuration a model constructor receives: mandatory base
/// arguments plus an optional family-specific overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransformerModelArgs {
    pub titan_args: TitanModelArgs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepseek_v3_args: Option<DeepSeekV3Args>,
}

impl TransformerModelArgs {
    pub fn new(titan_args: TitanModelArgs) -> Self {
        Self {
            titan_args,
            deepseek_v3_args: None,
        }
    }

    pub fn with_deepseek_v3(mut self, args: DeepSeekV3Args) -> Self {
        self.deepseek_v3_args = Some(args);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titan_defaults() {
        let args = TitanModelArgs::default();

        assert_eq!(args.dim, 4096);
        assert_eq!(args.n_layers, 32);
        assert_eq!(args.n_heads, 32);
        assert_eq!(args.n_kv_heads, None);
        assert_eq!(args.vocab_size, 128256);
        assert_eq!(args.multiple_of, 256);
        assert_eq!(args.ffn_dim_multiplier, None);
        assert_eq!(args.norm_eps, 1e-5);
        assert_eq!(args.rope_theta, 10000.0);
        assert_eq!(args.max_seq_len, 2048);
        assert!(args.depth_init);
        assert!(!args.use_flex_attn);
        assert_eq!(args.attn_mask_type, AttnMaskType::Causal);
        assert_eq!(args.eos_id, 0);
    }

    #[test]
    fn test_head_dims() {
        let args = TitanModelArgs {
            dim: 256,
            n_heads: 16,
            n_kv_heads: Some(4),
            ..Default::default()
        };

        assert_eq!(args.head_dim(), 16);
        assert_eq!(args.n_kv_heads(), 4);
        assert_eq!(TitanModelArgs::default().n_kv_heads(), 32);
    }

    #[test]
    fn test_ffn_hidden_dim_rounds_to_multiple() {
        let args = TitanModelArgs {
            dim: 256,
            multiple_of: 256,
            ..Default::default()
        };
        // 2/3 of 4*256 is 682, rounded up to 768
        assert_eq!(args.ffn_hidden_dim(), 768);

        let scaled = TitanModelArgs {
            ffn_dim_multiplier: Some(1.3),
            ..args
        };
        assert_eq!(scaled.ffn_hidden_dim() % 256, 0);
        assert!(scaled.ffn_hidden_dim() > args.ffn_hidden_dim());
    }

    #[test]
    fn test_param_count_scales_with_layers() {
        let small = TitanModelArgs {
            dim: 256,
            n_layers: 3,
            n_heads: 16,
            vocab_size: 2000,
            ..Default::default()
        };
        let larger = TitanModelArgs {
            n_layers: 6,
            ..small.clone()
        };

        assert!(small.param_count() > 0);
        assert!(larger.param_count() > small.param_count());
    }

    #[test]
    fn test_moe_defaults() {
        let moe = MoEArgs::default();

        assert_eq!(moe.num_experts, 8);
        assert_eq!(moe.num_shared_experts, 1);
        assert_eq!(moe.top_k, 1);
        assert_eq!(moe.score_func, ScoreFunc::Softmax);
        assert!(!moe.route_norm);
        assert!(moe.score_before_experts);
    }

    #[test]
    fn test_composite_round_trip() {
        let titan = TitanModelArgs {
            dim: 512,
            n_layers: 8,
            ..Default::default()
        };
        let overlay = DeepSeekV3Args {
            inter_dim: Some(1024),
            moe_args: Some(MoEArgs::default()),
            ..Default::default()
        };

        let plain = TransformerModelArgs::new(titan.clone());
        assert_eq!(plain.titan_args, titan);
        assert_eq!(plain.deepseek_v3_args, None);

        let moe = TransformerModelArgs::new(titan.clone()).with_deepseek_v3(overlay.clone());
        assert_eq!(moe.titan_args, titan);
        assert_eq!(moe.deepseek_v3_args, Some(overlay));
    }

    #[test]
    fn test_serde_round_trip() {
        let args = TransformerModelArgs::new(TitanModelArgs {
            dim: 256,
            attn_mask_type: AttnMaskType::BlockCausal,
            ..Default::default()
        })
        .with_deepseek_v3(DeepSeekV3Args {
            mscale: Some(0.70),
            moe_args: Some(MoEArgs {
                score_func: ScoreFunc::Sigmoid,
                ..Default::default()
            }),
            ..Default::default()
        });

        let json = serde_json::to_string(&args).unwrap();
        assert!(json.contains("block_causal"));
        assert!(json.contains("sigmoid"));

        let back: TransformerModelArgs = serde_json::from_str(&json).unwrap();
        assert_eq!(back, args);
    }

    #[test]
    fn test_overlay_absent_fields_deserialize_as_unset() {
        let overlay: DeepSeekV3Args = serde_json::from_str(r#"{"inter_dim": 1024}"#).unwrap();
        assert_eq!(overlay.inter_dim, Some(1024));
        assert_eq!(overlay.moe_args, None);
        assert_eq!(overlay.q_lora_rank, None);
    }
}
