use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelDims {
    pub dp: usize,
    pub tp: usize,
    pub pp: usize,
}

impl Default for ParallelDims {
    fn default() -> Self {
        Self { dp: 1, tp: 1, pp: 1 }
    }
}

impl ParallelDims {
    pub fn world_size(&self) -> usize {
        self.dp * self.tp * self.pp
    }
}

/// Default single-host parallelization: validates the mesh against the model
/// and leaves it unsharded.
pub fn parallelize_transformer(model: &mut dyn Model, dims: &ParallelDims) -> Result<()> {
    if dims.world_size() == 0 {
        anyhow::bail!("parallel dims must all be non-zero, got {:?}", dims);
    }
    let n_heads = model.args().titan_args.n_heads;
    if dims.tp > n_heads {
        anyhow::bail!(
            "tensor parallel degree {} exceeds {} attention heads",
            dims.tp,
            n_heads
        );
    }

    tracing::debug!(world_size = dims.world_size(), "parallelize: single-host no-op");
    Ok(())
}

/// Default pipelining: validates the stage count against the layer count.
pub fn pipeline_transformer(model: &mut dyn Model, dims: &ParallelDims) -> Result<()> {
    let n_layers = model.args().titan_args.n_layers;
    if dims.pp > n_layers {
        anyhow::bail!(
            "pipeline degree {} exceeds {} layers",
            dims.pp,
            n_layers
        );
    }
    Ok(())
}
