use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::model::TransformerModelArgs;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataloaderConfig {
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for DataloaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 8,
            seed: 0,
        }
    }
}

pub struct Batch {
    pub inputs: Vec<Vec<u32>>,
    pub targets: Vec<Vec<u32>>,
}

impl Batch {
    pub fn batch_size(&self) -> usize {
        self.inputs.len()
    }

    pub fn seq_len(&self) -> usize {
        self.inputs.first().map(Vec::len).unwrap_or(0)
    }
}

pub trait Dataloader: Send + Sync {
    fn next_batch(&mut self) -> Result<Batch>;
}

/// Seeded random-token dataloader sized from the model arguments. Targets are
/// the inputs shifted by one (next-token prediction).
pub struct SyntheticDataloader {
    vocab_size: u32,
    seq_len: usize,
    batch_size: usize,
    rng: StdRng,
}

impl Dataloader for SyntheticDataloader {
    fn next_batch(&mut self) -> Result<Batch> {
        let mut inputs = Vec::with_capacity(self.batch_size);
        let mut targets = Vec::with_capacity(self.batch_size);

        for _ in 0..self.batch_size {
            let tokens: Vec<u32> = (0..=self.seq_len)
                .map(|_| self.rng.gen_range(0..self.vocab_size))
                .collect();
            inputs.push(tokens[..self.seq_len].to_vec());
            targets.push(tokens[1..].to_vec());
        }

        Ok(Batch { inputs, targets })
    }
}

pub fn build_dataloader(
    model_args: &TransformerModelArgs,
    config: &DataloaderConfig,
) -> Result<Box<dyn Dataloader>> {
    let titan = &model_args.titan_args;
    if titan.vocab_size == 0 || titan.max_seq_len == 0 {
        anyhow::bail!(
            "dataloader needs a non-zero vocab and sequence length, got vocab_size={} max_seq_len={}",
            titan.vocab_size,
            titan.max_seq_len
        );
    }
    if config.batch_size == 0 {
        anyhow::bail!("batch size must be non-zero");
    }

    Ok(Box::new(SyntheticDataloader {
        vocab_size: titan.vocab_size as u32,
        seq_len: titan.max_seq_len,
        batch_size: config.batch_size,
        rng: StdRng::seed_from_u64(config.seed),
    }))
}
