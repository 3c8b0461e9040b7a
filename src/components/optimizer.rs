use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub lr: f64,
    pub weight_decay: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            lr: 3e-4,
            weight_decay: 0.1,
        }
    }
}

pub trait Optimizer: Send + Sync {
    fn step(&mut self, params: &mut [f32], grads: &[f32]) -> Result<()>;
    fn lr(&self) -> f64;
    fn set_lr(&mut self, lr: f64);
}

/// SGD with decoupled weight decay; the default optimizer wired into the
/// transformer train spec.
pub struct Sgd {
    lr: f64,
    weight_decay: f64,
}

impl Sgd {
    pub fn new(config: &OptimizerConfig) -> Self {
        Self {
            lr: config.lr,
            weight_decay: config.weight_decay,
        }
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &mut [f32], grads: &[f32]) -> Result<()> {
        if params.len() != grads.len() {
            anyhow::bail!(
                "params/grads length mismatch: {} vs {}",
                params.len(),
                grads.len()
            );
        }

        let lr = self.lr as f32;
        let wd = self.weight_decay as f32;
        for (p, &g) in params.iter_mut().zip(grads) {
            *p -= lr * (g + wd * *p);
        }
        Ok(())
    }

    fn lr(&self) -> f64 {
        self.lr
    }

    fn set_lr(&mut self, lr: f64) {
        self.lr = lr;
    }
}

pub fn build_optimizers(config: &OptimizerConfig) -> Result<Box<dyn Optimizer>> {
    if config.lr <= 0.0 {
        anyhow::bail!("learning rate must be positive, got {}", config.lr);
    }
    Ok(Box::new(Sgd::new(config)))
}
