use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LrSchedulerConfig {
    pub base_lr: f64,
    pub warmup_steps: usize,
    pub decay_steps: usize,
    /// Fraction of `base_lr` the schedule decays to (and then holds).
    pub min_lr_factor: f64,
}

impl Default for LrSchedulerConfig {
    fn default() -> Self {
        Self {
            base_lr: 3e-4,
            warmup_steps: 200,
            decay_steps: 1000,
            min_lr_factor: 0.0,
        }
    }
}

pub trait LrScheduler: Send + Sync {
    fn lr_at(&self, step: usize) -> f64;
}

/// Linear warmup to `base_lr`, then linear decay to `base_lr * min_lr_factor`.
pub struct WarmupLinearDecay {
    config: LrSchedulerConfig,
}

impl LrScheduler for WarmupLinearDecay {
    fn lr_at(&self, step: usize) -> f64 {
        let c = &self.config;
        let min_lr = c.base_lr * c.min_lr_factor;

        if step < c.warmup_steps {
            return c.base_lr * step as f64 / c.warmup_steps as f64;
        }

        let decayed = step - c.warmup_steps;
        if c.decay_steps == 0 || decayed >= c.decay_steps {
            return min_lr;
        }

        let frac = 1.0 - decayed as f64 / c.decay_steps as f64;
        min_lr + (c.base_lr - min_lr) * frac
    }
}

pub fn build_lr_schedulers(config: &LrSchedulerConfig) -> Result<Box<dyn LrScheduler>> {
    if config.base_lr <= 0.0 {
        anyhow::bail!("base learning rate must be positive, got {}", config.base_lr);
    }
    if !(0.0..=1.0).contains(&config.min_lr_factor) {
        anyhow::bail!(
            "min_lr_factor must be within [0, 1], got {}",
            config.min_lr_factor
        );
    }
    Ok(Box::new(WarmupLinearDecay { config: *config }))
}
