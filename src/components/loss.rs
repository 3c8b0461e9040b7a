use std::sync::Arc;

use crate::Result;

/// Loss over one batch: rows of logits (one row per position) against
/// target token ids. Returns the mean loss.
pub type LossFn = Arc<dyn Fn(&[Vec<f32>], &[u32]) -> Result<f32> + Send + Sync>;

pub fn build_cross_entropy_loss() -> LossFn {
    Arc::new(cross_entropy)
}

fn cross_entropy(logits: &[Vec<f32>], targets: &[u32]) -> Result<f32> {
    if logits.is_empty() {
        anyhow::bail!("cross entropy over an empty batch");
    }
    if logits.len() != targets.len() {
        anyhow::bail!(
            "logits/targets length mismatch: {} vs {}",
            logits.len(),
            targets.len()
        );
    }

    let mut total = 0.0f64;
    for (row, &target) in logits.iter().zip(targets) {
        let target = target as usize;
        if target >= row.len() {
            anyhow::bail!("target id {} out of vocab range {}", target, row.len());
        }

        // log-softmax via the max-shifted logsumexp
        let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let sum_exp: f32 = row.iter().map(|&l| (l - max).exp()).sum();
        let log_sum_exp = max + sum_exp.ln();
        total += f64::from(log_sum_exp - row[target]);
    }

    Ok((total / logits.len() as f64) as f32)
}
