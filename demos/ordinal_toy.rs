//! Train a CORAL head on a synthetic ordinal task and report MAE/MSE/accuracy.
//!
//! Run with `RUST_LOG=debug cargo run --example ordinal_toy` to see per-epoch loss.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use rust_coral::{
    CoralConfig, CoralHead, CoralLoss, OrdinalReport, ScoreModel, labels_to_levels,
    task_importance_weights,
};

const INPUT_DIM: usize = 4;

/// Samples whose features drift with the label, plus uniform noise.
fn make_split(
    rng: &mut StdRng,
    n_per_class: usize,
    num_classes: usize,
) -> (Vec<f32>, Vec<usize>) {
    let mut xs = Vec::with_capacity(n_per_class * num_classes * INPUT_DIM);
    let mut ys = Vec::with_capacity(n_per_class * num_classes);
    for class in 0..num_classes {
        let center = class as f32 / (num_classes - 1) as f32;
        for _ in 0..n_per_class {
            xs.push(center + rng.gen_range(-0.15..0.15));
            xs.push(0.5 * center + rng.gen_range(-0.3..0.3));
            xs.push(rng.gen_range(-1.0..1.0));
            xs.push(1.0 - center + rng.gen_range(-0.2..0.2));
            ys.push(class);
        }
    }
    (xs, ys)
}

#[cfg(feature = "serde")]
fn load_config() -> rust_coral::Result<CoralConfig> {
    CoralConfig::from_toml_str("num_classes = 5")
}

#[cfg(not(feature = "serde"))]
fn load_config() -> rust_coral::Result<CoralConfig> {
    CoralConfig::new(5)
}

fn main() -> rust_coral::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = StdRng::seed_from_u64(0);
    let cfg = load_config()?;
    let k = cfg.num_thresholds();

    let (train_x, train_y) = make_split(&mut rng, 200, cfg.num_classes);
    let (test_x, test_y) = make_split(&mut rng, 50, cfg.num_classes);

    let weights = task_importance_weights(&train_y, cfg.num_classes)?;
    let cfg = cfg.with_importance_weights(weights)?;
    let loss = CoralLoss::from_config(&cfg)?;
    let levels = labels_to_levels(&train_y, cfg.num_classes)?;

    let mut head = CoralHead::new_with_seed(INPUT_DIM, cfg.num_classes, 0)?;

    let batch_size = 32;
    let lr = 0.5;
    let epochs = 50;

    let mut logits = vec![0.0_f32; batch_size * k];
    let mut d_logits = vec![0.0_f32; batch_size * k];
    let mut d_x = [0.0_f32; INPUT_DIM];
    let mut d_w = [0.0_f32; INPUT_DIM];
    let mut d_b = vec![0.0_f32; k];
    let mut acc_w = [0.0_f32; INPUT_DIM];
    let mut acc_b = vec![0.0_f32; k];

    let mut order: Vec<usize> = (0..train_y.len()).collect();
    let mut batch_levels = vec![0.0_f32; batch_size * k];

    for epoch in 0..epochs {
        // Fisher-Yates with the demo's own RNG.
        for i in (1..order.len()).rev() {
            let j = rng.gen_range(0..=i);
            order.swap(i, j);
        }

        let mut epoch_loss = 0.0_f32;
        let mut batches = 0;
        for chunk in order.chunks(batch_size) {
            let n = chunk.len();
            for (row, &idx) in chunk.iter().enumerate() {
                let x = &train_x[idx * INPUT_DIM..(idx + 1) * INPUT_DIM];
                head.forward(x, &mut logits[row * k..(row + 1) * k]);
                batch_levels[row * k..(row + 1) * k]
                    .copy_from_slice(&levels[idx * k..(idx + 1) * k]);
            }

            epoch_loss += loss.backward(
                &logits[..n * k],
                &batch_levels[..n * k],
                n,
                &mut d_logits[..n * k],
            )?;
            batches += 1;

            acc_w.fill(0.0);
            acc_b.fill(0.0);
            for (row, &idx) in chunk.iter().enumerate() {
                let x = &train_x[idx * INPUT_DIM..(idx + 1) * INPUT_DIM];
                let d_row = &d_logits[row * k..(row + 1) * k];
                head.backward(x, d_row, &mut d_x, &mut d_w, &mut d_b);
                for (a, &g) in acc_w.iter_mut().zip(&d_w) {
                    *a += g;
                }
                for (a, &g) in acc_b.iter_mut().zip(&d_b) {
                    *a += g;
                }
            }
            head.sgd_step(&acc_w, &acc_b, lr);
        }

        tracing::debug!(epoch, loss = epoch_loss / batches as f32, "epoch done");
    }

    let train_report = OrdinalReport::compute(&head.predict_labels(&train_x)?, &train_y)?;
    let test_report = OrdinalReport::compute(&head.predict_labels(&test_x)?, &test_y)?;
    tracing::info!(
        mae = train_report.mae,
        mse = train_report.mse,
        accuracy = train_report.accuracy,
        "train"
    );
    tracing::info!(
        mae = test_report.mae,
        mse = test_report.mse,
        accuracy = test_report.accuracy,
        "test"
    );
    println!("weights={:?} biases={:?}", head.weights(), head.biases());

    Ok(())
}
