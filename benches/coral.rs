use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rust_coral::{CoralHead, CoralLoss, labels_to_levels, predict_labels, probabilities};

const NUM_CLASSES: usize = 10;
const BATCH: usize = 256;

fn batch_logits() -> Vec<f32> {
    (0..BATCH * (NUM_CLASSES - 1))
        .map(|i| ((i * 37) % 101) as f32 / 10.0 - 5.0)
        .collect()
}

fn batch_labels() -> Vec<usize> {
    (0..BATCH).map(|i| (i * 7) % NUM_CLASSES).collect()
}

fn coral_loss_bench(c: &mut Criterion) {
    let loss = CoralLoss::uniform(NUM_CLASSES).unwrap();
    let logits = batch_logits();
    let levels = labels_to_levels(&batch_labels(), NUM_CLASSES).unwrap();
    let mut d_logits = vec![0.0_f32; logits.len()];

    c.bench_function("coral_loss_forward_256x9", |b| {
        b.iter(|| {
            let l = loss.forward(black_box(&logits), black_box(&levels), BATCH).unwrap();
            black_box(l);
        })
    });

    c.bench_function("coral_loss_backward_256x9", |b| {
        b.iter(|| {
            let l = loss
                .backward(
                    black_box(&logits),
                    black_box(&levels),
                    BATCH,
                    &mut d_logits,
                )
                .unwrap();
            black_box(l);
        })
    });
}

fn coral_head_bench(c: &mut Criterion) {
    let head = CoralHead::new_with_seed(128, NUM_CLASSES, 0).unwrap();
    let input = vec![0.1_f32; head.in_dim()];
    let mut logits = vec![0.0_f32; NUM_CLASSES - 1];

    c.bench_function("coral_head_forward_128_to_9", |b| {
        b.iter(|| {
            head.forward(black_box(&input), &mut logits);
            black_box(&logits);
        })
    });
}

fn decode_bench(c: &mut Criterion) {
    let probas = probabilities(&batch_logits());

    c.bench_function("predict_labels_256x9", |b| {
        b.iter(|| {
            let labels = predict_labels(black_box(&probas), NUM_CLASSES - 1).unwrap();
            black_box(labels);
        })
    });
}

criterion_group!(benches, coral_loss_bench, coral_head_bench, decode_bench);
criterion_main!(benches);
