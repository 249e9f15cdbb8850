//! Show how per-threshold biases move the predicted rank for a fixed base score.

use rust_coral::{CoralHead, ScoreModel, is_rank_consistent};

fn main() -> rust_coral::Result<()> {
    // One input feature; `w . x = -0.57` for x = [1.0].
    let equal = CoralHead::from_parts(vec![-0.57], vec![0.0; 4])?;
    let shifted = CoralHead::from_parts(vec![-0.57], vec![0.0, 1.0, 2.0, 3.0])?;

    for (name, head) in [("equal biases", &equal), ("biases 0..3", &shifted)] {
        let scores = head.scores(&[1.0])?;
        let probas = head.probabilities(&[1.0])?;
        let label = head.predict_label(&[1.0])?;
        println!(
            "{name}: scores={scores:?} probas={probas:?} label={label} rank_consistent={}",
            is_rank_consistent(&probas)
        );
    }
    Ok(())
}
