//! Host-side accuracy accounting shared by the training and evaluation
//! passes.

use crate::data::NUM_CLASSES;

/// Index of the largest score; ties resolve to the earliest class.
pub fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate() {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

/// Counts predictions whose highest-scoring class matches the label.
/// `logits` is the row-major `[batch, NUM_CLASSES]` output of the model.
pub fn num_correct(logits: &[f32], labels: &[usize]) -> usize {
    assert_eq!(logits.len(), NUM_CLASSES * labels.len());
    logits
        .chunks_exact(NUM_CLASSES)
        .zip(labels)
        .filter(|(row, &label)| argmax(row) == label)
        .count()
}
