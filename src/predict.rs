//! Top-3 class reporting for a single example.

use dfdx::prelude::*;

use crate::{
    data::{ImageBatch, CLASS_NAMES},
    model::Model,
    Dev, Error,
};

/// Softmax distribution over the 10 classes for one example of `images`.
///
/// Fails fast with [Error::IndexOutOfRange] instead of letting an invalid
/// `index` reach the tensor ops.
pub fn class_probabilities(
    model: &Model,
    images: &ImageBatch,
    index: usize,
    dev: &Dev,
) -> Result<Vec<f32>, Error> {
    let len = images.shape().0;
    if index >= len {
        return Err(Error::IndexOutOfRange { index, len });
    }
    let logits = model.forward(images.clone());
    let row: Tensor<Rank1<10>, f32, Dev> = logits.select(dev.tensor(index));
    Ok(row.softmax::<Axis<0>>().as_vec())
}

/// Prints the three most probable class names for `images[index]`, one
/// per line as `{name}: {pct}%`, sorted by descending probability.
pub fn predict_label(
    model: &Model,
    images: &ImageBatch,
    index: usize,
    dev: &Dev,
) -> Result<(), Error> {
    let probs = class_probabilities(model, images, index, dev)?;
    for (class, p) in top_k(&probs, 3) {
        println!("{}: {:.2}%", CLASS_NAMES[class], p * 100.0);
    }
    Ok(())
}

/// The `k` highest (index, value) pairs, descending. Ties keep the lower
/// class index first.
fn top_k(probs: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<usize> = (0..probs.len()).collect();
    ranked.sort_by(|&a, &b| probs[b].total_cmp(&probs[a]));
    ranked.into_iter().take(k).map(|i| (i, probs[i])).collect()
}
