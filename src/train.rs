//! Fixed-epoch training loop: momentum-SGD over the full data supply.

use dfdx::{
    data::OneHotEncode,
    optim::{Momentum, Optimizer, Sgd, SgdConfig},
    prelude::*,
};
use indicatif::ProgressIterator;

use crate::{
    data::FashionMnist,
    metrics::num_correct,
    model::{ClassProbs, Logits, Model},
    Dev,
};

const LEARNING_RATE: f64 = 1e-3;
const MOMENTUM: f64 = 0.9;

/// A scalar loss still attached to the gradient tape.
pub type TracedLoss = Tensor<Rank0, f32, Dev, OwnedTape<f32, Dev>>;

/// Runs `epochs` full passes over `data`, updating `model` in place with
/// momentum-SGD and printing accuracy and mean loss after each pass.
///
/// `criterion` maps traced logits and one-hot targets to a scalar loss;
/// the binary passes [cross_entropy_with_logits_loss].
///
/// With `epochs == 0` the model is left untouched and nothing is printed.
pub fn train<C>(model: &mut Model, data: &FashionMnist, criterion: C, epochs: usize, dev: &Dev)
where
    C: Fn(Logits<OwnedTape<f32, Dev>>, ClassProbs) -> TracedLoss,
{
    let mut opt = Sgd::new(
        model,
        SgdConfig {
            lr: LEARNING_RATE,
            momentum: Some(Momentum::Classic(MOMENTUM)),
            weight_decay: None,
        },
    );
    let mut grads = model.alloc_grads();

    for epoch in 0..epochs {
        let mut correct = 0;
        let mut total = 0;
        let mut running_loss = 0.0;
        let mut num_batches = 0;

        for (images, labels) in data.batches(dev).progress() {
            let targets = dev.one_hot_encode(Const::<10>, labels.clone());
            let logits = model.forward_mut(images.traced(grads));
            let scores = logits.as_vec();
            let loss = criterion(logits, targets);

            running_loss += loss.array();
            grads = loss.backward();
            opt.update(model, &grads)
                .expect("every parameter should receive a gradient");
            model.zero_grads(&mut grads);

            correct += num_correct(&scores, &labels);
            total += labels.len();
            num_batches += 1;
        }

        let accuracy = 100.0 * correct as f32 / total as f32;
        let avg_loss = running_loss / num_batches as f32;
        println!(
            "Train Epoch: {epoch}  Accuracy: {correct}/{total}({accuracy:.2}%)  Loss: {avg_loss:.3}"
        );
    }
}
