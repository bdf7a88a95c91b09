//! Inference-mode pass over a held-out split.

use dfdx::{data::OneHotEncode, prelude::*};

use crate::{
    data::FashionMnist,
    metrics::num_correct,
    model::{ClassProbs, Logits, Model},
    Dev,
};

/// Accumulated metrics for one pass over a data stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalStats {
    pub loss_sum: f32,
    pub num_batches: usize,
    pub correct: usize,
    pub total: usize,
}

impl EvalStats {
    pub fn accuracy(&self) -> f32 {
        100.0 * self.correct as f32 / self.total as f32
    }

    pub fn avg_loss(&self) -> f32 {
        self.loss_sum / self.num_batches as f32
    }
}

/// Runs one full pass over `data` without touching any parameter and
/// returns the accumulated metrics. No gradient tape is allocated, so
/// evaluating is side-effect free and repeatable.
pub fn run_pass<C>(model: &Model, data: &FashionMnist, criterion: C, dev: &Dev) -> EvalStats
where
    C: Fn(Logits, ClassProbs) -> Tensor<Rank0, f32, Dev>,
{
    let mut stats = EvalStats {
        loss_sum: 0.0,
        num_batches: 0,
        correct: 0,
        total: 0,
    };
    for (images, labels) in data.batches(dev) {
        let targets = dev.one_hot_encode(Const::<10>, labels.clone());
        let logits = model.forward(images);
        stats.correct += num_correct(&logits.as_vec(), &labels);
        stats.total += labels.len();
        stats.loss_sum += criterion(logits, targets).array();
        stats.num_batches += 1;
    }
    stats
}

/// Evaluates `model` on `data` and prints the accuracy percentage,
/// preceded by the mean loss when `show_loss` is set.
pub fn evaluate<C>(model: &Model, data: &FashionMnist, criterion: C, show_loss: bool, dev: &Dev)
where
    C: Fn(Logits, ClassProbs) -> Tensor<Rank0, f32, Dev>,
{
    let stats = run_pass(model, data, criterion, dev);
    if show_loss {
        println!("Average loss: {:.4}", stats.avg_loss());
    }
    println!("Accuracy: {:.2}%", stats.accuracy());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::IMAGE_SIZE;
    use crate::model::build_model;

    fn synthetic(n: usize) -> FashionMnist {
        let images: Vec<u8> = (0..IMAGE_SIZE * n).map(|i| (i % 17 * 15) as u8).collect();
        let labels: Vec<u8> = (0..n).map(|i| (i % 10) as u8).collect();
        FashionMnist::from_raw(images, labels)
    }

    #[test]
    fn test_repeated_passes_are_identical() {
        let dev = Dev::seed_from_u64(3);
        let data = synthetic(100);
        let model = build_model(&dev);
        let first = run_pass(&model, &data, cross_entropy_with_logits_loss, &dev);
        let second = run_pass(&model, &data, cross_entropy_with_logits_loss, &dev);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pass_does_not_mutate_parameters() {
        let dev = Dev::seed_from_u64(3);
        let data = synthetic(20);
        let model = build_model(&dev);
        let weights_before = model.0 .0.weight.as_vec();
        run_pass(&model, &data, cross_entropy_with_logits_loss, &dev);
        assert_eq!(model.0 .0.weight.as_vec(), weights_before);
    }

    #[test]
    fn test_stats_cover_every_example() {
        let dev = Dev::seed_from_u64(3);
        let data = synthetic(70);
        let stats = run_pass(&build_model(&dev), &data, cross_entropy_with_logits_loss, &dev);
        assert_eq!(stats.total, 70);
        assert_eq!(stats.num_batches, 2);
        assert!(stats.correct <= stats.total);
        assert!(stats.avg_loss().is_finite());
    }
}
