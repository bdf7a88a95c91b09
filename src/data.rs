//! Fashion-MNIST data supply: download, normalization, and batching.

use dfdx::{
    data::{ExactSizeDataset, IteratorCollateExt},
    prelude::*,
};
use mnist::MnistBuilder;

use crate::Dev;

/// Pixels per image (28x28, single channel), flattened for the MLP.
pub const IMAGE_SIZE: usize = 28 * 28;

/// Number of target classes.
pub const NUM_CLASSES: usize = 10;

/// Examples per batch.
pub const BATCH_SIZE: usize = 64;

/// Mean/stddev used to normalize pixel intensities after scaling to [0, 1].
const NORMALIZE_MEAN: f32 = 0.1307;
const NORMALIZE_STD: f32 = 0.3081;

const DATA_DIR: &str = "data";
const TRAIN_LEN: u32 = 60_000;
const TEST_LEN: u32 = 10_000;

/// Human readable class names, ordered by model output channel.
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "T-shirt/top",
    "Trouser",
    "Pullover",
    "Dress",
    "Coat",
    "Sandal",
    "Shirt",
    "Sneaker",
    "Bag",
    "Ankle Boot",
];

/// A stacked batch of flattened, normalized images.
pub type ImageBatch = Tensor<(usize, Const<784>), f32, Dev>;

/// One split of the Fashion-MNIST dataset, held fully in memory with
/// pixels already normalized.
pub struct FashionMnist {
    images: Vec<f32>,
    labels: Vec<u8>,
}

impl FashionMnist {
    /// Loads the training split (`training == true`) or the held-out test
    /// split from `./data`, downloading the dataset on first use.
    ///
    /// Panics if the dataset cannot be fetched or read; there is no
    /// recovery path for a missing dataset.
    pub fn load(training: bool) -> Self {
        let raw = MnistBuilder::new()
            .base_path(DATA_DIR)
            .use_fashion_data()
            .label_format_digit()
            .training_set_length(TRAIN_LEN)
            .validation_set_length(0)
            .test_set_length(TEST_LEN)
            .download_and_extract()
            .finalize();
        if training {
            Self::from_raw(raw.trn_img, raw.trn_lbl)
        } else {
            Self::from_raw(raw.tst_img, raw.tst_lbl)
        }
    }

    /// Builds a dataset from raw `u8` pixels and labels, applying the
    /// fixed affine normalization.
    ///
    /// Panics if the pixel count is not `784 * labels.len()` or any label
    /// is outside `[0, 9]`.
    pub fn from_raw(images: Vec<u8>, labels: Vec<u8>) -> Self {
        assert_eq!(images.len(), IMAGE_SIZE * labels.len());
        assert!(labels.iter().all(|&l| (l as usize) < NUM_CLASSES));
        let images = images
            .iter()
            .map(|&p| (p as f32 / 255.0 - NORMALIZE_MEAN) / NORMALIZE_STD)
            .collect();
        Self { images, labels }
    }

    /// Iterates the full split once, in dataset order, as stacked batches
    /// of [BATCH_SIZE]. The trailing batch is smaller when the split size
    /// is not a multiple of [BATCH_SIZE].
    pub fn batches<'a>(
        &'a self,
        dev: &'a Dev,
    ) -> impl ExactSizeIterator<Item = (ImageBatch, Vec<usize>)> + 'a {
        (0..self.len())
            .map(|i| self.get(i))
            .map(|(img, lbl)| (dev.tensor_from_vec(img, (Const::<784>,)), lbl))
            .batch_ragged(BATCH_SIZE)
            .collate()
            .map(|(images, labels): (Vec<_>, _)| (images.stack(), labels))
    }
}

impl ExactSizeDataset for FashionMnist {
    type Item<'a> = (Vec<f32>, usize) where Self: 'a;
    fn get(&self, index: usize) -> Self::Item<'_> {
        let start = IMAGE_SIZE * index;
        (
            self.images[start..start + IMAGE_SIZE].to_vec(),
            self.labels[index] as usize,
        )
    }
    fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Like [dfdx::data::IteratorBatchExt::batch] with a [usize] size, except
/// the final short batch is yielded instead of dropped, so every example
/// of the split is seen exactly once per pass.
pub trait IteratorRaggedBatchExt: Iterator {
    fn batch_ragged(self, size: usize) -> RaggedBatcher<Self>
    where
        Self: Sized,
    {
        RaggedBatcher { size, iter: self }
    }
}
impl<I: Iterator> IteratorRaggedBatchExt for I {}

pub struct RaggedBatcher<I> {
    size: usize,
    iter: I,
}

impl<I: ExactSizeIterator> ExactSizeIterator for RaggedBatcher<I>
where
    Self: Iterator,
{
    fn len(&self) -> usize {
        (self.iter.len() + self.size - 1) / self.size
    }
}

impl<I: Iterator> Iterator for RaggedBatcher<I> {
    type Item = Vec<I::Item>;
    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.size);
        for _ in 0..self.size {
            match self.iter.next() {
                Some(item) => batch.push(item),
                None => break,
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(n: usize) -> FashionMnist {
        let images = vec![128u8; IMAGE_SIZE * n];
        let labels: Vec<u8> = (0..n).map(|i| (i % NUM_CLASSES) as u8).collect();
        FashionMnist::from_raw(images, labels)
    }

    #[test]
    fn test_batch_ragged_keeps_trailing_batch() {
        let batches: Vec<Vec<usize>> = (0..10_000).batch_ragged(64).collect();
        assert_eq!(batches.len(), 157);
        assert!(batches[..156].iter().all(|b| b.len() == 64));
        assert_eq!(batches[156].len(), 16);
        assert_eq!(batches.iter().map(Vec::len).sum::<usize>(), 10_000);
    }

    #[test]
    fn test_batch_ragged_exact_multiple() {
        let batches: Vec<Vec<usize>> = (0..128).batch_ragged(64).collect();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 64));
    }

    #[test]
    fn test_batches_align_images_with_labels() {
        let dev: Dev = Default::default();
        let data = synthetic(130);
        let mut total = 0;
        for (images, labels) in data.batches(&dev) {
            assert_eq!(images.shape().0, labels.len());
            assert!(labels.iter().all(|&l| l < NUM_CLASSES));
            total += labels.len();
        }
        assert_eq!(total, 130);
    }

    #[test]
    fn test_batches_preserve_dataset_order() {
        let dev: Dev = Default::default();
        let data = synthetic(70);
        let labels: Vec<usize> = data.batches(&dev).flat_map(|(_, l)| l).collect();
        let expected: Vec<usize> = (0..70).map(|i| i % NUM_CLASSES).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_normalization() {
        let data = FashionMnist::from_raw(vec![0u8; IMAGE_SIZE], vec![3]);
        let (pixels, label) = data.get(0);
        assert_eq!(label, 3);
        let expected = (0.0 - NORMALIZE_MEAN) / NORMALIZE_STD;
        assert!(pixels.iter().all(|&p| (p - expected).abs() < 1e-6));
    }

    #[test]
    #[should_panic]
    fn test_from_raw_rejects_mismatched_lengths() {
        FashionMnist::from_raw(vec![0u8; IMAGE_SIZE], vec![1, 2]);
    }
}
