//! The fixed-topology fully connected network.

use dfdx::prelude::*;

use crate::Dev;

/// Architecture: three dense layers stepping 784 -> 128 -> 64 -> 10, with
/// ReLU between them. Images are flattened to 784-vectors by the data
/// supply, so no flatten layer appears here.
pub type Mlp = (
    (Linear<784, 128>, ReLU),
    (Linear<128, 64>, ReLU),
    Linear<64, 10>,
);

/// The [Mlp] instantiated on the crate device. Owns all weight/bias
/// tensors; the training loop is the only thing that mutates them.
pub type Model = <Mlp as BuildOnDevice<Dev, f32>>::Built;

/// Raw per-class scores for a batch, optionally carrying a gradient tape.
pub type Logits<T = NoneTape> = Tensor<(usize, Const<10>), f32, Dev, T>;

/// One-hot target distributions for a batch.
pub type ClassProbs = Tensor<(usize, Const<10>), f32, Dev>;

/// Returns a fresh, untrained [Model] with framework-initialized
/// parameters. Reproducibility comes from the device: build it with
/// [AutoDevice::seed_from_u64] and two calls yield identical weights.
pub fn build_model(dev: &Dev) -> Model {
    dev.build_module::<Mlp, f32>()
}
