//! A small feed-forward image classifier for the Fashion-MNIST dataset,
//! built on [dfdx].
//!
//! The pipeline is strictly linear: [`data`] supplies normalized
//! `(images, labels)` batches, [`model`] builds an untrained MLP,
//! [`train`] runs a fixed-epoch momentum-SGD loop, [`eval`] measures
//! accuracy/loss on the held-out split, and [`predict`] reports the
//! top-3 class probabilities for a single example.
//!
//! ```no_run
//! use dfdx::{losses::cross_entropy_with_logits_loss, tensor::AutoDevice};
//! use fashion_mnist_mlp::{data::FashionMnist, model, train::train};
//!
//! let dev = AutoDevice::seed_from_u64(0);
//! let train_set = FashionMnist::load(true);
//! let mut mlp = model::build_model(&dev);
//! train(&mut mlp, &train_set, cross_entropy_with_logits_loss, 5, &dev);
//! ```

pub mod data;
pub mod error;
pub mod eval;
pub mod metrics;
pub mod model;
pub mod predict;
pub mod train;

pub use error::Error;

/// The device all tensors in this crate live on.
pub type Dev = dfdx::tensor::AutoDevice;
