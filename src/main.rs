//! Trains the MLP on Fashion-MNIST, evaluates it on the held-out split,
//! then reports the top-3 predictions for one test example.
//!
//! The dataset is downloaded into `./data` on first run.

use anyhow::Result;
use dfdx::losses::cross_entropy_with_logits_loss;

use fashion_mnist_mlp::{
    data::FashionMnist,
    eval::evaluate,
    model::build_model,
    predict::predict_label,
    train::train,
    Dev,
};

const SEED: u64 = 0;
const NUM_EPOCHS: usize = 5;

fn main() -> Result<()> {
    let dev = Dev::seed_from_u64(SEED);

    let train_set = FashionMnist::load(true);
    let test_set = FashionMnist::load(false);

    let mut model = build_model(&dev);
    train(
        &mut model,
        &train_set,
        cross_entropy_with_logits_loss,
        NUM_EPOCHS,
        &dev,
    );

    evaluate(&model, &test_set, cross_entropy_with_logits_loss, true, &dev);

    let (images, _) = test_set
        .batches(&dev)
        .next()
        .expect("test split should not be empty");
    predict_label(&model, &images, 1, &dev)?;

    Ok(())
}
