use std::env;

use anyhow::Context;
use log::{info, warn};
use multilayer_network::{
    arch::{Network, NetworkBuilder},
    config::RunConfig,
    dataset::{self, Dataset},
    initialization::{DEFAULT_SEED, RandParamGen},
    training::BackpropTrainer,
};

const CONFIG_ENV: &str = "MLN_CONFIG";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    info!("{config:?}");

    let mut train = dataset::read_dataset(&config.train_path, config.limit)
        .with_context(|| format!("reading {}", config.train_path.display()))?;
    train.normalize(config.scale);

    let mut network = build_network(&config, &train)?;

    let stats = BackpropTrainer::new(&mut network, config.learning_rate)
        .train(&train, config.max_epochs);

    if let Some(last) = stats.last() {
        info!(
            "trained {} epochs, last accuracy {:.2}%",
            stats.len(),
            last.accuracy()
        );
    }

    let Some(test_path) = &config.test_path else {
        warn!("no test set configured, skipping predictions");
        return Ok(());
    };

    let mut features = dataset::read_features(test_path, config.limit)
        .with_context(|| format!("reading {}", test_path.display()))?;
    dataset::normalize(&mut features, config.scale);
    network
        .check_width(features.ncols())
        .with_context(|| format!("checking {}", test_path.display()))?;

    let predictions = network.recognize_all(features.view());
    dataset::write_predictions(&config.output_path, &predictions)
        .with_context(|| format!("writing {}", config.output_path.display()))?;

    Ok(())
}

fn load_config() -> anyhow::Result<RunConfig> {
    let path = env::args().nth(1).or_else(|| env::var(CONFIG_ENV).ok());

    let Some(path) = path else {
        warn!("no configuration given, using the defaults");
        return Ok(RunConfig::default());
    };

    info!("loading configuration from {path}");
    RunConfig::from_path(&path).with_context(|| format!("loading {path}"))
}

fn build_network(config: &RunConfig, train: &Dataset) -> anyhow::Result<Network> {
    let builder = config
        .hidden_layers
        .iter()
        .fold(NetworkBuilder::new(train.x_size(), config.outputs), |b, &n| {
            b.add_layer(n)
        })
        .act_fn(config.act_fn.into());

    let network = if config.random_weights && config.seed != DEFAULT_SEED {
        let mut param_gen = RandParamGen::seeded(config.seed, usize::MAX);
        builder.build_with(&mut param_gen)?
    } else {
        builder.build(config.random_weights)?
    };

    Ok(network)
}
