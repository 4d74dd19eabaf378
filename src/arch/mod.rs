pub mod activations;
mod builder;
mod layer;
mod network;
mod neuron;

pub use builder::NetworkBuilder;
pub use layer::Layer;
pub use network::{Network, index_max};
pub use neuron::Neuron;
