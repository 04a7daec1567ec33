//! NSIGII Core - trinary symbols, noise sources, and error handling

pub mod entropy;
pub mod error;
pub mod noise;
pub mod types;

pub use entropy::{histogram_entropy, histogram_entropy_of, normalized_entropy, Estimator, HISTOGRAM_SAMPLES};
pub use error::{Error, Result};
pub use noise::{NoiseSource, ScriptedNoise, SystemNoise};
pub use types::*;
