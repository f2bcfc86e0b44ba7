pub mod align;
pub mod sample;

pub use align::{
    AlignedPredictor, aligned_predictors, build_observations, min_max_scale, predictor_kinds,
};
pub use sample::{SampleConfig, SampleData, generate_sample};
