pub mod dist;
pub mod matrix;

pub use dist::{normal_cdf, two_tailed_p_value};
pub use matrix::{inverse, multiply, subtract, transpose};
