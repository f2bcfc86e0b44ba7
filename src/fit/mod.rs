mod ols;

pub use ols::fit;
