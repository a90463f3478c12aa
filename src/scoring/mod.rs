pub mod points;

pub use points::{round_total, score};
