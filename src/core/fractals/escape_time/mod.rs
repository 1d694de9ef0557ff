pub mod algorithm;
pub mod palette;
