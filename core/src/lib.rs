pub mod geometry;
pub mod gamut;
pub mod sketch;
pub mod units;

pub fn version() -> &'static str {
    "0.1.0"
}
