mod filler;
mod linear;
mod nearest;

pub use filler::{fill, FillStrategy, GapFiller};
