mod coordinates;
mod secret;

pub use coordinates::{Coordinates, CoordinatesError};
pub use secret::Secret;
