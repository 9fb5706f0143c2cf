pub mod vector2d;
pub use self::vector2d::{angle_between, difference, dot_product, magnitude, normalize, scale, Vector2D};
