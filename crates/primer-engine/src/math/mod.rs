//! Affine transform math.
//!
//! Only what the frame pipeline needs: 4x4 column-major matrices, the handful of
//! constructors used to build object/camera transforms, and their product.
//!
//! Conventions:
//! - storage is column-major (`m[col * 4 + row]`), matching GPU uniform layout
//! - vectors are columns multiplied on the right (`M · v`)
//! - rotations are right-handed and counter-clockwise about every axis

mod mat4;

pub use mat4::Mat4;
