//! `egoframe-transform` – world-to-ego coordinate conversion.
//!
//! Turns points and vectors reported by the host simulator in its world frame
//! into coordinates relative to the ego vehicle, in the right-handed z-up
//! convention used downstream by planning and control.
//!
//! # Modules
//!
//! - [`converter`] – [`FrameConverter`][converter::FrameConverter]: holds one
//!   ego pose and lazily derives the world-to-ego rotation and homogeneous
//!   transform used by its two conversion operations.
//! - [`matrix`] – [`RotationMatrix`][matrix::RotationMatrix] and
//!   [`HomogeneousTransform`][matrix::HomogeneousTransform]: the fixed-size
//!   matrix algebra behind the converter.

pub mod converter;
pub mod matrix;

pub use converter::FrameConverter;
pub use matrix::{HomogeneousTransform, RotationMatrix};
