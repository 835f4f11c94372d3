//! Core types and geometry for camera-based marker ranging.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector or image type: the centroid of a
//! detected marker is supplied by a [`CentroidLocator`] implemented elsewhere.
//!
//! Bearings are signed, positive when the marker is left of the image center.

mod centroid;
mod error;
mod geometry;
mod image;
mod logger;
mod mapper;
mod result;

pub use centroid::{Centroid, CentroidLocator, FixedCentroid, LocateError};
pub use error::GeometryError;
pub use geometry::{focal_length_px, CameraBaseline, FieldOfView};
pub use image::{GrayImage, GrayImageView, ImageDims, ImageSize};
pub use mapper::{pixel_to_bearing, AngularMapper, Bearing};
pub use result::{DistanceResult, EstimateSource};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
