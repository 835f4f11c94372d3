//! `image` crate support for frames named by path in config files.

use std::path::Path;

use crate::core::ImageDims;
use crate::EstimateError;

/// Read only the header of an image file to get its dimensions.
pub fn image_dims_from_path(path: impl AsRef<Path>) -> Result<ImageDims, EstimateError> {
    let path = path.as_ref();
    let (width, height) =
        ::image::image_dimensions(path).map_err(|e| EstimateError::ImageRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    Ok(ImageDims::new(width as usize, height as usize))
}
