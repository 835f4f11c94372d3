use serde::{Deserialize, Serialize};

/// Anything the estimators can read a pixel width from.
///
/// The estimators never look at pixel data; centroid locators do.
pub trait ImageSize {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
}

/// Image known only by its dimensions, for callers that located the marker
/// elsewhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ImageDims {
    pub width: usize,
    pub height: usize,
}

impl ImageDims {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Borrowed row-major grayscale pixels, as handed to a centroid locator.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// All-black image of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl ImageSize for GrayImageView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

impl ImageSize for GrayImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

impl ImageSize for ImageDims {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}

#[cfg(feature = "image")]
impl<P, C> ImageSize for ::image::ImageBuffer<P, C>
where
    P: ::image::Pixel,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    fn width(&self) -> usize {
        ::image::ImageBuffer::width(self) as usize
    }

    fn height(&self) -> usize {
        ::image::ImageBuffer::height(self) as usize
    }
}

impl<T: ImageSize + ?Sized> ImageSize for &T {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }
}
