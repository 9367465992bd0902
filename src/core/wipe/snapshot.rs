//=========================================================================
// Frame Snapshot
//=========================================================================
//
// Full-screen palette-indexed pixel buffer, row-major, one byte a pixel.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::WipeError;

//=== FrameSnapshot =======================================================

/// A captured full-screen frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl FrameSnapshot {
    //--- Construction -----------------------------------------------------

    /// Creates a frame filled with palette index `fill`.
    pub fn filled(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// Wraps an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// [`WipeError::BufferSize`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, WipeError> {
        if pixels.len() != width * height {
            return Err(WipeError::BufferSize {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width and height as a pair.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw row-major pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable raw row-major pixels.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`; `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    //--- Column Copies ----------------------------------------------------

    /// Copies `rows` rows of columns `[x0, x1)` from `src` (starting at
    /// `src_y`) into `self` (starting at `dst_y`).
    pub(super) fn copy_columns(
        &mut self,
        src: &FrameSnapshot,
        x0: usize,
        x1: usize,
        src_y: usize,
        dst_y: usize,
        rows: usize,
    ) {
        let width = self.width;
        for row in 0..rows {
            let s = (src_y + row) * width;
            let d = (dst_y + row) * width;
            self.pixels[d + x0..d + x1].copy_from_slice(&src.pixels[s + x0..s + x1]);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
