use std::fmt;

/// One plane of a planar camera frame.
#[derive(Debug, Clone)]
pub struct Plane {
    pub data: Vec<u8>,
    /// Byte distance between the starts of consecutive rows.
    pub row_stride: usize,
    /// Byte distance between consecutive samples within a row.
    pub pixel_stride: usize,
}

impl Plane {
    pub fn new(data: Vec<u8>, row_stride: usize, pixel_stride: usize) -> Self {
        Self {
            data,
            row_stride,
            pixel_stride,
        }
    }
}

/// A single camera frame in planar YUV420 layout.
///
/// The capture source recycles a small fixed pool of buffers, so a frame must
/// be handed back promptly: the release hook runs exactly once when the frame
/// is dropped, on every exit path of the handler that owns it.
pub struct RawFrame {
    width: u32,
    height: u32,
    planes: Vec<Plane>,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("planes", &self.planes.len())
            .field("has_release_hook", &self.release.is_some())
            .finish()
    }
}

impl RawFrame {
    pub fn new(width: u32, height: u32, planes: Vec<Plane>) -> Self {
        Self {
            width,
            height,
            planes,
            release: None,
        }
    }

    /// Attach a hook that hands the frame's buffers back to the source pool.
    pub fn with_release_hook(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(hook));
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

impl Drop for RawFrame {
    fn drop(&mut self) {
        if let Some(hook) = self.release.take() {
            hook();
        }
    }
}
