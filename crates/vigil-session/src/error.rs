use std::fmt;
use vigil_camera::CaptureError;
use vigil_image::ImageError;
use vigil_infer::InferError;

#[derive(Debug)]
pub enum SessionError {
    Capture(CaptureError),
    Image(ImageError),
    Infer(InferError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Capture(err) => write!(f, "capture error: {err}"),
            SessionError::Image(err) => write!(f, "image error: {err}"),
            SessionError::Infer(err) => write!(f, "inference error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<CaptureError> for SessionError {
    fn from(err: CaptureError) -> Self {
        SessionError::Capture(err)
    }
}

impl From<ImageError> for SessionError {
    fn from(err: ImageError) -> Self {
        SessionError::Image(err)
    }
}

impl From<InferError> for SessionError {
    fn from(err: InferError) -> Self {
        SessionError::Infer(err)
    }
}
