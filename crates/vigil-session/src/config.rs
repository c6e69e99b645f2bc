/// Default number of frames a temporal scorer sees at once.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 8;

/// Default JPEG quality for the lossy raster round trip.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default confidence threshold separating "flagged" from "clear".
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Configuration for one classification session.
///
/// The model name selects which loaded scorer the session runs against;
/// switching models means tearing the session down and starting a new one.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    model: String,
    sequence_length: usize,
    jpeg_quality: u8,
    threshold: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: "base".to_string(),
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SessionConfig {
    /// Set the logical model name to activate ("base", "conv1d", "gru",
    /// "tsm" in the stock roster).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the fallback sequence length used when the scorer does not
    /// declare a time axis.
    pub fn with_sequence_length(mut self, sequence_length: usize) -> Self {
        self.sequence_length = sequence_length;
        self
    }

    /// Set the JPEG quality of the raster round trip.
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }

    /// Set the confidence threshold above which a frame is flagged.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
