use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use vigil_base::Tensor;

/// Bounded, ordered buffer of the most recent frame tensors.
///
/// Feeds sequence-aware scorers that need `capacity` frames of temporal
/// context. Push evicts from the head once the buffer is full, so the window
/// always holds the latest frames in arrival order. All operations run under
/// one mutex; `snapshot` copies the handles under that same lock so a reader
/// never observes a torn view of an eviction in progress.
pub struct TemporalWindow {
    capacity: usize,
    frames: Mutex<VecDeque<Arc<Tensor<f32>>>>,
}

impl TemporalWindow {
    /// Create a window holding at most `capacity` frames.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be at least 1");
        Self {
            capacity,
            frames: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a frame at the tail, evicting the oldest while over capacity.
    pub fn push(&self, frame: Arc<Tensor<f32>>) {
        let mut frames = self.frames.lock().unwrap_or_else(|e| e.into_inner());
        frames.push_back(frame);
        while frames.len() > self.capacity {
            frames.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the window holds a full sequence.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Point-in-time copy of the window, oldest first.
    ///
    /// Returns cloned handles, never a live view; a concurrent `push` cannot
    /// mutate what the caller received.
    pub fn snapshot(&self) -> Vec<Arc<Tensor<f32>>> {
        let frames = self.frames.lock().unwrap_or_else(|e| e.into_inner());
        frames.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tag: f32) -> Arc<Tensor<f32>> {
        Arc::new(Tensor::new(vec![1, 1, 3], vec![tag; 3]).unwrap())
    }

    #[test]
    fn size_never_exceeds_capacity() {
        let window = TemporalWindow::new(3);
        for i in 0..10 {
            window.push(frame(i as f32));
            assert!(window.len() <= 3);
        }
        assert!(window.is_full());
    }

    #[test]
    fn snapshot_keeps_push_order_of_latest_frames() {
        let window = TemporalWindow::new(3);
        for i in 0..5 {
            window.push(frame(i as f32));
        }
        let tags: Vec<f32> = window.snapshot().iter().map(|t| t.data[0]).collect();
        assert_eq!(tags, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn not_full_until_capacity_reached() {
        let window = TemporalWindow::new(8);
        for i in 0..7 {
            window.push(frame(i as f32));
            assert!(!window.is_full());
        }
        window.push(frame(7.0));
        assert!(window.is_full());
    }

    #[test]
    fn snapshot_is_detached_from_later_pushes() {
        let window = TemporalWindow::new(2);
        window.push(frame(1.0));
        window.push(frame(2.0));
        let snap = window.snapshot();
        window.push(frame(3.0));
        let tags: Vec<f32> = snap.iter().map(|t| t.data[0]).collect();
        assert_eq!(tags, vec![1.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_is_rejected() {
        TemporalWindow::new(0);
    }
}
