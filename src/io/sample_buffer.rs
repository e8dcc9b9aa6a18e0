//! Recorded audio accumulation

/// Collects the chunks a recorder emits while capturing
///
/// Recording plumbing pushes one chunk per analyser tick; once recording stops,
/// the combined buffer is what the audio extractor consumes.
#[derive(Debug, Default, Clone)]
pub struct SampleBuffer {
    /// Buffer data
    data: Vec<f32>,
    /// Number of chunks pushed so far
    chunks: usize,
}

impl SampleBuffer {
    /// Create a new sample buffer
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            chunks: 0,
        }
    }

    /// Append one recorded chunk
    pub fn push(&mut self, samples: &[f32]) {
        self.data.extend_from_slice(samples);
        self.chunks += 1;
    }

    /// Number of chunks pushed
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Combined samples recorded so far
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Consume the buffer, returning the combined samples
    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Drop everything recorded so far
    pub fn clear(&mut self) {
        self.data.clear();
        self.chunks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_are_concatenated_in_order() {
        let mut buffer = SampleBuffer::new(8);
        buffer.push(&[0.1, 0.2]);
        buffer.push(&[0.3]);

        assert_eq!(buffer.chunk_count(), 2);
        assert_eq!(buffer.samples(), &[0.1, 0.2, 0.3]);
        assert_eq!(buffer.into_samples(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = SampleBuffer::default();
        buffer.push(&[0.5; 4]);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.chunk_count(), 0);
    }
}
