/// Decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioTrack {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Total duration in whole milliseconds (floor).
    pub fn duration_ms(&self) -> u64 {
        let frames_per_sec = self.sample_rate as u64 * self.channels as u64;
        self.samples.len() as u64 * 1000 / frames_per_sec
    }

    /// Copy out the samples covering `[start_ms, end_ms)` as an owned track.
    /// The range is clamped to the track length.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> AudioTrack {
        let start = self.sample_index_at_ms(start_ms).min(self.samples.len());
        let end = self.sample_index_at_ms(end_ms).min(self.samples.len());
        let end = end.max(start);
        AudioTrack::new(
            self.samples[start..end].to_vec(),
            self.sample_rate,
            self.channels,
        )
    }

    fn sample_index_at_ms(&self, ms: u64) -> usize {
        (ms * self.sample_rate as u64 * self.channels as u64 / 1000) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_fields() {
        let track = AudioTrack::new(vec![0.0; 16000], 16000, 1);
        assert_eq!(track.samples().len(), 16000);
        assert_eq!(track.sample_rate(), 16000);
        assert_eq!(track.channels(), 1);
    }

    #[test]
    fn test_duration_mono() {
        let track = AudioTrack::new(vec![0.0; 48000], 16000, 1);
        assert_eq!(track.duration(), 3.0);
        assert_eq!(track.duration_ms(), 3000);
    }

    #[test]
    fn test_duration_stereo() {
        let track = AudioTrack::new(vec![0.0; 96000], 48000, 2);
        assert_eq!(track.duration(), 1.0);
        assert_eq!(track.duration_ms(), 1000);
    }

    #[test]
    fn test_empty_track() {
        let track = AudioTrack::new(vec![], 16000, 1);
        assert!(track.is_empty());
        assert_eq!(track.duration_ms(), 0);
    }

    #[test]
    fn test_slice_ms_copies_expected_range() {
        // 1 kHz mono: one sample per millisecond
        let samples: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let track = AudioTrack::new(samples, 1000, 1);
        let slice = track.slice_ms(10, 20);
        assert_eq!(slice.samples().len(), 10);
        assert_eq!(slice.samples()[0], 10.0);
        assert_eq!(slice.samples()[9], 19.0);
        assert_eq!(slice.sample_rate(), 1000);
    }

    #[test]
    fn test_slice_ms_clamps_past_end() {
        let track = AudioTrack::new(vec![0.0; 50], 1000, 1);
        let slice = track.slice_ms(40, 100);
        assert_eq!(slice.samples().len(), 10);
    }

    #[test]
    fn test_slice_ms_beyond_track_is_empty() {
        let track = AudioTrack::new(vec![0.0; 50], 1000, 1);
        let slice = track.slice_ms(60, 70);
        assert!(slice.is_empty());
    }
}
