use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::audio::domain::audio_track::AudioTrack;
use crate::video::domain::audio_reader::AudioReader;

/// Decodes a PCM WAV file into normalized f32 samples.
///
/// Handles the 16-bit integer output the ffmpeg extractor produces, plus
/// 32-bit float WAVs for completeness. Channel layout is preserved.
pub struct WavAudioReader;

impl AudioReader for WavAudioReader {
    fn read_audio(&self, path: &Path) -> Result<AudioTrack, Box<dyn std::error::Error>> {
        let mut reader = WavReader::open(path)
            .map_err(|e| format!("could not open {}: {e}", path.display()))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 16) => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
                .collect::<Result<_, _>>()?,
            (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
            (format, bits) => {
                return Err(format!(
                    "unsupported WAV format: {bits}-bit {format:?} in {}",
                    path.display()
                )
                .into())
            }
        };

        Ok(AudioTrack::new(samples, spec.sample_rate, spec.channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_i16_wav(path: &Path, samples: &[i16], sample_rate: u32, channels: u16) {
        let mut writer = WavWriter::create(
            path,
            WavSpec {
                channels,
                sample_rate,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            },
        )
        .unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_16bit_mono() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        write_i16_wav(&path, &[0, i16::MAX, i16::MIN + 1, 0], 16000, 1);

        let track = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(track.samples().len(), 4);
        assert_eq!(track.sample_rate(), 16000);
        assert_eq!(track.channels(), 1);
        assert!((track.samples()[1] - 1.0).abs() < 1e-4);
        assert!((track.samples()[2] + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_read_reports_duration() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        write_i16_wav(&path, &vec![0i16; 16000], 16000, 1);

        let track = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(track.duration_ms(), 1000);
    }

    #[test]
    fn test_read_missing_file_returns_error() {
        let result = WavAudioReader.read_audio(Path::new("/nonexistent/audio.wav"));
        assert!(result.is_err());
    }

    #[test]
    fn test_read_float_wav() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("audio.wav");
        let mut writer = WavWriter::create(
            &path,
            WavSpec {
                channels: 1,
                sample_rate: 16000,
                bits_per_sample: 32,
                sample_format: SampleFormat::Float,
            },
        )
        .unwrap();
        for s in [0.0f32, 0.5, -0.5] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let track = WavAudioReader.read_audio(&path).unwrap();
        assert_eq!(track.samples(), &[0.0, 0.5, -0.5]);
    }
}
