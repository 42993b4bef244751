mod capture;
mod recorder;

pub use capture::{CaptureDevice, MicCapture};
pub use recorder::{AudioRecorder, RecordingState};

use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No input device found")]
    NoInputDevice,
    #[error("Stream error: {0}")]
    Stream(String),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Device error: {0}")]
    Device(String),
    #[error("No active recording session")]
    NotRecording,
    #[error("Recording captured no audio")]
    EmptyRecording,
}

/// A finalized recording, ready to hand to transcription.
///
/// The WAV bytes are the opaque asset handle; the recorder that produced
/// them has already been released by the time a clip exists.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub wav: Vec<u8>,
    pub sample_rate: u32,
    pub duration_secs: f32,
}

impl AudioClip {
    pub fn from_samples(samples: &[f32], sample_rate: u32) -> Result<Self, AudioError> {
        let wav = encode_to_wav(samples, sample_rate, 1)?;
        Ok(Self {
            wav,
            sample_rate,
            duration_secs: samples.len() as f32 / sample_rate as f32,
        })
    }
}

/// 将 f32 采样数据编码为 WAV 格式 (16-bit PCM)
pub fn encode_to_wav(
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<u8>, AudioError> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)
        .map_err(|e| AudioError::Encoding(e.to_string()))?;

    for &sample in samples {
        // f32 (-1.0 到 1.0) 转换为 i16
        let amplitude = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(amplitude)
            .map_err(|e| AudioError::Encoding(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| AudioError::Encoding(e.to_string()))?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_is_valid() {
        let samples = vec![0.0f32, 0.5, -0.5, 1.0, -1.0];
        let wav = encode_to_wav(&samples, 16000, 1).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert!(wav.len() > 44);
    }

    #[test]
    fn clip_reports_duration() {
        let samples = vec![0.0f32; 16000];
        let clip = AudioClip::from_samples(&samples, 16000).unwrap();
        assert_eq!(clip.sample_rate, 16000);
        assert!((clip.duration_secs - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn samples_clamp_to_pcm_range() {
        let samples = vec![2.0f32, -2.0];
        let wav = encode_to_wav(&samples, 16000, 1).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![i16::MAX, -i16::MAX]);
    }
}
