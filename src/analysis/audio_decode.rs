use std::fs::File;
use std::path::Path;

use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, errors::Error, formats::FormatOptions,
    io::MediaSourceStream, meta::MetadataOptions, probe::Hint,
};

use crate::error::FeatureError;

/// Raw decoded audio in interleaved `f32` samples.
#[derive(Debug)]
pub(crate) struct DecodedAudio {
    pub(crate) samples: Vec<f32>,
    pub(crate) sample_rate: u32,
    pub(crate) channels: u16,
}

/// Decode up to `max_seconds` of audio into interleaved `f32` samples.
///
/// The file handle and decoder are scoped to this call and released on every
/// exit path, including failures.
pub(crate) fn decode_audio(path: &Path, max_seconds: f32) -> Result<DecodedAudio, FeatureError> {
    let file =
        File::open(path).map_err(|err| FeatureError::decode(path, format!("open: {err}")))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|err| FeatureError::decode(path, format!("probe: {err}")))?;
    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| FeatureError::decode(path, "no default audio track"))?;
    let codec_params = &track.codec_params;
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| FeatureError::decode(path, "missing sample rate"))?;
    let channels = codec_params
        .channels
        .ok_or_else(|| FeatureError::decode(path, "missing channel count"))?
        .count() as u16;
    let max_samples = {
        let frames = (max_seconds.max(0.0) * sample_rate as f32).ceil().max(1.0);
        (frames as usize).saturating_mul(channels.max(1) as usize)
    };

    let mut decoder = symphonia::default::get_codecs()
        .make(codec_params, &DecoderOptions::default())
        .map_err(|err| FeatureError::decode(path, format!("codec: {err}")))?;

    let mut samples = Vec::new();
    loop {
        if samples.len() >= max_samples {
            break;
        }
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(_)) => break,
            Err(err) => {
                return Err(FeatureError::decode(path, format!("packet read: {err}")));
            }
        };
        let audio_buf = match decoder.decode(&packet) {
            Ok(audio_buf) => audio_buf,
            // Recoverable corruption within a packet; symphonia resyncs on
            // the next one.
            Err(Error::DecodeError(err)) => {
                tracing::warn!(path = %path.display(), %err, "skipping undecodable packet");
                continue;
            }
            Err(err) => {
                return Err(FeatureError::decode(path, format!("decode: {err}")));
            }
        };
        let spec = *audio_buf.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(audio_buf.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(audio_buf);
        samples.extend_from_slice(sample_buf.samples());
        if samples.len() >= max_samples {
            samples.truncate(max_samples);
            break;
        }
    }

    if samples.is_empty() {
        return Err(FeatureError::decode(path, "decoded 0 samples"));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate: sample_rate.max(1),
        channels: channels.max(1),
    })
}
