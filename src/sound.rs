//! Fire-and-forget audio cues.

use crate::Error;
use crate::format::format_number;
use crate::host::{AudioFactory, Playable};
use crate::sink::DiagnosticSink;

const LABEL: &str = "play_sound";

/// Clamps a requested volume to `[0, 1]`. NaN is treated as silence.
pub fn clamp_volume(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

/// Creates a playable for `src`, rewinds it and starts playback.
///
/// Returns `None` after a warning when `src` is empty. Otherwise the handle
/// is returned immediately; the outcome of `play()` is only reported to
/// `sink` once the host settles it, and a rejected start never reaches the
/// caller.
pub fn play_sound<F, S>(
    factory: &F,
    sink: &S,
    src: &str,
    looping: bool,
    volume: f64,
) -> Option<F::Handle>
where
    F: AudioFactory + ?Sized,
    S: DiagnosticSink + Clone + 'static,
{
    if src.is_empty() {
        sink.warn(LABEL, Error::MissingSource.to_string());
        return None;
    }

    let audio = factory.create(src);
    audio.set_loop(looping);
    audio.set_volume(clamp_volume(volume));
    audio.rewind();

    let sink = sink.clone();
    let src = src.to_string();
    let volume = audio.volume();
    audio.play(Box::new(move |result| match result {
        Ok(()) => {
            let suffix = if looping { " (looping)" } else { "" };
            sink.info(
                LABEL,
                format!(
                    "Playing \"{src}\"{suffix} (volume={})",
                    format_number(volume)
                ),
            );
        }
        Err(message) => {
            sink.error(LABEL, Error::ResourceUnavailable { src, message }.to_string());
        }
    }));

    Some(audio)
}
