pub(crate) mod capture;
mod engine;
mod playback;
pub(crate) mod take;

pub(crate) use capture::AudioCapturer;

pub use {engine::AudioEngine, engine::AudioHandle, playback::Player, take::AudioTake};
