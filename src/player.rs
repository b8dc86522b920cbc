use crate::util::format_time;
use std::error::Error;

pub const SKIP_SECONDS: f64 = 10.0;

// minimal surface of the native media element; the real backend decodes
// and buffers on its own, we only steer it
pub trait PlaybackHandle {
    fn play(&mut self) -> Result<(), Box<dyn Error>>;
    fn pause(&mut self);
    fn set_position(&mut self, seconds: f64);
    fn position(&self) -> f64;
    // None until metadata has loaded
    fn duration(&self) -> Option<f64>;
}

// owns exactly one handle, 1:1 with the episode on screen; dropping the
// transport drops the handle, so switching episodes cannot leak a
// subscription to the previous one
pub struct Transport<H: PlaybackHandle> {
    handle: H,
    is_playing: bool,
    current_time: f64,
    duration: Option<f64>,
}

impl<H: PlaybackHandle> Transport<H> {
    pub fn new(handle: H) -> Self {
        Transport {
            handle,
            is_playing: false,
            current_time: 0.0,
            duration: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.handle.pause();
            self.is_playing = false;
        } else {
            match self.handle.play() {
                Ok(()) => self.is_playing = true,
                Err(e) => {
                    // gesture policies can reject play; stay paused
                    log::warn!("play rejected: {}", e);
                    self.is_playing = false;
                }
            }
        }
    }

    pub fn skip(&mut self, delta_seconds: f64) {
        let target = self.handle.position() + delta_seconds;
        self.jump(target, delta_seconds > 0.0);
    }

    pub fn seek(&mut self, target_seconds: f64) {
        let forward = target_seconds > self.handle.position();
        self.jump(target_seconds, forward);
    }

    // forward motion needs a known duration to clamp against; a rewind
    // always clamps at zero
    fn jump(&mut self, target: f64, forward: bool) {
        let clamped = match self.handle.duration() {
            Some(duration) => target.max(0.0).min(duration),
            None if forward => return,
            None => target.max(0.0),
        };
        self.handle.set_position(clamped);
        self.current_time = clamped;
    }

    // mirrors of the handle's timeupdate / loadedmetadata signals
    pub fn on_time_update(&mut self) {
        self.current_time = self.handle.position();
    }

    pub fn on_metadata_loaded(&mut self) {
        self.duration = self.handle.duration();
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.current_time)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration.unwrap_or(0.0))
    }
}
