// Recording stand-in for the WebAudio backend. Bindings are track ids.

#![allow(dead_code)]
use mixer_core::AudioBackend;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Gain { track: u8, target: f32, ramp: Duration },
    Play { track: u8, playing: bool },
    Release(u8),
}

#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
}

impl RecordingBackend {
    pub fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    pub fn gains(&self) -> Vec<(u8, f32, Duration)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                Call::Gain { track, target, ramp } => Some((track, target, ramp)),
                _ => None,
            })
            .collect()
    }

    pub fn plays(&self) -> Vec<(u8, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                Call::Play { track, playing } => Some((track, playing)),
                _ => None,
            })
            .collect()
    }

    pub fn released(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                Call::Release(track) => Some(track),
                _ => None,
            })
            .collect()
    }
}

impl AudioBackend for RecordingBackend {
    type Binding = u8;

    fn schedule_gain(&mut self, binding: &u8, target: f32, ramp: Duration) {
        self.calls.push(Call::Gain {
            track: *binding,
            target,
            ramp,
        });
    }

    fn set_playing(&mut self, binding: &u8, playing: bool) {
        self.calls.push(Call::Play {
            track: *binding,
            playing,
        });
    }

    fn release(&mut self, binding: u8) {
        self.calls.push(Call::Release(binding));
    }
}
