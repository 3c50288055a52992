//! Sound cue routing
//!
//! The simulation never plays sounds. A host injects an [`AudioSink`] and feeds
//! game events through an [`AudioRouter`], which decides which cues to play.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb matched (rising major chord)
    Match,
    /// Orb missed
    Miss,
    /// Consecutive match; pitch rises with the combo
    Combo(u32),
    /// Ascending arpeggio
    LevelUp,
    /// Long descending sweep
    GameOver,
}

/// Oscillator shape for a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

/// Synthesis parameters for a cue, for sinks that generate tones
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Note frequencies (Hz) played in sequence
    pub notes: Vec<f32>,
    /// Seconds between note starts
    pub step: f32,
    pub gain: f32,
    /// Total length (s)
    pub duration: f32,
}

impl SoundEffect {
    pub fn tone(&self) -> Tone {
        match *self {
            SoundEffect::Match => Tone {
                waveform: Waveform::Sine,
                notes: vec![523.25, 659.25, 783.99],
                step: 0.1,
                gain: 0.1,
                duration: 0.3,
            },
            SoundEffect::Miss => Tone {
                waveform: Waveform::Sawtooth,
                notes: vec![200.0, 100.0],
                step: 0.2,
                gain: 0.05,
                duration: 0.2,
            },
            SoundEffect::Combo(combo) => {
                let base = 523.25 + combo as f32 * 50.0;
                Tone {
                    waveform: Waveform::Triangle,
                    notes: vec![base, base * 1.5],
                    step: 0.1,
                    gain: 0.08,
                    duration: 0.15,
                }
            }
            SoundEffect::LevelUp => Tone {
                waveform: Waveform::Triangle,
                notes: vec![261.63, 329.63, 392.0, 523.25],
                step: 0.1,
                gain: 0.06,
                duration: 0.6,
            },
            SoundEffect::GameOver => Tone {
                waveform: Waveform::Square,
                notes: vec![400.0, 100.0],
                step: 1.0,
                gain: 0.04,
                duration: 1.0,
            },
        }
    }
}

/// Something that can play the game's sound cues
pub trait AudioSink {
    fn play_match(&mut self);
    fn play_miss(&mut self);
    fn play_combo(&mut self, combo: u32);
    fn play_level_up(&mut self);
    fn play_game_over(&mut self);
}

/// Maps game events onto sink calls, with a mute switch
#[derive(Debug, Clone)]
pub struct AudioRouter {
    enabled: bool,
}

impl Default for AudioRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioRouter {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip mute, returning the new enabled state
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Play whatever cues `event` calls for
    pub fn route(&self, event: &GameEvent, sink: &mut dyn AudioSink) {
        if !self.enabled {
            return;
        }
        match event {
            GameEvent::OrbMatched { combo, .. } => {
                sink.play_match();
                if *combo >= 2 {
                    sink.play_combo(*combo);
                }
            }
            GameEvent::OrbMissed { .. } => sink.play_miss(),
            GameEvent::LevelUp { .. } => sink.play_level_up(),
            GameEvent::GameOver { .. } => sink.play_game_over(),
            GameEvent::PowerUpCollected { .. } | GameEvent::AchievementUnlocked { .. } => {}
        }
    }
}

/// Collects cues in order; handy for hosts that batch audio per frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingSink {
    fn play_match(&mut self) {
        self.played.push(SoundEffect::Match);
    }

    fn play_miss(&mut self) {
        self.played.push(SoundEffect::Miss);
    }

    fn play_combo(&mut self, combo: u32) {
        self.played.push(SoundEffect::Combo(combo));
    }

    fn play_level_up(&mut self) {
        self.played.push(SoundEffect::LevelUp);
    }

    fn play_game_over(&mut self) {
        self.played.push(SoundEffect::GameOver);
    }
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    fn log(effect: SoundEffect) {
        let tone = effect.tone();
        log::debug!(
            "sfx {:?}: {:?} {:?} Hz for {:.2}s",
            effect,
            tone.waveform,
            tone.notes,
            tone.duration
        );
    }
}

impl AudioSink for LogSink {
    fn play_match(&mut self) {
        Self::log(SoundEffect::Match);
    }

    fn play_miss(&mut self) {
        Self::log(SoundEffect::Miss);
    }

    fn play_combo(&mut self, combo: u32) {
        Self::log(SoundEffect::Combo(combo));
    }

    fn play_level_up(&mut self) {
        Self::log(SoundEffect::LevelUp);
    }

    fn play_game_over(&mut self) {
        Self::log(SoundEffect::GameOver);
    }
}
