//! Sound cues and the synthesizer that voices them.

use fundsp::prelude::*;
use rand::Rng;
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};
use tracing::{debug, warn};

use crate::error::Error;

/// One semantic sound event raised by the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Tick,
    Land { heads: bool },
    Win,
    Lose,
    Select,
    Ambient,
}

impl Cue {
    pub fn play(self, unit: &mut dyn SoundUnit) {
        match self {
            Cue::Tick => unit.tick(),
            Cue::Land { heads } => unit.land(heads),
            Cue::Win => unit.win(),
            Cue::Lose => unit.lose(),
            Cue::Select => unit.select(),
            Cue::Ambient => unit.ambient_transition(),
        }
    }
}

/// Fire-and-forget audio collaborator. Nothing here may block the caller.
pub trait SoundUnit {
    fn tick(&mut self);
    fn land(&mut self, is_heads: bool);
    fn win(&mut self);
    fn lose(&mut self);
    fn select(&mut self);
    fn ambient_transition(&mut self);
}

/// Used with `--mute` or when no audio device is available.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundUnit for Silent {
    fn tick(&mut self) {}
    fn land(&mut self, _is_heads: bool) {}
    fn win(&mut self) {}
    fn lose(&mut self) {}
    fn select(&mut self) {}
    fn ambient_transition(&mut self) {}
}

// ── Recipes ─────────────────────────────────────────────────────────────────

pub const SAMPLE_RATE: u32 = 44_100;

/// Level every envelope decays toward.
const FLOOR: f32 = 0.001;

/// Pitches the flip tick picks from at random.
pub const TICK_PITCHES: [f32; 3] = [3000.0, 3300.0, 2750.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Triangle,
}

/// A single enveloped oscillator note.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq: f32,
    pub wave: Waveform,
    pub duration: f32,
    pub delay: f32,
    pub volume: f32,
}

const fn tone(freq: f32, wave: Waveform, duration: f32, delay: f32, volume: f32) -> Tone {
    Tone {
        freq,
        wave,
        duration,
        delay,
        volume,
    }
}

pub fn tick_recipe(pitch: f32) -> Vec<Tone> {
    vec![tone(pitch, Waveform::Triangle, 0.04, 0.0, 0.3)]
}

pub fn land_recipe(is_heads: bool) -> Vec<Tone> {
    let base = if is_heads { 1200.0 } else { 900.0 };
    vec![
        tone(base, Waveform::Sine, 0.5, 0.0, 0.2),
        tone(base * 1.5, Waveform::Sine, 0.5, 0.05, 0.1),
    ]
}

pub fn win_recipe() -> Vec<Tone> {
    vec![
        tone(440.00, Waveform::Saw, 0.15, 0.00, 0.15),
        tone(554.37, Waveform::Saw, 0.15, 0.08, 0.15),
        tone(659.25, Waveform::Saw, 0.40, 0.16, 0.15),
        tone(220.00, Waveform::Triangle, 0.40, 0.00, 0.2),
    ]
}

pub fn lose_recipe() -> Vec<Tone> {
    vec![
        tone(65.41, Waveform::Triangle, 1.5, 0.0, 0.4),
        tone(77.78, Waveform::Triangle, 1.2, 0.0, 0.25),
    ]
}

pub fn select_recipe() -> Vec<Tone> {
    vec![
        tone(600.0, Waveform::Square, 0.1, 0.0, 0.05),
        tone(800.0, Waveform::Square, 0.1, 0.05, 0.05),
    ]
}

pub fn blip_recipe() -> Vec<Tone> {
    vec![tone(400.0, Waveform::Square, 0.05, 0.0, 0.05)]
}

impl Tone {
    /// Gain at `t` seconds into the cue: silent until `delay`, then an
    /// exponential decay from `volume` toward FLOOR, silent again once the note ends.
    fn gain_at(self, t: f64) -> f64 {
        let duration = self.duration as f64;
        let volume = self.volume as f64;
        let local = t - self.delay as f64;
        if local < 0.0 || local >= duration {
            return 0.0;
        }
        volume * (FLOOR as f64 / volume).powf(local / duration)
    }

    /// The note as a fundsp graph: oscillator * envelope.
    fn voice(self) -> Net {
        let env = lfo(move |t: f64| self.gain_at(t));
        let unit: Box<dyn AudioUnit> = match self.wave {
            Waveform::Sine => Box::new(sine_hz::<f32>(self.freq) * env),
            Waveform::Square => Box::new(square_hz(self.freq) * env),
            Waveform::Saw => Box::new(saw_hz(self.freq) * env),
            Waveform::Triangle => Box::new(triangle_hz(self.freq) * env),
        };
        Net::wrap(unit)
    }
}

/// Seconds until the last note of a cue has finished.
pub fn cue_length(tones: &[Tone]) -> f32 {
    tones
        .iter()
        .map(|t| t.delay + t.duration)
        .fold(0.0f32, f32::max)
}

/// Mixes the tones into one mono buffer at `SAMPLE_RATE`.
pub fn render(tones: &[Tone]) -> Vec<f32> {
    let Some(mut mix) = tones.iter().map(|t| t.voice()).reduce(|a, b| a + b) else {
        return Vec::new();
    };
    mix.set_sample_rate(SAMPLE_RATE as f64);
    let n = (cue_length(tones) * SAMPLE_RATE as f32).ceil() as usize;
    (0..n).map(|_| mix.get_mono()).collect()
}

// ── Synth ───────────────────────────────────────────────────────────────────

pub struct Synth {
    // Dropping the stream silences everything, so it lives as long as the synth.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Synth {
    pub fn open() -> Result<Self, Error> {
        let (stream, handle) = OutputStream::try_default()?;
        debug!("audio output opened");
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    fn voice(&self, name: &str, tones: &[Tone]) {
        let samples = render(tones);
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach(); // Play in background
            }
            Err(e) => warn!(cue = name, error = %e, "could not play cue"),
        }
    }
}

impl SoundUnit for Synth {
    /// The pitch comes from the thread rng, not the table's seeded stream: it is
    /// cosmetic and must not shift the outcomes a `--seed` run replays.
    fn tick(&mut self) {
        let pitch = TICK_PITCHES[rand::thread_rng().gen_range(0..TICK_PITCHES.len())];
        self.voice("tick", &tick_recipe(pitch));
    }

    fn land(&mut self, is_heads: bool) {
        self.voice("land", &land_recipe(is_heads));
    }

    fn win(&mut self) {
        self.voice("win", &win_recipe());
    }

    fn lose(&mut self) {
        self.voice("lose", &lose_recipe());
    }

    fn select(&mut self) {
        self.voice("select", &select_recipe());
    }

    fn ambient_transition(&mut self) {
        self.voice("ambient", &blip_recipe());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Journal(Vec<&'static str>);

    impl SoundUnit for Journal {
        fn tick(&mut self) {
            self.0.push("tick");
        }
        fn land(&mut self, is_heads: bool) {
            self.0.push(if is_heads { "land-heads" } else { "land-tails" });
        }
        fn win(&mut self) {
            self.0.push("win");
        }
        fn lose(&mut self) {
            self.0.push("lose");
        }
        fn select(&mut self) {
            self.0.push("select");
        }
        fn ambient_transition(&mut self) {
            self.0.push("ambient");
        }
    }

    #[test]
    fn cues_reach_matching_methods() {
        let mut j = Journal::default();
        for cue in [
            Cue::Tick,
            Cue::Land { heads: true },
            Cue::Land { heads: false },
            Cue::Win,
            Cue::Lose,
            Cue::Select,
            Cue::Ambient,
        ] {
            cue.play(&mut j);
        }
        assert_eq!(
            j.0,
            ["tick", "land-heads", "land-tails", "win", "lose", "select", "ambient"]
        );
    }

    #[test]
    fn heads_lands_higher() {
        assert!(land_recipe(true)[0].freq > land_recipe(false)[0].freq);
        assert_eq!(land_recipe(true)[1].freq, 1800.0);
    }

    #[test]
    fn delayed_note_is_silent_until_its_start() {
        let late = tone(800.0, Waveform::Square, 0.1, 0.05, 0.05);
        assert_eq!(late.gain_at(0.0), 0.0);
        assert_eq!(late.gain_at(0.049), 0.0);
        assert!(late.gain_at(0.0501) > 0.045);
        assert!(late.gain_at(0.14) < late.gain_at(0.06));
        assert_eq!(late.gain_at(0.151), 0.0);

        let buf = render(&[late]);
        let onset = (0.05 * SAMPLE_RATE as f32) as usize;
        assert!(buf[..onset - 200].iter().all(|s| s.abs() < 1e-6));
        assert!(buf[onset..].iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn tones_are_mixed_not_replaced() {
        let a = tone(600.0, Waveform::Square, 0.1, 0.0, 0.05);
        let b = tone(600.0, Waveform::Square, 0.1, 0.0, 0.05);
        let one = render(&[a]);
        let two = render(&[a, b]);
        let peak = |v: &[f32]| v.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak(&two) > peak(&one) * 1.5);
        assert!(render(&[]).is_empty());
        assert!(render(&land_recipe(true)).iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn tick_pitches_stay_in_the_clicking_band() {
        for pitch in TICK_PITCHES {
            let recipe = tick_recipe(pitch);
            assert_eq!(recipe.len(), 1);
            assert!((2700.0..=3300.0).contains(&recipe[0].freq));
        }
    }

    #[test]
    fn render_length_covers_delayed_notes() {
        let buf = render(&win_recipe());
        // 0.16 s delay + 0.40 s note
        assert!((buf.len() as i64 - 24_696).abs() <= 1, "len {}", buf.len());
        assert!(buf.iter().any(|s| s.abs() > 0.01));
        assert!(buf.iter().all(|s| s.is_finite()));
    }
}
