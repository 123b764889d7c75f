//! Track catalogue and composer
//!
//! Every track the game ships is described once in [`TRACKS`]: its output
//! file, length, channel layout and the arrangement that renders it.
//!
//! **TO ADD A NEW TRACK:**
//! 1. Write the arrangement in `music.rs` or `sfx.rs`
//! 2. Add a [`TrackId`] variant and its entry in [`TRACKS`]

mod music;
mod notes;
mod pattern;
mod sfx;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;

use crate::audio::{fade_out, normalize_peak, SampleBuffer, SynthError, TimeAxis, SAMPLE_RATE};
use crate::Result;

pub use notes::{NoteTable, A_MINOR, C_MAJOR, D_MINOR, E_MINOR_BLUES};
pub use pattern::{BeatGrid, Pattern};

/// Renders the raw mix of a music loop given the beat length in seconds
pub type ScoreFn = fn(&TimeAxis, f64, &mut dyn RngCore) -> Result<Vec<f64>>;

/// Renders a sound effect
pub type EffectFn = fn(&TimeAxis, &mut dyn RngCore) -> Result<Vec<f64>>;

/// Named tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackId {
    ActionMusic,
    LevelMusic,
    BossMusic,
    Victory,
    Shooting,
    Damage,
    EnemyBullet,
    GameOver,
}

impl TrackId {
    /// Every track, in catalogue order
    pub const ALL: [TrackId; 8] = [
        TrackId::ActionMusic,
        TrackId::LevelMusic,
        TrackId::BossMusic,
        TrackId::Victory,
        TrackId::Shooting,
        TrackId::Damage,
        TrackId::EnemyBullet,
        TrackId::GameOver,
    ];

    pub fn descriptor(self) -> &'static TrackDescriptor {
        &TRACKS[self.index()]
    }

    /// Position in [`TrackId::ALL`] and [`TRACKS`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kebab-case name used on the command line
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn file_name(self) -> &'static str {
        self.descriptor().file_name
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackId {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        TRACKS
            .iter()
            .find(|t| t.name == s)
            .map(|t| t.id)
            .ok_or_else(|| SynthError::UnknownTrack(s.to_string()))
    }
}

/// Channel layout of a finished track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Mono,
    /// Mono mix duplicated onto two channels
    Stereo,
}

/// How a track is rendered and finished
#[derive(Debug, Clone, Copy)]
pub enum Arrangement {
    /// Tempo-driven loop, normalized to `peak`, optionally faded out
    Music {
        tempo_bpm: f64,
        peak: f64,
        fade_out: Option<f64>,
        score: ScoreFn,
    },
    /// One-shot effect, used as rendered
    Effect { render: EffectFn },
}

/// Track definition with output file and arrangement
#[derive(Debug, Clone, Copy)]
pub struct TrackDescriptor {
    pub id: TrackId,
    pub name: &'static str,
    pub title: &'static str,
    pub file_name: &'static str,
    pub sample_rate: u32,
    /// Length in seconds
    pub duration: f64,
    pub layout: Layout,
    pub arrangement: Arrangement,
}

/// All track definitions - single source of truth, indexed by [`TrackId`]
pub static TRACKS: [TrackDescriptor; 8] = [
    TrackDescriptor {
        id: TrackId::ActionMusic,
        name: "action-music",
        title: "High-octane action loop (E minor, 64s)",
        file_name: "music_game.wav",
        sample_rate: SAMPLE_RATE,
        duration: 64.0,
        layout: Layout::Stereo,
        arrangement: Arrangement::Music {
            tempo_bpm: 150.0,
            peak: 0.85,
            fade_out: None,
            score: music::action,
        },
    },
    TrackDescriptor {
        id: TrackId::LevelMusic,
        name: "level-music",
        title: "Energetic level loop (A minor, 25s)",
        file_name: "music_level.wav",
        sample_rate: SAMPLE_RATE,
        duration: 25.0,
        layout: Layout::Stereo,
        arrangement: Arrangement::Music {
            tempo_bpm: 130.0,
            peak: 0.7,
            fade_out: None,
            score: music::level,
        },
    },
    TrackDescriptor {
        id: TrackId::BossMusic,
        name: "boss-music",
        title: "Intense boss loop (D minor, 30s)",
        file_name: "music_boss.wav",
        sample_rate: SAMPLE_RATE,
        duration: 30.0,
        layout: Layout::Stereo,
        arrangement: Arrangement::Music {
            tempo_bpm: 140.0,
            peak: 0.7,
            fade_out: None,
            score: music::boss,
        },
    },
    TrackDescriptor {
        id: TrackId::Victory,
        name: "victory",
        title: "Triumphant fanfare (C major, 8s)",
        file_name: "music_victory.wav",
        sample_rate: SAMPLE_RATE,
        duration: 8.0,
        layout: Layout::Stereo,
        arrangement: Arrangement::Music {
            tempo_bpm: 120.0,
            peak: 0.8,
            fade_out: Some(1.0),
            score: music::victory,
        },
    },
    TrackDescriptor {
        id: TrackId::Shooting,
        name: "shooting",
        title: "Player laser shot (100ms)",
        file_name: "shooting_improved.wav",
        sample_rate: SAMPLE_RATE,
        duration: 0.1,
        layout: Layout::Mono,
        arrangement: Arrangement::Effect {
            render: sfx::shooting,
        },
    },
    TrackDescriptor {
        id: TrackId::Damage,
        name: "damage",
        title: "Player damage impact (200ms)",
        file_name: "damage.wav",
        sample_rate: SAMPLE_RATE,
        duration: 0.2,
        layout: Layout::Mono,
        arrangement: Arrangement::Effect {
            render: sfx::damage,
        },
    },
    TrackDescriptor {
        id: TrackId::EnemyBullet,
        name: "enemy-bullet",
        title: "Enemy shot (150ms)",
        file_name: "enemy_bullet.wav",
        sample_rate: SAMPLE_RATE,
        duration: 0.15,
        layout: Layout::Mono,
        arrangement: Arrangement::Effect {
            render: sfx::enemy_bullet,
        },
    },
    TrackDescriptor {
        id: TrackId::GameOver,
        name: "game-over",
        title: "Game over sting (1.5s)",
        file_name: "gameover.wav",
        sample_rate: SAMPLE_RATE,
        duration: 1.5,
        layout: Layout::Mono,
        arrangement: Arrangement::Effect {
            render: sfx::game_over,
        },
    },
];

/// Compose a track, drawing noise from the thread RNG
pub fn compose(id: TrackId) -> Result<SampleBuffer> {
    compose_with_rng(id, &mut rand::rng())
}

/// Compose a track, drawing noise from `rng`
///
/// Tracks without noise layers never touch `rng` and are bit-identical
/// across calls.
pub fn compose_with_rng<R: RngCore>(id: TrackId, rng: &mut R) -> Result<SampleBuffer> {
    let track = id.descriptor();
    let axis = TimeAxis::new(track.sample_rate, track.duration)?;

    let samples = match track.arrangement {
        Arrangement::Music {
            tempo_bpm,
            peak,
            fade_out: fade,
            score,
        } => {
            let mut mix = score(&axis, 60.0 / tempo_bpm, rng)?;
            normalize_peak(&mut mix, peak);
            if let Some(fade) = fade {
                fade_out(&mut mix, &axis, fade);
            }
            mix
        }
        Arrangement::Effect { render } => render(&axis, rng)?,
    };

    let buffer = SampleBuffer::mono(track.sample_rate, samples)?;
    let buffer = match track.layout {
        Layout::Mono => buffer,
        Layout::Stereo => buffer.into_stereo(),
    };

    tracing::debug!(
        track = track.name,
        frames = buffer.frames(),
        channels = buffer.channel_count(),
        peak = buffer.peak(),
        "composed"
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn test_catalogue_is_indexed_by_id() {
        for (i, id) in TrackId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(TRACKS[i].id, *id);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for id in TrackId::ALL {
            assert_eq!(id.name().parse::<TrackId>().unwrap(), id);
            assert_eq!(id.to_string(), id.name());
        }
        assert!(matches!(
            "boss".parse::<TrackId>(),
            Err(SynthError::UnknownTrack(name)) if name == "boss"
        ));
    }

    #[test]
    fn test_file_names_are_unique() {
        let mut names: Vec<_> = TRACKS.iter().map(|t| t.file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), TRACKS.len());
    }

    #[test]
    fn test_effects_are_mono_music_is_stereo() {
        for track in &TRACKS {
            match track.arrangement {
                Arrangement::Music { .. } => assert_eq!(track.layout, Layout::Stereo),
                Arrangement::Effect { .. } => assert_eq!(track.layout, Layout::Mono),
            }
        }
    }

    #[test]
    fn test_compose_shooting() {
        let buffer = compose(TrackId::Shooting).unwrap();
        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.frames(), 4410);
        assert_eq!(buffer.sample_rate(), 44100);
    }

    #[test]
    fn test_compose_victory_fades_to_silence() {
        let buffer = compose(TrackId::Victory).unwrap();
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frames(), 8 * 44100);
        assert!(buffer.peak() <= 0.8);
        let left = buffer.channel(0).unwrap();
        assert_eq!(*left.last().unwrap(), 0.0);
        assert_eq!(buffer.channel(0), buffer.channel(1));
    }

    #[test]
    fn test_seeded_damage_is_reproducible() {
        let a = compose_with_rng(TrackId::Damage, &mut Pcg64::seed_from_u64(11)).unwrap();
        let b = compose_with_rng(TrackId::Damage, &mut Pcg64::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }
}
