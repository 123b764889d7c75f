//! Composes every catalogued track and checks the finished buffers

use arcade_synth::tracks::{Arrangement, Layout};
use arcade_synth::{compose, compose_with_rng, write_wav, Quantization, TrackId, TRACKS};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tempfile::tempdir;

fn expected_frames(id: TrackId) -> usize {
    let track = id.descriptor();
    (track.sample_rate as f64 * track.duration).round() as usize
}

#[test]
fn test_every_track_fits_its_descriptor() {
    for track in &TRACKS {
        let buffer = compose_with_rng(track.id, &mut Pcg64::seed_from_u64(9)).unwrap();

        assert_eq!(buffer.sample_rate(), 44100, "{}", track.name);
        assert_eq!(buffer.frames(), expected_frames(track.id), "{}", track.name);
        let channels = match track.layout {
            Layout::Mono => 1,
            Layout::Stereo => 2,
        };
        assert_eq!(buffer.channel_count(), channels, "{}", track.name);
        assert!(buffer.peak() <= 1.0, "{} clips", track.name);
        assert!(buffer.peak() > 0.0, "{} is silent", track.name);

        if let Arrangement::Music { peak, fade_out, .. } = track.arrangement {
            assert!(buffer.peak() <= peak, "{} above its target", track.name);
            if fade_out.is_none() {
                assert!(buffer.peak() > peak * 0.99, "{} below its target", track.name);
            }
        }
    }
}

#[test]
fn test_expected_lengths() {
    assert_eq!(expected_frames(TrackId::ActionMusic), 2_822_400);
    assert_eq!(expected_frames(TrackId::LevelMusic), 1_102_500);
    assert_eq!(expected_frames(TrackId::BossMusic), 1_323_000);
    assert_eq!(expected_frames(TrackId::Victory), 352_800);
    assert_eq!(expected_frames(TrackId::Shooting), 4410);
    assert_eq!(expected_frames(TrackId::Damage), 8820);
    assert_eq!(expected_frames(TrackId::EnemyBullet), 6615);
    assert_eq!(expected_frames(TrackId::GameOver), 66150);
}

#[test]
fn test_noise_free_tracks_are_identical() {
    for id in [
        TrackId::LevelMusic,
        TrackId::BossMusic,
        TrackId::Victory,
        TrackId::Shooting,
        TrackId::EnemyBullet,
        TrackId::GameOver,
    ] {
        assert_eq!(compose(id).unwrap(), compose(id).unwrap(), "{id}");
    }
}

#[test]
fn test_noisy_tracks_follow_the_seed() {
    for id in [TrackId::ActionMusic, TrackId::Damage] {
        let a = compose_with_rng(id, &mut Pcg64::seed_from_u64(1)).unwrap();
        let b = compose_with_rng(id, &mut Pcg64::seed_from_u64(1)).unwrap();
        let c = compose_with_rng(id, &mut Pcg64::seed_from_u64(2)).unwrap();
        assert_eq!(a, b, "{id}");
        assert_ne!(a, c, "{id}");
    }
}

#[test]
fn test_music_channels_are_identical() {
    let buffer = compose(TrackId::BossMusic).unwrap();
    assert_eq!(buffer.channel(0), buffer.channel(1));
}

#[test]
fn test_written_effect_reads_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(TrackId::GameOver.file_name());
    let buffer = compose(TrackId::GameOver).unwrap();
    write_wav(&buffer, &path, Quantization::Truncate).unwrap();

    let mut reader = hound::WavReader::open(&path).expect("Failed to open WAV");
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.duration() as usize, expected_frames(TrackId::GameOver));
    // Peak 0.3 never reaches past 0.3 * 32767
    assert!(reader
        .samples::<i16>()
        .all(|s| s.unwrap().unsigned_abs() <= 9831));
}
