//! Track generation driver

use anyhow::{bail, Context, Result};
use arcade_synth::{compose, compose_with_rng, stage_wav, Quantization, TrackId};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// What to generate and where
#[derive(Debug, Clone)]
pub struct Job {
    pub tracks: Vec<TrackId>,
    /// Every track is written into each of these directories
    pub outputs: Vec<PathBuf>,
    /// Base seed for the noise layers; thread RNG when `None`
    pub seed: Option<u64>,
    pub quantization: Quantization,
}

/// Seed for one track: the base seed offset by the track's catalogue index
pub fn track_seed(seed: u64, id: TrackId) -> u64 {
    seed.wrapping_add(id.index() as u64)
}

/// Generate every track in `job`
///
/// Tracks are composed in parallel. A failing track is reported and the
/// rest still get written; the run fails if any track did.
pub fn run(job: &Job) -> Result<()> {
    for dir in &job.outputs {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let results: Vec<(TrackId, Result<()>)> = job
        .tracks
        .par_iter()
        .map(|&id| (id, generate_track(job, id)))
        .collect();

    let mut failed = 0;
    for (id, result) in &results {
        if let Err(e) = result {
            tracing::error!("{id}: {e:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} of {} tracks failed", results.len());
    }

    tracing::info!(
        "Generated {} tracks into {} directories",
        results.len(),
        job.outputs.len()
    );
    Ok(())
}

fn generate_track(job: &Job, id: TrackId) -> Result<()> {
    let buffer = match job.seed {
        Some(seed) => compose_with_rng(id, &mut Pcg64::seed_from_u64(track_seed(seed, id))),
        None => compose(id),
    }
    .with_context(|| format!("Failed to compose {id}"))?;

    // Stage every copy first so a failing directory leaves the others alone
    let staged = job
        .outputs
        .iter()
        .map(|dir| stage_wav(&buffer, &dir.join(id.file_name()), job.quantization))
        .collect::<arcade_synth::Result<Vec<_>>>()
        .with_context(|| format!("Failed to write {id}"))?;

    let mut written = Vec::with_capacity(staged.len());
    for wav in staged {
        let path = wav.path().to_path_buf();
        if let Err(e) = wav.commit() {
            remove_partial(&written);
            return Err(e).with_context(|| format!("Failed to write {id}"));
        }
        tracing::info!(
            "  -> {} ({:.2}s, {} ch)",
            path.display(),
            buffer.duration(),
            buffer.channel_count()
        );
        written.push(path);
    }
    Ok(())
}

/// Remove copies of a track that was not written everywhere
fn remove_partial(written: &[PathBuf]) {
    for path in written {
        match fs::remove_file(path) {
            Ok(()) => tracing::warn!("Removed partial output {}", path.display()),
            Err(e) => tracing::warn!("Failed to remove partial output {}: {e}", path.display()),
        }
    }
}
