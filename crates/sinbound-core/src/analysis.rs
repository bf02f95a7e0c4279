//! Frequency analysis: the per-frame magnitude sample, the levels derived from
//! it, and the adapter that binds one decoding graph per audio element.

use std::hash::Hash;
use std::ops::Deref;

use fnv::FnvHashMap;
use thiserror::Error;

use crate::constants::{BASS_BINS, BYTE_MAX, DRIVE_DIVISOR, TEMPO_BINS};

/// Fixed-length byte magnitudes, refreshed in place once per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencySample {
    bins: Box<[u8]>,
}

impl FrequencySample {
    pub fn silent(len: usize) -> Self {
        Self {
            bins: vec![0; len].into_boxed_slice(),
        }
    }

    /// Copy `values` into a sample of `len` bins, zero-padding or truncating.
    pub fn from_slice(len: usize, values: &[u8]) -> Self {
        let mut s = Self::silent(len);
        let n = len.min(values.len());
        s.bins[..n].copy_from_slice(&values[..n]);
        s
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub(crate) fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

    pub fn clear(&mut self) {
        self.bins.fill(0);
    }

    /// Magnitude at `index`, zero outside the sample.
    #[inline]
    pub fn magnitude(&self, index: usize) -> u8 {
        self.bins.get(index).copied().unwrap_or(0)
    }

    /// Magnitude at the bin proportional to `i / count` over the first `span` bins.
    #[inline]
    pub fn proportional(&self, i: usize, count: usize, span: usize) -> u8 {
        if count == 0 {
            return 0;
        }
        let idx = (i as f32 / count as f32 * span as f32).floor() as usize;
        self.magnitude(idx)
    }

    pub fn levels(&self) -> Levels {
        Levels::from_sample(self)
    }
}

impl Deref for FrequencySample {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bins
    }
}

/// Mean of `bins[range]` divided by the nominal width of the range.
///
/// Bins missing from a short sample count as silence, so every level stays in [0, 1].
fn band_mean(bins: &[u8], range: std::ops::Range<usize>) -> f32 {
    let width = range.end.saturating_sub(range.start);
    if width == 0 {
        return 0.0;
    }
    let end = range.end.min(bins.len());
    let start = range.start.min(end);
    let sum: u32 = bins[start..end].iter().map(|&b| b as u32).sum();
    sum as f32 / width as f32
}

fn overall_mean(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

/// Levels derived from a [`FrequencySample`], each in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Levels {
    /// Mean of the lowest 8 bins / 255.
    pub bass: f32,
    /// Mean of bins 32..128 / 255.
    pub tempo: f32,
    /// Mean of all bins / 255.
    pub overall: f32,
    /// Mean of all bins / 128, saturating at 1. Drives the home visuals.
    pub drive: f32,
}

impl Levels {
    pub fn from_sample(sample: &FrequencySample) -> Self {
        Self::from_bins(sample.bins())
    }

    pub fn from_bins(bins: &[u8]) -> Self {
        let mean = overall_mean(bins);
        Self {
            bass: bass_level(bins),
            tempo: tempo_level(bins),
            overall: mean / BYTE_MAX,
            drive: (mean / DRIVE_DIVISOR).min(1.0),
        }
    }

    #[inline]
    pub fn get(&self, kind: LevelKind) -> f32 {
        match kind {
            LevelKind::Bass => self.bass,
            LevelKind::Tempo => self.tempo,
            LevelKind::Overall => self.overall,
            LevelKind::Drive => self.drive,
        }
    }
}

/// Selects which derived level drives a generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelKind {
    Bass,
    Tempo,
    #[default]
    Overall,
    Drive,
}

pub fn bass_level(bins: &[u8]) -> f32 {
    band_mean(bins, BASS_BINS) / BYTE_MAX
}

pub fn tempo_level(bins: &[u8]) -> f32 {
    band_mean(bins, TEMPO_BINS) / BYTE_MAX
}

/// A platform decoding graph able to report byte frequency magnitudes.
pub trait FrequencyGraph {
    fn bin_count(&self) -> usize;
    /// Fill `out` with the latest magnitudes; must not block.
    fn read_frequencies(&self, out: &mut [u8]);
}

#[derive(Debug, Error)]
pub enum AnalyzerError<E: std::fmt::Debug> {
    #[error("failed to build decoding graph: {0:?}")]
    Graph(E),
}

/// Token returned by [`AnalyzerAdapter::attach`]; pass it back to `detach`.
#[derive(Debug, PartialEq, Eq)]
pub struct AnalyzerHandle<K> {
    key: K,
    generation: u64,
}

impl<K> AnalyzerHandle<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Registry key for the element with DOM id `id`. Ids are unique within a
/// document, so a key names exactly one element; an element without an id
/// has no key and cannot be attached.
pub fn element_key(id: &str) -> Option<String> {
    let id = id.trim();
    (!id.is_empty()).then(|| id.to_string())
}

/// Binds audio elements (by key) to decoding graphs and samples the active one.
///
/// A key must identify one element: a second element attached under the same
/// key would sample the first one's graph. The web layer keys on
/// [`element_key`].
///
/// Graphs are created at most once per key and live in the registry for the
/// rest of the page session: rebuilding a media-element source for the same
/// element fails on the platform side, and tearing one down during a remount
/// has broken playback before. `detach` therefore only deactivates.
pub struct AnalyzerAdapter<K, G> {
    registry: FnvHashMap<K, G>,
    active: Option<K>,
    generation: u64,
    sample: FrequencySample,
    scratch: Vec<u8>,
}

impl<K, G> AnalyzerAdapter<K, G>
where
    K: Hash + Eq + Clone,
    G: FrequencyGraph,
{
    /// `bin_count` fixes the sample length for the adapter's lifetime.
    pub fn new(bin_count: usize) -> Self {
        Self {
            registry: FnvHashMap::default(),
            active: None,
            generation: 0,
            sample: FrequencySample::silent(bin_count),
            scratch: Vec::new(),
        }
    }

    /// Attach to `key`, building its graph only on first use.
    pub fn attach<E, F>(&mut self, key: K, build: F) -> Result<AnalyzerHandle<K>, AnalyzerError<E>>
    where
        E: std::fmt::Debug,
        F: FnOnce() -> Result<G, E>,
    {
        if self.registry.contains_key(&key) {
            log::debug!("[analyser] reusing existing graph");
        } else {
            let graph = build().map_err(AnalyzerError::Graph)?;
            log::debug!("[analyser] graph built with {} bins", graph.bin_count());
            self.registry.insert(key.clone(), graph);
        }
        self.generation += 1;
        self.active = Some(key.clone());
        Ok(AnalyzerHandle {
            key,
            generation: self.generation,
        })
    }

    /// Deactivate the handle's element. A stale handle (superseded by a later
    /// attach) is ignored. The graph itself stays registered.
    pub fn detach(&mut self, handle: AnalyzerHandle<K>) {
        if handle.generation == self.generation && self.active.as_ref() == Some(&handle.key) {
            self.active = None;
            self.sample.clear();
        }
    }

    /// Refresh from the active graph and return the latest sample.
    ///
    /// With nothing attached the sample is all zeros.
    pub fn sample(&mut self) -> &FrequencySample {
        let graph = self.active.as_ref().and_then(|k| self.registry.get(k));
        match graph {
            Some(g) => {
                let n = g.bin_count();
                self.scratch.resize(n, 0);
                g.read_frequencies(&mut self.scratch);
                let len = self.sample.len();
                let take = len.min(n);
                let bins = self.sample.bins_mut();
                bins[..take].copy_from_slice(&self.scratch[..take]);
                bins[take..].fill(0);
            }
            None => self.sample.clear(),
        }
        &self.sample
    }

    /// The sample as of the last refresh, without touching the graph.
    pub fn last_sample(&self) -> &FrequencySample {
        &self.sample
    }

    pub fn levels(&self) -> Levels {
        self.sample.levels()
    }

    pub fn bin_count(&self) -> usize {
        self.sample.len()
    }

    pub fn is_registered(&self, key: &K) -> bool {
        self.registry.contains_key(key)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn graph_count(&self) -> usize {
        self.registry.len()
    }

    pub fn graph(&self, key: &K) -> Option<&G> {
        self.registry.get(key)
    }
}
