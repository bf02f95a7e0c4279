// Host-side tests for frequency levels and the analyser registry.

use std::cell::Cell;
use std::rc::Rc;

use sinbound_core::constants::FREQUENCY_BIN_COUNT;
use sinbound_core::{element_key, AnalyzerAdapter, FrequencyGraph, FrequencySample, LevelKind, Levels};

struct FakeGraph {
    value: u8,
    bins: usize,
}

impl FrequencyGraph for FakeGraph {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_frequencies(&self, out: &mut [u8]) {
        out.fill(self.value);
    }
}

fn in_unit(x: f32) -> bool {
    (0.0..=1.0).contains(&x)
}

#[test]
fn levels_stay_in_unit_range_for_any_sample() {
    for fill in [0u8, 1, 17, 64, 127, 128, 200, 254, 255] {
        let sample = FrequencySample::from_slice(FREQUENCY_BIN_COUNT, &[fill; FREQUENCY_BIN_COUNT]);
        let l = sample.levels();
        assert!(in_unit(l.bass) && in_unit(l.tempo) && in_unit(l.overall) && in_unit(l.drive));
    }
    // ramps and spikes
    let ramp: Vec<u8> = (0..FREQUENCY_BIN_COUNT).map(|i| (i * 2).min(255) as u8).collect();
    let l = Levels::from_bins(&ramp);
    assert!(in_unit(l.bass) && in_unit(l.tempo) && in_unit(l.overall));
    let mut spike = vec![0u8; FREQUENCY_BIN_COUNT];
    spike[3] = 255;
    let l = Levels::from_bins(&spike);
    assert!(l.bass > 0.0 && l.tempo == 0.0);
}

#[test]
fn full_scale_sample_saturates_every_level() {
    let l = Levels::from_bins(&[255; FREQUENCY_BIN_COUNT]);
    assert_eq!(l.bass, 1.0);
    assert_eq!(l.tempo, 1.0);
    assert_eq!(l.overall, 1.0);
    assert_eq!(l.drive, 1.0);
    assert_eq!(l.get(LevelKind::Tempo), l.tempo);
}

#[test]
fn silent_and_empty_samples_are_zero() {
    let l = FrequencySample::silent(FREQUENCY_BIN_COUNT).levels();
    assert_eq!(l, Levels::default());
    let l = Levels::from_bins(&[]);
    assert_eq!(l.overall, 0.0);
}

#[test]
fn proportional_bins_spread_over_the_span() {
    let values: Vec<u8> = (0..FREQUENCY_BIN_COUNT as u32).map(|i| i as u8).collect();
    let sample = FrequencySample::from_slice(FREQUENCY_BIN_COUNT, &values);
    assert_eq!(sample.proportional(0, 6, 64), 0);
    assert_eq!(sample.proportional(3, 6, 64), 32);
    assert_eq!(sample.proportional(1, 0, 64), 0);
    assert_eq!(sample.magnitude(10_000), 0);
}

#[test]
fn graph_is_built_once_per_element() {
    let builds = Rc::new(Cell::new(0));
    let mut adapter: AnalyzerAdapter<&str, FakeGraph> = AnalyzerAdapter::new(FREQUENCY_BIN_COUNT);
    for _ in 0..3 {
        let b = builds.clone();
        let handle = adapter
            .attach("player", move || {
                b.set(b.get() + 1);
                Ok::<_, ()>(FakeGraph { value: 90, bins: 128 })
            })
            .expect("attach");
        assert_eq!(adapter.sample().bins()[0], 90);
        adapter.detach(handle);
    }
    assert_eq!(builds.get(), 1);
    assert_eq!(adapter.graph_count(), 1);
    assert!(adapter.is_registered(&"player"));
}

#[test]
fn detached_adapter_samples_silence() {
    let mut adapter: AnalyzerAdapter<&str, FakeGraph> = AnalyzerAdapter::new(FREQUENCY_BIN_COUNT);
    assert!(adapter.sample().iter().all(|&b| b == 0));
    let handle = adapter
        .attach("home", || Ok::<_, ()>(FakeGraph { value: 200, bins: 16 }))
        .expect("attach");
    let sample = adapter.sample();
    // short graphs are zero padded to the adapter length
    assert_eq!(sample.len(), FREQUENCY_BIN_COUNT);
    assert_eq!(sample.bins()[15], 200);
    assert_eq!(sample.bins()[16], 0);
    assert_eq!(adapter.last_sample().bins()[0], 200);
    assert!(adapter.levels().overall > 0.0);
    adapter.detach(handle);
    assert!(!adapter.is_active());
    assert_eq!(adapter.last_sample().bins()[0], 0);
    assert!(adapter.sample().iter().all(|&b| b == 0));
}

#[test]
fn stale_handle_does_not_detach_newer_attachment() {
    let mut adapter: AnalyzerAdapter<&str, FakeGraph> = AnalyzerAdapter::new(8);
    let first = adapter
        .attach("a", || Ok::<_, ()>(FakeGraph { value: 1, bins: 8 }))
        .expect("attach a");
    let _second = adapter
        .attach("b", || Ok::<_, ()>(FakeGraph { value: 2, bins: 8 }))
        .expect("attach b");
    adapter.detach(first);
    assert!(adapter.is_active());
    assert_eq!(adapter.sample().bins()[0], 2);
}

#[test]
fn failed_build_leaves_registry_empty() {
    let mut adapter: AnalyzerAdapter<&str, FakeGraph> = AnalyzerAdapter::new(8);
    let err = adapter.attach("x", || Err::<FakeGraph, _>("boom"));
    assert!(err.is_err());
    assert_eq!(adapter.graph_count(), 0);
    assert!(!adapter.is_active());
}

#[test]
fn elements_are_keyed_by_their_id() {
    assert_eq!(element_key("player-audio").as_deref(), Some("player-audio"));
    assert_eq!(element_key(" home-loop ").as_deref(), Some("home-loop"));
    assert_eq!(element_key(""), None);
    assert_eq!(element_key("   "), None);
}

#[test]
fn distinct_elements_get_distinct_graphs() {
    let mut adapter: AnalyzerAdapter<String, FakeGraph> = AnalyzerAdapter::new(8);
    let keys: Vec<String> = ["radio-loop", "radio-sfx"]
        .iter()
        .filter_map(|id| element_key(id))
        .collect();
    let loop_handle = adapter
        .attach(keys[0].clone(), || Ok::<_, ()>(FakeGraph { value: 10, bins: 8 }))
        .expect("attach loop");
    assert_eq!(adapter.sample().bins()[0], 10);
    adapter.detach(loop_handle);
    let _sfx = adapter
        .attach(keys[1].clone(), || Ok::<_, ()>(FakeGraph { value: 20, bins: 8 }))
        .expect("attach sfx");
    assert_eq!(adapter.graph_count(), 2);
    assert_eq!(adapter.sample().bins()[0], 20);
    assert_eq!(adapter.graph(&keys[0]).map(|g| g.value), Some(10));
}
