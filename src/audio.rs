use sinbound_core::FrequencyGraph;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Media element -> analyser -> destination.
pub struct MediaGraph {
    // Held so the source node lives as long as the graph.
    _source: web::MediaElementAudioSourceNode,
    analyser: web::AnalyserNode,
    bins: usize,
}

impl FrequencyGraph for MediaGraph {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_frequencies(&self, out: &mut [u8]) {
        let n = out.len().min(self.bins);
        self.analyser.get_byte_frequency_data(&mut out[..n]);
    }
}

fn create_analyser(audio_ctx: &web::AudioContext, fft_size: u32) -> Result<web::AnalyserNode, JsValue> {
    let analyser = audio_ctx.create_analyser().map_err(|e| {
        log::error!("AnalyserNode error: {:?}", e);
        e
    })?;
    analyser.set_fft_size(fft_size);
    Ok(analyser)
}

/// Route `element` through a fresh analyser to the speakers.
///
/// The platform allows one source node per element, so callers build this at
/// most once per element (see `AnalyzerAdapter`).
pub fn build_media_graph(
    audio_ctx: &web::AudioContext,
    element: &web::HtmlMediaElement,
    fft_size: u32,
) -> Result<MediaGraph, JsValue> {
    let source = audio_ctx.create_media_element_source(element).map_err(|e| {
        log::error!("MediaElementAudioSourceNode error: {:?}", e);
        e
    })?;
    let analyser = create_analyser(audio_ctx, fft_size)?;
    source.connect_with_audio_node(&analyser)?;
    analyser.connect_with_audio_node(&audio_ctx.destination())?;
    let bins = analyser.frequency_bin_count() as usize;
    Ok(MediaGraph {
        _source: source,
        analyser,
        bins,
    })
}
