use sinbound_core::{element_key, AnalyzerAdapter, AnalyzerHandle, FrequencySample};
use web_sys as web;

use crate::audio::{self, MediaGraph};

/// Audio state owned by one page: the lazily created context and the
/// analyser registry. Passed explicitly to whatever needs it.
pub struct PageSession {
    context: Option<web::AudioContext>,
    analyzer: AnalyzerAdapter<String, MediaGraph>,
    fft_size: u32,
}

impl PageSession {
    pub fn new(fft_size: u32) -> Self {
        Self {
            context: None,
            analyzer: AnalyzerAdapter::new((fft_size / 2) as usize),
            fft_size,
        }
    }

    pub fn context(&mut self) -> anyhow::Result<web::AudioContext> {
        if let Some(ctx) = &self.context {
            return Ok(ctx.clone());
        }
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        log::info!("[audio] context created");
        self.context = Some(ctx.clone());
        Ok(ctx)
    }

    /// Resume a suspended context; a no-op before one exists.
    pub fn resume(&self) {
        if let Some(ctx) = &self.context {
            if ctx.state() == web::AudioContextState::Suspended {
                _ = ctx.resume();
            }
        }
    }

    /// Start sampling `element`, building its graph on first use. Graphs are
    /// keyed by the element's id.
    pub fn attach(&mut self, element: &web::HtmlMediaElement) -> Option<AnalyzerHandle<String>> {
        let Some(key) = element_key(&element.id()) else {
            log::warn!("[audio] media element without an id, not analysed");
            return None;
        };
        let ctx = match self.context() {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("audio context error: {:?}", e);
                return None;
            }
        };
        let fft_size = self.fft_size;
        match self
            .analyzer
            .attach(key, || audio::build_media_graph(&ctx, element, fft_size))
        {
            Ok(handle) => {
                self.resume();
                Some(handle)
            }
            Err(e) => {
                log::error!("analyser attach error: {:?}", e);
                None
            }
        }
    }

    pub fn detach(&mut self, handle: AnalyzerHandle<String>) {
        self.analyzer.detach(handle);
    }

    pub fn sample(&mut self) -> &FrequencySample {
        self.analyzer.sample()
    }
}
