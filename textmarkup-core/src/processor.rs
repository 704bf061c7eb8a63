use crate::config::MarkupConfig;
use crate::error::{ConfigurationError, Result};
use crate::filters::{Filter, FilterChain};
use crate::handlers::{Handler, HtmlRenderer, Recorder};
use crate::preprocessors::{blocks, Blocks};
use crate::rules::{debug_block, DebugConfig, DocumentScope, Rule, RuleSet};
use crate::types::{ParseStages, Region, SubstitutionKind};
use std::io::BufRead;
use std::time::{Duration, Instant};

/// Simple profiler that accumulates timings per pipeline step
///
/// Steps run once per block, so repeated names add up instead of producing
/// one entry per call.
#[derive(Debug, Default)]
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration, usize)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match self.timings.iter_mut().find(|(name, _, _)| name == step_name) {
            Some((_, total, calls)) => {
                *total += elapsed;
                *calls += 1;
            }
            None => self.timings.push((step_name.to_string(), elapsed, 1)),
        }

        result
    }

    /// Accumulated time and call count for `step_name`
    pub fn step(&self, step_name: &str) -> Option<(Duration, usize)> {
        self.timings
            .iter()
            .find(|(name, _, _)| name == step_name)
            .map(|(_, total, calls)| (*total, *calls))
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        log::info!("📊 Performance Summary:");
        let total: Duration = self.timings.iter().map(|(_, d, _)| *d).sum();

        for (step, duration, calls) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            log::info!(
                "   {:.<20} {:>8}µs ({:.1}%, {} calls)",
                step,
                duration.as_micros(),
                percentage,
                calls
            );
        }
        log::info!("   {:.<20} {:>8}µs", "Total", total.as_micros());
    }
}

/// Drives blocks from a text source through the filter chain and the rule
/// set into a bound handler.
///
/// The parser owns its rules and filters and can be reused for several
/// documents; classifier state is reset at the start of every parse.
pub struct Parser<H: Handler> {
    rules: RuleSet,
    filters: FilterChain,
    handler: Option<H>,
    debug_config: DebugConfig,
    profiler: StepProfiler,
}

impl<H: Handler> Parser<H> {
    pub fn new(rules: RuleSet, filters: FilterChain) -> Self {
        Self {
            rules,
            filters,
            handler: None,
            debug_config: DebugConfig::disabled(),
            profiler: StepProfiler::new(false),
        }
    }

    /// Basic text parser: the standard rules and the configured filters.
    pub fn standard(config: &MarkupConfig) -> Result<Self> {
        let filters = FilterChain::from_config(&config.pipeline)?;
        Ok(Self::new(RuleSet::standard(config), filters))
    }

    pub fn with_handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Binds `handler`, returning the previously bound one.
    pub fn set_handler(&mut self, handler: H) -> Option<H> {
        self.handler.replace(handler)
    }

    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    pub fn handler_mut(&mut self) -> Option<&mut H> {
        self.handler.as_mut()
    }

    pub fn into_handler(self) -> Option<H> {
        self.handler
    }

    pub fn add_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.add_rule(rule);
    }

    pub fn remove_rule(&mut self, region: Region) -> bool {
        self.rules.remove_rule(region)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.add_filter(filter);
    }

    pub fn remove_filter(&mut self, kind: SubstitutionKind) -> bool {
        self.filters.remove_filter(kind)
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn set_debug_config(&mut self, debug_config: DebugConfig) {
        self.debug_config = debug_config;
    }

    pub fn enable_profiling(&mut self, enabled: bool) {
        self.profiler = StepProfiler::new(enabled);
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }

    /// Parse a whole document into the bound handler.
    ///
    /// Fails with `ConfigurationError::NoHandler` before emitting anything
    /// when no handler is bound. Once the document has been opened it is
    /// closed on every exit path.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let handler = self
            .handler
            .as_mut()
            .ok_or(ConfigurationError::NoHandler)?;
        run(
            &mut self.rules,
            &self.filters,
            &self.debug_config,
            &mut self.profiler,
            reader,
            handler,
            None,
        )
    }

    pub fn parse_str(&mut self, text: &str) -> Result<()> {
        self.parse(text.as_bytes())
    }

    /// Same pass as `parse`, additionally capturing every intermediate value.
    pub fn parse_capture_stages<R: BufRead>(&mut self, reader: R) -> Result<ParseStages> {
        let handler = self
            .handler
            .as_mut()
            .ok_or(ConfigurationError::NoHandler)?;
        let mut recorder = Recorder::new(handler);
        let mut stages = ParseStages::default();

        run(
            &mut self.rules,
            &self.filters,
            &self.debug_config,
            &mut self.profiler,
            reader,
            &mut recorder,
            Some(&mut stages),
        )?;

        stages.events = recorder.into_events();
        log::info!(
            "📋 Captured {} blocks, {} events",
            stages.block_count(),
            stages.events.len()
        );
        Ok(stages)
    }
}

fn run<R: BufRead>(
    rules: &mut RuleSet,
    filters: &FilterChain,
    debug_config: &DebugConfig,
    profiler: &mut StepProfiler,
    reader: R,
    handler: &mut dyn Handler,
    mut capture: Option<&mut ParseStages>,
) -> Result<()> {
    rules.validate()?;
    rules.reset();
    profiler.reset();

    let mut source = blocks(reader);
    let mut scope = DocumentScope::open(handler)?;

    // Stateful rules are finished on every exit path so open lists are
    // closed before the document is, even when a block fails.
    let classified = classify_blocks(
        rules,
        filters,
        debug_config,
        profiler,
        &mut source,
        &mut scope,
        capture.as_deref_mut(),
    );
    let finished = rules.finish(scope.handler());
    let count = classified?;
    finished?;
    scope.close()?;

    log::debug!("📄 Parsed {count} blocks");
    profiler.log_summary();
    Ok(())
}

fn classify_blocks<R: BufRead>(
    rules: &mut RuleSet,
    filters: &FilterChain,
    debug_config: &DebugConfig,
    profiler: &mut StepProfiler,
    source: &mut Blocks<R>,
    scope: &mut DocumentScope<'_>,
    mut capture: Option<&mut ParseStages>,
) -> Result<usize> {
    let mut index = 0;
    loop {
        let block = match profiler.time_step("split", || source.next()) {
            Some(block) => block?,
            None => break,
        };

        let filtered = profiler.time_step("filter", || filters.apply(&block, scope.handler()));
        let region =
            profiler.time_step("classify", || rules.dispatch(&filtered, scope.handler()))?;
        debug_block(index, &filtered, region, debug_config);

        if let Some(stages) = capture.as_deref_mut() {
            stages.blocks.push(block);
            stages.filtered_blocks.push(filtered);
            stages.classifications.push(region);
        }
        index += 1;
    }
    Ok(index)
}

/// Render `text` to an HTML document with the standard rules.
pub fn markup_to_html(text: &str, config: &MarkupConfig) -> Result<String> {
    let renderer = HtmlRenderer::with_title(Vec::new(), config.document_title.as_str());
    let mut parser = Parser::standard(config)?.with_handler(renderer);
    parser.parse_str(text)?;
    let renderer = parser
        .into_handler()
        .ok_or(ConfigurationError::NoHandler)?;
    Ok(renderer.into_string())
}
