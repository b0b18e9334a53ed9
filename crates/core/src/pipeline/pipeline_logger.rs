use std::collections::BTreeMap;
use std::time::Instant;

/// Observer for tick-loop events.
///
/// Lets the orchestrator report stage timings, detection outcomes and
/// degraded ticks without knowing whether anyone prints them.
pub trait PipelineLogger: Send {
    /// A tick finished. `total` is `None` for an open-ended live run.
    fn tick(&mut self, tick: usize, total: Option<usize>);

    /// How long one stage of the current tick took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Whether the detector reported a face on the current tick.
    fn face(&mut self, detected: bool);

    /// A recoverable problem; the tick continued with a fallback.
    fn warn(&mut self, message: &str);

    /// End-of-run report. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn tick(&mut self, _tick: usize, _total: Option<usize>) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn face(&mut self, _detected: bool) {}
    fn warn(&mut self, _message: &str) {}
}

/// Aggregates stage timings and detection hits and logs a throttled
/// progress line every `throttle_ticks` ticks.
pub struct StdoutPipelineLogger {
    throttle_ticks: usize,
    timings: BTreeMap<String, Vec<f64>>,
    ticks: usize,
    faces_found: usize,
    warnings: usize,
    start_time: Instant,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_ticks: usize) -> Self {
        Self {
            throttle_ticks: throttle_ticks.max(1),
            timings: BTreeMap::new(),
            ticks: 0,
            faces_found: 0,
            warnings: 0,
            start_time: Instant::now(),
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn faces_found(&self) -> usize {
        self.faces_found
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    /// Formatted report, or `None` before the first tick.
    pub fn summary_string(&self) -> Option<String> {
        if self.ticks == 0 {
            return None;
        }
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Pipeline summary ({} ticks, {:.1}s total):",
            self.ticks,
            elapsed_ms / 1000.0
        )];

        for (stage, durations) in &self.timings {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!("  {stage:12}: avg {avg_ms:6.2}ms  total {total_ms:8.1}ms"));
        }

        let hit_pct = self.faces_found as f64 / self.ticks as f64 * 100.0;
        lines.push(format!(
            "  Face found on {}/{} ticks ({hit_pct:.1}%)",
            self.faces_found, self.ticks
        ));
        if self.warnings > 0 {
            lines.push(format!("  Degraded ticks: {}", self.warnings));
        }
        if elapsed_ms > 0.0 {
            let tps = self.ticks as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {tps:.1} ticks/s"));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn tick(&mut self, tick: usize, total: Option<usize>) {
        self.ticks += 1;
        let done = tick + 1;
        let last = total.is_some_and(|t| done == t);
        if done % self.throttle_ticks != 0 && !last {
            return;
        }
        match total {
            Some(t) if t > 0 => {
                let pct = done as f64 / t as f64 * 100.0;
                log::info!("Tick {done}/{t} ({pct:.1}%)");
            }
            _ => log::info!("Tick {done}"),
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn face(&mut self, detected: bool) {
        if detected {
            self.faces_found += 1;
        }
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
