use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginPhase {
    Begin,
    End,
}

/// Progress notification emitted by the optimizer while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Plugin {
        phase: PluginPhase,
        plugin_name: String,
    },
}

impl ProgressEvent {
    pub fn begin(plugin_name: impl Into<String>) -> Self {
        Self::Plugin {
            phase: PluginPhase::Begin,
            plugin_name: plugin_name.into(),
        }
    }

    pub fn end(plugin_name: impl Into<String>) -> Self {
        Self::Plugin {
            phase: PluginPhase::End,
            plugin_name: plugin_name.into(),
        }
    }
}

/// Total milliseconds spent per plugin during one optimization run.
pub type PluginTimes = BTreeMap<String, u64>;

/// Sums begin/end durations per plugin across every pass of one run.
#[derive(Debug, Clone, Default)]
pub struct PluginTimer {
    started_at: Option<u64>,
    totals: PluginTimes,
}

impl PluginTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one event observed at `now_ms`. An `End` without a preceding
    /// `Begin` is ignored.
    pub fn record(&mut self, event: &ProgressEvent, now_ms: u64) {
        match event {
            ProgressEvent::Plugin {
                phase: PluginPhase::Begin,
                ..
            } => self.started_at = Some(now_ms),
            ProgressEvent::Plugin {
                phase: PluginPhase::End,
                plugin_name,
            } => {
                if let Some(start) = self.started_at.take() {
                    *self.totals.entry(plugin_name.clone()).or_insert(0) +=
                        now_ms.saturating_sub(start);
                }
            }
        }
    }

    pub fn finish(self) -> PluginTimes {
        self.totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_plugins_are_summed() {
        let mut timer = PluginTimer::new();
        timer.record(&ProgressEvent::begin("a"), 0);
        timer.record(&ProgressEvent::end("a"), 3);
        timer.record(&ProgressEvent::begin("b"), 3);
        timer.record(&ProgressEvent::end("b"), 10);
        timer.record(&ProgressEvent::begin("a"), 10);
        timer.record(&ProgressEvent::end("a"), 12);

        let times = timer.finish();
        assert_eq!(times.get("a"), Some(&5));
        assert_eq!(times.get("b"), Some(&7));
    }

    #[test]
    fn unmatched_end_is_ignored() {
        let mut timer = PluginTimer::new();
        timer.record(&ProgressEvent::end("a"), 4);
        assert!(timer.finish().is_empty());
    }

    #[test]
    fn zero_duration_is_recorded() {
        let mut timer = PluginTimer::new();
        timer.record(&ProgressEvent::begin("fast"), 7);
        timer.record(&ProgressEvent::end("fast"), 7);
        assert_eq!(timer.finish().get("fast"), Some(&0));
    }
}
