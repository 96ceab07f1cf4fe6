use crate::timing::PluginTimes;

/// Size and timing figures for one successful optimization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizationStats {
    pub input_size: usize,
    pub output_size: usize,
    pub time_ms: u64,
    pub parse_time_ms: Option<u64>,
    pub passes: Option<u32>,
}

impl OptimizationStats {
    /// Sizes are UTF-16 code units, the unit a browser reports as string length.
    pub fn new(
        input: &str,
        output: &str,
        time_ms: u64,
        parse_time_ms: Option<u64>,
        passes: Option<u32>,
    ) -> Self {
        Self {
            input_size: input.encode_utf16().count(),
            output_size: output.encode_utf16().count(),
            time_ms,
            parse_time_ms,
            passes,
        }
    }

    /// Negative when the output grew.
    pub fn bytes_saved(&self) -> i64 {
        self.input_size as i64 - self.output_size as i64
    }

    /// `(input - output) / input`; zero for empty input.
    pub fn compression(&self) -> f64 {
        if self.input_size == 0 {
            return 0.0;
        }
        self.bytes_saved() as f64 / self.input_size as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluginTimeRow {
    pub name: String,
    pub millis: u64,
    /// Bar width relative to the slowest plugin, 0..=100.
    pub bar_width_pct: f64,
    /// Share of the total plugin time, 0..=1.
    pub share: f64,
}

/// Rows sorted by descending time, ties by name.
pub fn plugin_time_rows(times: &PluginTimes) -> Vec<PluginTimeRow> {
    let mut entries: Vec<(&String, u64)> = times.iter().map(|(name, &ms)| (name, ms)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let max = entries.first().map(|(_, ms)| *ms).unwrap_or(0);
    let total: u64 = entries.iter().map(|(_, ms)| ms).sum();

    entries
        .into_iter()
        .map(|(name, millis)| PluginTimeRow {
            name: name.clone(),
            millis,
            bar_width_pct: ratio(millis, max) * 100.0,
            share: ratio(millis, total),
        })
        .collect()
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// `1234567` -> `"1,234,567"`; negative values keep their sign.
pub fn format_with_commas(value: i64) -> String {
    let mut out = String::new();
    for (i, ch) in value.unsigned_abs().to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.push('-');
    }
    out.chars().rev().collect()
}

/// `0.4545..` -> `"45.45%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
