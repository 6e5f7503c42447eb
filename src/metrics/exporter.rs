use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::IndexListMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for list metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_metric("gauge", &self.metric_name(suffix), value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<IndexListMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &IndexListMetricsSnapshot) {
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_recycled_total", snapshot.insert_recycled);
        self.write_counter("insert_appended_total", snapshot.insert_appended);
        self.write_counter("erase_calls_total", snapshot.erase_calls);
        self.write_counter("erase_end_noops_total", snapshot.erase_end_noops);
        self.write_counter("pop_empty_calls_total", snapshot.pop_empty_calls);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_counter("reorder_calls_total", snapshot.reorder_calls);
        self.write_counter("shrink_calls_total", snapshot.shrink_calls);
        self.write_counter("compaction_moves_total", snapshot.compaction_moves);
        self.write_counter("slots_released_total", snapshot.slots_released);
        self.write_gauge("len", snapshot.len);
        self.write_gauge("capacity", snapshot.capacity);
        self.write_gauge("pool_len", snapshot.pool_len);
        self.write_gauge("free_len", snapshot.free_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("slotlist", Vec::new());
        let snapshot = IndexListMetricsSnapshot {
            insert_calls: 3,
            len: 2,
            free_len: 1,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE slotlist_insert_calls_total counter\n"));
        assert!(text.contains("slotlist_insert_calls_total 3\n"));
        assert!(text.contains("# TYPE slotlist_len gauge\n"));
        assert!(text.contains("slotlist_len 2\n"));
        assert!(text.contains("slotlist_free_len 1\n"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&IndexListMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE insert_calls_total counter\n"));
    }
}
