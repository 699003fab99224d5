use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::WarehouseMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for warehouse metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_bucket_gauges(&self, name: &str, values: &[usize]) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        for (bucket, value) in values.iter().enumerate() {
            let _ = writeln!(writer, "{}{{bucket=\"{}\"}} {}", name, bucket, value);
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<WarehouseMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &WarehouseMetricsSnapshot) {
        let counters = [
            ("insert_calls_total", snapshot.insert_calls),
            ("home_inserts_total", snapshot.home_inserts),
            ("sibling_inserts_total", snapshot.sibling_inserts),
            ("evictions_total", snapshot.evictions),
            ("replacements_total", snapshot.replacements),
            ("restock_calls_total", snapshot.restock_calls),
            ("delete_calls_total", snapshot.delete_calls),
            ("purchase_calls_total", snapshot.purchase_calls),
            ("purchase_applied_total", snapshot.purchase_applied),
            ("purchase_rejected_total", snapshot.purchase_rejected),
            ("lookup_misses_total", snapshot.lookup_misses),
            ("clears_total", snapshot.clears),
        ];
        for (suffix, value) in counters {
            self.write_counter(&self.metric_name(suffix), value);
        }
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
        self.write_bucket_gauges(&self.metric_name("bucket_len"), &snapshot.bucket_lens);
    }
}
