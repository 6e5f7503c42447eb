//! Example exporting list metrics in Prometheus text format.
//!
//! Run with: cargo run --example metrics_export --features metrics

use slotlist::ds::IndexList;
use slotlist::metrics::exporter::PrometheusTextExporter;
use slotlist::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};

fn main() {
    let mut list = IndexList::new();
    let handles: Vec<_> = (0..1_000u64).map(|i| list.push_back(i)).collect();
    for handle in handles.iter().step_by(2) {
        list.erase(*handle);
    }
    for i in 0..250 {
        list.push_front(i);
    }
    list.pop_back();
    list.reorder();

    let snapshot = list.snapshot();
    println!(
        "recycle rate {:.2}, fragmentation {:.2}\n",
        snapshot.recycle_rate(),
        snapshot.fragmentation()
    );

    let exporter = PrometheusTextExporter::new("slotlist", std::io::stdout());
    exporter.export(&snapshot);
}
