//! CSV export of linkage results.
//!
//! - clusters: one row per member, grouped by cluster in output order
//! - differences: one row per unreconciled name
//! - normalized: original/normalized pairs for a single list

use std::io::Write;

use namelink_linkage::model::{Cluster, DifferenceRecord, RawRecord};

pub fn write_clusters_csv<W: Write>(out: W, clusters: &[Cluster]) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["cluster", "canonical_name", "list", "line", "name", "score", "method"])?;
    for (i, cluster) in clusters.iter().enumerate() {
        let cluster_no = (i + 1).to_string();
        for m in &cluster.members {
            let line = m.line_index.to_string();
            let score = format!("{:.2}", m.score);
            let method = m.method.to_string();
            w.write_record([
                cluster_no.as_str(),
                cluster.canonical_name.as_str(),
                m.list_id.as_str(),
                line.as_str(),
                m.original.as_str(),
                score.as_str(),
                method.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn write_differences_csv<W: Write>(out: W, records: &[DifferenceRecord]) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["list_a", "name", "list_b", "best_match", "score"])?;
    for d in records {
        let score = format!("{:.2}", d.score);
        w.write_record([
            d.list_a.as_str(),
            d.original.as_str(),
            d.list_b.as_str(),
            d.best_match_or_sentinel(),
            score.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn write_normalized_csv<W: Write>(out: W, records: &[RawRecord]) -> Result<(), csv::Error> {
    let mut w = csv::Writer::from_writer(out);
    w.write_record(["line", "original", "normalized"])?;
    for r in records {
        let line = r.line_index.to_string();
        w.write_record([line.as_str(), r.original.as_str(), r.normalized.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
