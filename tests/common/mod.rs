#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use mafstats::{AlignedSequence, AlignmentBlock};

/// Two blocks: three species, then two with one absent.
pub const SMALL_MAF: &str = "##maf version=1\n\
\n\
a score=10.5\n\
s hg.chr1 0 6 + 100 ACGTAC\n\
s pt.chr1 0 6 + 100 ACGAAC\n\
s mm.chr2 0 5 + 100 AC-TAN\n\
\n\
a score=3\n\
s hg.chr1 10 4 + 100 TTAA\n\
s mm.chr2 10 4 + 100 TTGA\n";

/// Build a block from `(src, text)` rows.
pub fn block(rows: &[(&str, &str)]) -> AlignmentBlock {
    AlignmentBlock::from_sequences(
        rows.iter()
            .map(|(src, text)| AlignedSequence::new(src, text.as_bytes())),
    )
    .expect("rows have equal length")
}

fn snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join(name)
}

/// Compare TSV output with `tests/snapshots/<name>` row by row and cell by
/// cell. `MAFSTATS_UPDATE_SNAPSHOTS` rewrites the file instead.
pub fn assert_tsv_snapshot(name: &str, actual: &str) {
    let path = snapshot_path(name);
    if std::env::var_os("MAFSTATS_UPDATE_SNAPSHOTS").is_some() {
        fs::write(&path, actual)
            .unwrap_or_else(|err| panic!("cannot write {}: {err}", path.display()));
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
    let expected_rows: Vec<&str> = expected.lines().collect();
    let actual_rows: Vec<&str> = actual.lines().collect();
    for (row, (want, got)) in expected_rows.iter().zip(&actual_rows).enumerate() {
        let cell = want
            .split('\t')
            .zip(got.split('\t'))
            .find(|(w, g)| w != g);
        if let Some((want_cell, got_cell)) = cell {
            panic!(
                "{} row {}: expected {want_cell}, got {got_cell}",
                path.display(),
                row + 1
            );
        }
        assert_eq!(
            want.split('\t').count(),
            got.split('\t').count(),
            "{} row {}: cell count",
            path.display(),
            row + 1
        );
    }
    assert_eq!(
        expected_rows.len(),
        actual_rows.len(),
        "{}: row count",
        path.display()
    );
}
