use super::{BlockStatistic, StatResult};
use crate::alignment::{AlignmentBlock, Alphabet, SpeciesSelection};
use crate::Result;

const TAGS: [&str; 5] = ["NbSeg", "NbAnalyzed", "WattersonTheta", "TajimaPi", "TajimaD"];

/// Harmonic number a1 = sum_{i=1}^{n} 1/i.
fn harmonic(n: usize) -> f64 {
    (1..=n).map(|i| 1.0 / i as f64).sum()
}

/// a2 = sum_{i=1}^{n} 1/i^2.
fn harmonic_sq(n: usize) -> f64 {
    (1..=n).map(|i| 1.0 / (i as f64 * i as f64)).sum()
}

/// Tajima's D from the number of segregating sites, the sample size and the
/// total number of pairwise differences. NaN when the variance vanishes.
fn tajimas_d(segregating: u64, n_sequences: usize, pi_total: f64) -> f64 {
    if segregating == 0 || n_sequences < 2 {
        return f64::NAN;
    }
    let n = n_sequences as f64;
    let s = segregating as f64;
    let a1 = harmonic(n_sequences - 1);
    let a2 = harmonic_sq(n_sequences - 1);

    let b1 = (n + 1.0) / (3.0 * (n - 1.0));
    let b2 = 2.0 * (n * n + n + 3.0) / (9.0 * n * (n - 1.0));
    let c1 = b1 - 1.0 / a1;
    let c2 = b2 - (n + 2.0) / (a1 * n) + a2 / (a1 * a1);
    let e1 = c1 / a1;
    let e2 = c2 / (a1 * a1 + a2);

    let variance = e1 * s + e2 * s * (s - 1.0);
    if variance > 0.0 {
        (pi_total - s / a1) / variance.sqrt()
    } else {
        f64::NAN
    }
}

/// Nucleotide diversity of the selected rows.
///
/// Only complete columns are analysed. Reports the number of segregating
/// sites (`NbSeg`), analysed columns (`NbAnalyzed`), Watterson's theta for
/// the block, Tajima's pi per analysed site and Tajima's D. Undefined
/// estimates are NaN (fewer than two rows, or D without segregating sites).
#[derive(Debug, Clone)]
pub struct SequenceDiversity {
    alphabet: Alphabet,
    ingroup: SpeciesSelection,
    result: StatResult,
}

impl SequenceDiversity {
    /// Create the statistic. An empty species list selects every row.
    pub fn new<I, S>(alphabet: Alphabet, ingroup: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            alphabet,
            ingroup: SpeciesSelection::all_if_empty(ingroup)?,
            result: StatResult::new(),
        })
    }
}

impl BlockStatistic for SequenceDiversity {
    fn short_name(&self) -> String {
        "SequenceDiversityStatistics".to_string()
    }

    fn full_name(&self) -> String {
        "Sequence diversity estimators.".to_string()
    }

    fn compute(&mut self, block: &AlignmentBlock) -> Result<()> {
        let alignment = self.ingroup.project(block);
        let n = alignment.number_of_sequences();

        let mut segregating = 0u64;
        let mut analyzed = 0u64;
        let mut differences = 0u64;
        for site in alignment.site_summaries(self.alphabet) {
            if !site.is_complete() {
                continue;
            }
            analyzed += 1;
            if site.distinct_states() > 1 {
                segregating += 1;
                differences += site.pairwise_differences();
            }
        }

        let (theta, pi, d) = if n < 2 {
            (f64::NAN, f64::NAN, f64::NAN)
        } else if segregating == 0 {
            (0.0, 0.0, f64::NAN)
        } else {
            let pairs = (n * (n - 1) / 2) as f64;
            let pi_total = differences as f64 / pairs;
            let theta = segregating as f64 / harmonic(n - 1);
            (
                theta,
                pi_total / analyzed as f64,
                tajimas_d(segregating, n, pi_total),
            )
        };

        let mut result = StatResult::new();
        result.set_value(TAGS[0], segregating);
        result.set_value(TAGS[1], analyzed);
        result.set_value(TAGS[2], theta);
        result.set_value(TAGS[3], pi);
        result.set_value(TAGS[4], d);
        tracing::trace!(n, segregating, analyzed, "diversity computed");
        self.result = result;
        Ok(())
    }

    fn result(&self) -> &StatResult {
        &self.result
    }

    fn supported_tags(&self) -> Vec<String> {
        TAGS.iter().map(|t| t.to_string()).collect()
    }

    fn clone_boxed(&self) -> Box<dyn BlockStatistic> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::AlignedSequence;

    fn diversity(rows: &[&str]) -> SequenceDiversity {
        let block = AlignmentBlock::from_sequences(
            rows.iter()
                .enumerate()
                .map(|(i, text)| AlignedSequence::new(&format!("sp{i}.chr1"), text.as_bytes())),
        )
        .unwrap();
        let mut stat = SequenceDiversity::new(Alphabet::Dna, Vec::<String>::new()).unwrap();
        stat.compute(&block).unwrap();
        stat
    }

    fn float(stat: &SequenceDiversity, tag: &str) -> f64 {
        stat.result().value(tag).unwrap().as_f64()
    }

    #[test]
    fn two_rows_one_segregating_site() {
        let stat = diversity(&["ACGTA", "ACGTT"]);
        assert_eq!(float(&stat, "NbSeg"), 1.0);
        assert_eq!(float(&stat, "NbAnalyzed"), 5.0);
        assert!((float(&stat, "WattersonTheta") - 1.0).abs() < 1e-12);
        assert!((float(&stat, "TajimaPi") - 0.2).abs() < 1e-12);
        // S = 1 with two rows has no variance.
        assert!(float(&stat, "TajimaD").is_nan());
    }

    #[test]
    fn no_segregating_site() {
        let stat = diversity(&["ACGT", "ACGT", "AC-T"]);
        assert_eq!(float(&stat, "NbSeg"), 0.0);
        assert_eq!(float(&stat, "NbAnalyzed"), 3.0);
        assert_eq!(float(&stat, "WattersonTheta"), 0.0);
        assert_eq!(float(&stat, "TajimaPi"), 0.0);
        assert!(float(&stat, "TajimaD").is_nan());
    }

    #[test]
    fn tajimas_d_with_four_rows() {
        // Columns 2 (A,A,C,T) and 5 (A,A,A,G) segregate: 5 + 3 differences.
        let stat = diversity(&["AAAAA", "AAAAA", "ACAAA", "ATAAG"]);
        assert_eq!(float(&stat, "NbSeg"), 2.0);
        assert!((float(&stat, "WattersonTheta") - 2.0 / (1.0 + 0.5 + 1.0 / 3.0)).abs() < 1e-12);
        assert!((float(&stat, "TajimaPi") - 8.0 / 30.0).abs() < 1e-12);
        assert!((float(&stat, "TajimaD") - 1.893_056_447_678_595).abs() < 1e-9);
    }

    #[test]
    fn single_row_is_undefined() {
        let stat = diversity(&["ACGT"]);
        assert!(float(&stat, "WattersonTheta").is_nan());
        assert!(float(&stat, "TajimaPi").is_nan());
        assert!(float(&stat, "TajimaD").is_nan());
    }
}
