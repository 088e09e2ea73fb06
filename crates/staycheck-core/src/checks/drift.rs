//! Distribution-drift check over neighbourhood group counts.

use crate::errors::CheckError;
use crate::schema;
use crate::table::ListingTable;

/// Candidate and reference borough distributions must stay close.
///
/// Builds the `neighbourhood_group` count vector for both tables, aligned on
/// [`schema::KNOWN_BOROUGHS`] in ascending order, and passes iff the base-2
/// KL divergence over the raw counts is strictly below `threshold`.
///
/// The divergence is deliberately computed on raw counts, not normalized
/// probabilities, so the result scales with absolute sample sizes. A borough
/// counted in the candidate but absent from the reference makes the
/// divergence infinite, which fails the check rather than being treated
/// as zero.
pub fn check_drift(
    table: &ListingTable,
    reference: &ListingTable,
    threshold: f64,
) -> Result<(), CheckError> {
    let candidate_counts = borough_counts(table)?;
    let reference_counts = borough_counts(reference)?;

    let divergence = kl_divergence(&candidate_counts, &reference_counts);
    tracing::info!(
        candidate = table.name(),
        reference = reference.name(),
        candidate_counts = ?candidate_counts,
        reference_counts = ?reference_counts,
        divergence,
        threshold,
        "checking neighbourhood distribution drift"
    );

    if divergence < threshold {
        Ok(())
    } else {
        Err(CheckError::Drift {
            divergence,
            threshold,
            candidate: format_counts(&candidate_counts),
            reference: format_counts(&reference_counts),
        })
    }
}

/// Count `neighbourhood_group` occurrences per known borough.
///
/// The vector is index-aligned with [`schema::KNOWN_BOROUGHS`]; values
/// outside the known set are not counted here (the category check reports
/// them separately).
pub fn borough_counts(table: &ListingTable) -> Result<Vec<u64>, CheckError> {
    let groups = table.string_column("neighbourhood_group")?;

    let mut counts = vec![0u64; schema::KNOWN_BOROUGHS.len()];
    for value in groups.iter().flatten() {
        if let Some(index) = schema::KNOWN_BOROUGHS.iter().position(|b| *b == value) {
            counts[index] += 1;
        }
    }
    Ok(counts)
}

/// Kullback-Leibler divergence in base 2 over raw counts.
///
/// `KL(P, Q) = sum p_i * log2(p_i / q_i)`, with `p_i = 0` terms contributing
/// zero. A positive `p_i` against `q_i = 0` yields positive infinity.
pub fn kl_divergence(p: &[u64], q: &[u64]) -> f64 {
    p.iter()
        .zip(q.iter())
        .filter(|&(&p_i, _)| p_i > 0)
        .map(|(&p_i, &q_i)| {
            let p_i = p_i as f64;
            let q_i = q_i as f64;
            p_i * (p_i / q_i).log2()
        })
        .sum()
}

fn format_counts(counts: &[u64]) -> String {
    schema::KNOWN_BOROUGHS
        .iter()
        .zip(counts.iter())
        .map(|(borough, count)| format!("{borough}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
