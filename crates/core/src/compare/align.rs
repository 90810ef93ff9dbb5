//! Word-level alignment of original and spoken token sequences.
//!
//! Wagner–Fischer edit distance over tokens, where two tokens the
//! similarity judge accepts cost nothing to pair up.

use crate::compare::similarity::SimilarityJudge;
use crate::types::AlignmentOp;

/// Cost of leaving an original word unread or adding an extra word.
const GAP_COST: usize = 1;

/// Align `original` against `spoken`, returning ops in forward order.
///
/// Backtrace tie-break, checked in this order at every cell:
/// diagonal (match/substitution), then up (deletion), then left
/// (insertion). Mistake counts and positions depend on this order.
pub fn align(original: &[String], spoken: &[String], judge: &SimilarityJudge) -> Vec<AlignmentOp> {
    let m = original.len();
    let n = spoken.len();

    // Substitution costs, computed once and reused by the backtrace
    let costs: Vec<Vec<usize>> = original
        .iter()
        .map(|o| {
            spoken
                .iter()
                .map(|s| if judge.are_similar(o, s) { 0 } else { 1 })
                .collect()
        })
        .collect();

    // --- DP ---
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i * GAP_COST;
    }
    for j in 0..=n {
        dp[0][j] = j * GAP_COST;
    }
    for i in 1..=m {
        for j in 1..=n {
            let diagonal = dp[i - 1][j - 1] + costs[i - 1][j - 1];
            let up = dp[i - 1][j] + GAP_COST;
            let left = dp[i][j - 1] + GAP_COST;
            dp[i][j] = diagonal.min(up).min(left);
        }
    }

    // --- Backtrace ---
    let mut ops = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + costs[i - 1][j - 1] {
            let original = original[i - 1].clone();
            let spoken = spoken[j - 1].clone();
            if costs[i - 1][j - 1] == 0 {
                ops.push(AlignmentOp::Match { original, spoken });
            } else {
                ops.push(AlignmentOp::Substitution { original, spoken });
            }
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + GAP_COST {
            ops.push(AlignmentOp::Deletion {
                original: original[i - 1].clone(),
            });
            i -= 1;
        } else {
            // Only a left move remains consistent with the table
            ops.push(AlignmentOp::Insertion {
                spoken: spoken[j - 1].clone(),
            });
            j -= 1;
        }
    }
    ops.reverse();

    for (position, op) in ops.iter().enumerate() {
        log::trace!("align[{}]: {:?}", position, op);
    }
    ops
}
