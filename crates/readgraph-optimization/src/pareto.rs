//! Pareto ranking of score vectors
//!
//! Fast non-dominated sort (as used by NSGA-II) over maximized objectives.

/// `a` dominates `b` when it is no worse on every objective and strictly better on one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut better = false;
    for (x, y) in a.iter().zip(b.iter()) {
        if x < y {
            return false;
        }
        if x > y {
            better = true;
        }
    }
    better
}

/// Group points into successive non-dominated fronts.
///
/// Front 0 holds every point no other point dominates; front `k + 1` holds the
/// points dominated only by points in fronts `0..=k`. Indices inside a front
/// are ascending.
pub fn non_dominated_fronts(points: &[Vec<f64>]) -> Vec<Vec<usize>> {
    let n = points.len();
    let mut dominance_counts = vec![0usize; n];
    let mut dominated_sets = vec![Vec::new(); n];
    let mut fronts: Vec<Vec<usize>> = vec![Vec::new()];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if dominates(&points[i], &points[j]) {
                dominated_sets[i].push(j);
            } else if dominates(&points[j], &points[i]) {
                dominance_counts[i] += 1;
            }
        }
        if dominance_counts[i] == 0 {
            fronts[0].push(i);
        }
    }

    let mut k = 0;
    while !fronts[k].is_empty() {
        let mut next_front = Vec::new();
        for &p in &fronts[k] {
            for &q in &dominated_sets[p] {
                dominance_counts[q] -= 1;
                if dominance_counts[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        next_front.sort_unstable();
        k += 1;
        fronts.push(next_front);
    }

    fronts.pop();
    fronts
}
