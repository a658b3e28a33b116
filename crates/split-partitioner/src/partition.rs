//! Greedy K-way balancing by priority attribute (spec.md §4.G): tier-1
//! counts, then tier-2, ..., tier-5, then total group size.

use crate::grouping::Group;
use store::RegionId;

const PRIORITY_ATTRS: usize = 6;

#[derive(Debug, Default, Clone)]
struct SplitAccumulator {
    tier_sum: [u64; 5],
    size_sum: u64,
    group_indices: Vec<usize>,
}

impl SplitAccumulator {
    fn value(&self, attr: usize) -> u64 {
        if attr < 5 {
            self.tier_sum[attr]
        } else {
            self.size_sum
        }
    }

    fn assign(&mut self, group: &Group, group_idx: usize) {
        for (t, sum) in self.tier_sum.iter_mut().enumerate() {
            *sum += group.tier_counts[t] as u64;
        }
        self.size_sum += group.size() as u64;
        self.group_indices.push(group_idx);
    }
}

/// Each split's member regions, flattened across its assigned groups, in
/// the order groups were assigned.
pub fn balance_splits(groups: &[Group], k: usize) -> Vec<Vec<RegionId>> {
    let k = k.max(1);
    let mut accs = vec![SplitAccumulator::default(); k];
    let mut assigned = vec![false; groups.len()];

    for attr in 0..PRIORITY_ATTRS {
        let mut candidates: Vec<usize> = (0..groups.len()).filter(|&i| !assigned[i] && groups[i].attr_value(attr) > 0.0).collect();
        candidates.sort_by(|&a, &b| groups[b].attr_value(attr).partial_cmp(&groups[a].attr_value(attr)).unwrap().then(a.cmp(&b)));

        for idx in candidates {
            let (split_idx, _) = accs
                .iter()
                .enumerate()
                .min_by(|(ia, a), (ib, b)| a.value(attr).cmp(&b.value(attr)).then(ia.cmp(ib)))
                .unwrap();
            accs[split_idx].assign(&groups[idx], idx);
            assigned[idx] = true;
        }
    }

    accs.into_iter()
        .map(|acc| acc.group_indices.into_iter().flat_map(|i| groups[i].regions.clone()).collect())
        .collect()
}
