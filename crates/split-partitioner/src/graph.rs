//! Connected components over the relaxed overlap graph (spec.md §4.G):
//! an edge connects `(a,b)` when `mean_overlap > 5 AND co_occurrence_pct > 5`.

use std::collections::HashMap;
use store::RegionId;

struct UnionFind {
    parent: HashMap<RegionId, RegionId>,
}

impl UnionFind {
    fn new(ids: &[RegionId]) -> Self {
        Self { parent: ids.iter().map(|&id| (id, id)).collect() }
    }

    fn find(&mut self, x: RegionId) -> RegionId {
        let p = self.parent[&x];
        if p == x {
            x
        } else {
            let root = self.find(p);
            self.parent.insert(x, root);
            root
        }
    }

    fn union(&mut self, a: RegionId, b: RegionId) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent.insert(ra, rb);
        }
    }
}

/// Groups: one per connected component; isolated regions each form their
/// own singleton group. Each group's members are sorted ascending, and
/// groups are ordered by their smallest member for determinism.
pub fn connected_components(region_ids: &[RegionId], edges: &[(RegionId, RegionId)]) -> Vec<Vec<RegionId>> {
    let mut uf = UnionFind::new(region_ids);
    for &(a, b) in edges {
        if uf.parent.contains_key(&a) && uf.parent.contains_key(&b) {
            uf.union(a, b);
        }
    }

    let mut groups: HashMap<RegionId, Vec<RegionId>> = HashMap::new();
    for &id in region_ids {
        let root = uf.find(id);
        groups.entry(root).or_default().push(id);
    }

    let mut result: Vec<Vec<RegionId>> = groups.into_values().collect();
    for g in &mut result {
        g.sort_unstable();
    }
    result.sort_by_key(|g| g[0]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_overlaps_merge_into_one_group() {
        let ids = vec![1, 2, 3, 4];
        let edges = vec![(1, 2), (2, 3)];
        let groups = connected_components(&ids, &edges);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![1, 2, 3]);
        assert_eq!(groups[1], vec![4]);
    }

    #[test]
    fn no_edges_yields_all_singletons() {
        let ids = vec![1, 2, 3];
        let groups = connected_components(&ids, &[]);
        assert_eq!(groups.len(), 3);
    }
}
