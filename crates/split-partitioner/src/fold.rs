//! Collapses K splits into K/2 folds, each with two sub-folds (spec.md
//! §4.G: "the pipeline uses K=10, later collapsed in pairs to 5 folds each
//! with two sub-folds").

use serde::Serialize;
use store::RegionId;

#[derive(Debug, Clone, Serialize)]
pub struct Fold {
    pub fold_index: usize,
    pub sub_fold_a: Vec<RegionId>,
    pub sub_fold_b: Vec<RegionId>,
}

pub fn collapse_to_folds(splits: &[Vec<RegionId>]) -> Vec<Fold> {
    splits
        .chunks(2)
        .enumerate()
        .map(|(fold_index, pair)| Fold {
            fold_index,
            sub_fold_a: pair[0].clone(),
            sub_fold_b: pair.get(1).cloned().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_splits_collapse_into_five_folds() {
        let splits: Vec<Vec<RegionId>> = (0..10).map(|i| vec![i]).collect();
        let folds = collapse_to_folds(&splits);
        assert_eq!(folds.len(), 5);
        assert_eq!(folds[0].sub_fold_a, vec![0]);
        assert_eq!(folds[0].sub_fold_b, vec![1]);
    }

    #[test]
    fn odd_split_count_leaves_last_subfold_empty() {
        let splits: Vec<Vec<RegionId>> = (0..3).map(|i| vec![i]).collect();
        let folds = collapse_to_folds(&splits);
        assert_eq!(folds.len(), 2);
        assert!(folds[1].sub_fold_b.is_empty());
    }
}
