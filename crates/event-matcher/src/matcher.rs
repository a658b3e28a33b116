//! Top-level matching entry points (spec.md §4.D): temporal bracketing via
//! `RegionTable::bracketing`, bbox snapshot, then the CME/dimming/flare
//! spatial tests.

use crate::cme_test::is_spatially_consistent;
use crate::score::{best_match, DIMMING_SCORE, FLARE_SCORE};
use crate::snapshot::bbox_at;
use heliogeom::Point;
use store::{BBoxTable, Cme, Dimming, Flare, MatchedEvent, RegionEventMatch, RegionTable, SpatialCandidate};

/// Every region spatially consistent with this CME (spec.md §4.E: the
/// resolver, not the matcher, narrows this to one winner).
pub fn match_cme(cme: &Cme, regions: &RegionTable, bbox_table: &BBoxTable) -> Vec<SpatialCandidate> {
    regions
        .bracketing(cme.detection_ts)
        .into_iter()
        .filter_map(|region| {
            let bbox = bbox_at(bbox_table, region.region_id, cme.detection_ts)?;
            is_spatially_consistent(cme, &bbox).then_some(SpatialCandidate {
                cme_id: cme.cme_id,
                region_id: region.region_id,
            })
        })
        .collect()
}

pub fn match_dimming(dimming: &Dimming, regions: &RegionTable, bbox_table: &BBoxTable) -> Option<RegionEventMatch> {
    let candidates: Vec<_> = regions
        .bracketing(dimming.ts)
        .into_iter()
        .filter_map(|r| bbox_at(bbox_table, r.region_id, dimming.ts).map(|b| (r.region_id, b)))
        .collect();

    let (region_id, _score) = best_match(Point::new(dimming.lon, dimming.lat), &candidates, DIMMING_SCORE)?;
    Some(RegionEventMatch {
        region_id,
        event: MatchedEvent::Dimming { id: dimming.dimming_id, ts: dimming.ts },
    })
}

pub fn match_flare(flare: &Flare, regions: &RegionTable, bbox_table: &BBoxTable) -> Option<RegionEventMatch> {
    let candidates: Vec<_> = regions
        .bracketing(flare.ts)
        .into_iter()
        .filter_map(|r| bbox_at(bbox_table, r.region_id, flare.ts).map(|b| (r.region_id, b)))
        .collect();

    let (region_id, _score) = best_match(Point::new(flare.lon, flare.lat), &candidates, FLARE_SCORE)?;
    Some(RegionEventMatch {
        region_id,
        event: MatchedEvent::Flare { id: flare.flare_id, ts: flare.ts, class_score: flare.class_score },
    })
}
