//! `CMES`, `DIMMINGS`, `FLARES`: the three eruptive-event catalogues.

use crate::types::{CmeId, CoronagraphField, DimmingId, FlareId, Ts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cme {
    pub cme_id: CmeId,
    pub detection_ts: Ts,
    /// Absent iff `halo == true`.
    pub pa: Option<f64>,
    pub width_deg: f64,
    pub quality: String,
    pub halo: bool,
    pub field: CoronagraphField,
}

impl Cme {
    pub fn is_good_quality(&self) -> bool {
        self.quality.eq_ignore_ascii_case("good")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimming {
    pub dimming_id: DimmingId,
    pub ts: Ts,
    pub lon: f64,
    pub lat: f64,
    pub off_disk_xy: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flare {
    pub flare_id: FlareId,
    pub ts: Ts,
    pub lon: f64,
    pub lat: f64,
    pub class_score: f64,
    pub verification: String,
}

/// Class letter -> base score, per spec.md §3 (A=0, B=10, C=20, M=30, X=40,
/// plus magnitude).
pub fn flare_class_score(class_letter: char, magnitude: f64) -> Option<f64> {
    let base = match class_letter.to_ascii_uppercase() {
        'A' => 0.0,
        'B' => 10.0,
        'C' => 20.0,
        'M' => 30.0,
        'X' => 40.0,
        _ => return None,
    };
    Some(base + magnitude)
}

/// Generic append-only, ts-sorted event table shared by CMEs/dimmings/flares.
#[derive(Debug)]
pub struct EventTable<Id, E> {
    by_id: HashMap<Id, E>,
    by_ts: Vec<(Ts, Id)>,
}

impl<Id, E> Default for EventTable<Id, E> {
    fn default() -> Self {
        Self {
            by_id: HashMap::new(),
            by_ts: Vec::new(),
        }
    }
}

impl<Id, E> EventTable<Id, E>
where
    Id: std::hash::Hash + Eq + Copy + Ord,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.by_id.clear();
        self.by_ts.clear();
    }

    pub fn insert(&mut self, id: Id, ts: Ts, event: E) {
        let pos = self.by_ts.partition_point(|(t, _)| *t <= ts);
        self.by_ts.insert(pos, (ts, id));
        self.by_id.insert(id, event);
    }

    pub fn get(&self, id: Id) -> Option<&E> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.by_id.values()
    }

    /// Events in `[start, end)`, ascending by ts then id, for deterministic
    /// iteration per spec.md §5.
    pub fn in_range(&self, start: Ts, end: Ts) -> Vec<&E> {
        let lo = self.by_ts.partition_point(|(t, _)| *t < start);
        let hi = self.by_ts.partition_point(|(t, _)| *t < end);
        self.by_ts[lo..hi]
            .iter()
            .filter_map(|(_, id)| self.by_id.get(id))
            .collect()
    }
}

pub type CmeTable = EventTable<CmeId, Cme>;
pub type DimmingTable = EventTable<DimmingId, Dimming>;
pub type FlareTable = EventTable<FlareId, Flare>;
