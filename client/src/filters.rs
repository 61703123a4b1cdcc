//! FILENAME: client/src/filters.rs
//! PURPOSE: Cascading filter selection and the stale-response guard.
//! CONTEXT: The four selection stages (indicator -> period -> segment ->
//! main classification) form a cascade: choosing a stage invalidates every
//! stage after it, since their option lists depend on it. `RequestSlot`
//! tags each dependent fetch with a generation token so that a response
//! arriving after the filters changed again can be discarded.

use serde::{Deserialize, Serialize};

use crate::types::{Indicator, MainClassification, Period, Segment, TreeQuery};

/// The current state of the cascading selectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub indicator: Option<Indicator>,
    pub period: Option<Period>,
    pub segment: Option<Segment>,
    pub main_classification: Option<MainClassification>,
}

impl FilterSelection {
    pub fn new() -> Self {
        FilterSelection::default()
    }

    /// Selects an indicator and clears every dependent stage.
    pub fn set_indicator(&mut self, indicator: Option<Indicator>) {
        self.indicator = indicator;
        self.period = None;
        self.segment = None;
        self.main_classification = None;
    }

    /// Selects a period and clears the stages after it.
    pub fn set_period(&mut self, period: Option<Period>) {
        self.period = period;
        self.segment = None;
        self.main_classification = None;
    }

    /// Selects a segment and clears the main classification.
    pub fn set_segment(&mut self, segment: Option<Segment>) {
        self.segment = segment;
        self.main_classification = None;
    }

    pub fn set_main_classification(&mut self, classification: Option<MainClassification>) {
        self.main_classification = classification;
    }

    /// All four stages selected; only then may the root query be issued.
    pub fn is_complete(&self) -> bool {
        self.indicator.is_some()
            && self.period.is_some()
            && self.segment.is_some()
            && self.main_classification.is_some()
    }

    /// Assembles the tree query from a complete selection.
    pub fn tree_query(&self, measure_id: u32) -> Option<TreeQuery> {
        let indicator = self.indicator.as_ref()?;
        let period = self.period.as_ref()?;
        let segment = self.segment.as_ref()?;
        let classification = self.main_classification.as_ref()?;

        Some(TreeQuery {
            measure_id,
            index_id: indicator.id,
            period_id: period.id,
            terms: segment.term_ids.clone(),
            term_id: classification.id,
            dic_ids: segment.dic_id.clone(),
            idx: segment.idx,
        })
    }
}

/// Token identifying one fetch issued against a dependent slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic generation counter for one dependent fetch slot (one per
/// selector and one for the result tree). A response is applied only if its
/// token is still the latest for the slot; otherwise it is stale and must
/// be dropped.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: u64,
}

impl RequestSlot {
    pub fn new() -> Self {
        RequestSlot::default()
    }

    /// Starts a new fetch generation, invalidating all earlier tokens.
    pub fn begin(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    /// Whether a completed fetch is still the latest one for this slot.
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(id: u64) -> Indicator {
        Indicator {
            id,
            name: format!("indicator {}", id),
        }
    }

    fn period(id: u64) -> Period {
        Period {
            id,
            name: format!("period {}", id),
        }
    }

    fn segment() -> Segment {
        Segment {
            id: 5,
            names: "По регионам".to_string(),
            term_ids: "247783,741917".to_string(),
            dic_id: "67,749".to_string(),
            idx: 0,
            mas_names: vec![MainClassification {
                id: 247783,
                name: "Регион".to_string(),
            }],
        }
    }

    fn complete_selection() -> FilterSelection {
        let mut filters = FilterSelection::new();
        filters.set_indicator(Some(indicator(18789901)));
        filters.set_period(Some(period(8)));
        let segment = segment();
        let classification = segment.mas_names[0].clone();
        filters.set_segment(Some(segment));
        filters.set_main_classification(Some(classification));
        filters
    }

    #[test]
    fn changing_an_upstream_stage_clears_downstream_stages() {
        let mut filters = complete_selection();
        assert!(filters.is_complete());

        filters.set_period(Some(period(9)));
        assert!(filters.segment.is_none());
        assert!(filters.main_classification.is_none());
        assert!(!filters.is_complete());

        filters.set_indicator(Some(indicator(2)));
        assert!(filters.period.is_none());
    }

    #[test]
    fn tree_query_requires_a_complete_selection() {
        let mut filters = complete_selection();
        let query = filters.tree_query(1).unwrap();
        assert_eq!(query.index_id, 18789901);
        assert_eq!(query.period_id, 8);
        assert_eq!(query.terms, "247783,741917");
        assert_eq!(query.term_id, 247783);
        assert_eq!(query.dic_ids, "67,749");

        filters.set_segment(None);
        assert!(filters.tree_query(1).is_none());
    }

    #[test]
    fn request_slot_invalidates_earlier_tokens() {
        let mut slot = RequestSlot::new();
        let first = slot.begin();
        assert!(slot.is_current(first));

        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }
}
