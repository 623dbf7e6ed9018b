//! Cached aggregation over one element snapshot.
//!
//! A session owns its elements and remembers the result for every
//! parameter tuple it has run. Nothing expires on its own: callers drop the
//! cache with [`AggregationSession::invalidate`] or by replacing the
//! elements.

use super::aggregate::{check_unique_ids, Aggregator};
use super::params::{AggregationParams, ParamsKey};
use super::result::AggregationResult;
use crate::config::ClassificationConfig;
use crate::core::{Element, ElementId, Result};
use crate::corridor::Corridor;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

pub struct AggregationSession {
    elements: Vec<Element>,
    aggregator: Aggregator,
    cache: HashMap<ParamsKey, Arc<AggregationResult>>,
    last: Option<ParamsKey>,
}

impl AggregationSession {
    pub fn new(elements: Vec<Element>) -> Result<Self> {
        Self::with_classification(elements, ClassificationConfig::default())
    }

    pub fn with_classification(
        elements: Vec<Element>,
        classification: ClassificationConfig,
    ) -> Result<Self> {
        check_unique_ids(&elements)?;
        Ok(Self {
            elements,
            aggregator: Aggregator::new(classification),
            cache: HashMap::new(),
            last: None,
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Result for `params`, computed on first request and cached after.
    pub fn aggregate(&mut self, params: &AggregationParams) -> Result<Arc<AggregationResult>> {
        params.validate()?;
        let key = params.key();

        if let Some(cached) = self.cache.get(&key) {
            log::debug!("Reusing cached {} aggregation", params.mode());
            self.last = Some(key);
            return Ok(Arc::clone(cached));
        }

        let result = Arc::new(self.aggregator.run(&self.elements, params, Utc::now())?);
        self.cache.insert(key, Arc::clone(&result));
        self.last = Some(key);
        Ok(result)
    }

    /// Most recently requested result, if any survives invalidation.
    pub fn last_result(&self) -> Option<&AggregationResult> {
        self.last
            .and_then(|key| self.cache.get(&key))
            .map(Arc::as_ref)
    }

    pub fn corridor(&self, corridor_id: &str) -> Option<&Corridor> {
        self.last_result()?.corridor(corridor_id)
    }

    pub fn members(&self, corridor_id: &str) -> Option<&[ElementId]> {
        self.last_result()?.members(corridor_id)
    }

    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }

    pub fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            log::debug!("Invalidating {} cached aggregations", self.cache.len());
        }
        self.cache.clear();
        self.last = None;
    }

    /// Swap in a new snapshot; every cached result is discarded.
    pub fn replace_elements(&mut self, elements: Vec<Element>) -> Result<()> {
        check_unique_ids(&elements)?;
        self.elements = elements;
        self.invalidate();
        Ok(())
    }
}
