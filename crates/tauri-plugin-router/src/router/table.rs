//! Route table storage
//!
//! Buckets are keyed by [`MethodFilter`]. Inside a bucket, patterns keep
//! their first-registration order and each pattern owns an append-only list
//! of handlers.

use crate::{
    handler::RouteHandler,
    method::{HttpMethod, MethodFilter},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One registered pattern and the handlers registered for it (internal)
pub(crate) struct PatternEntry<Ctx: Send + Sync + 'static> {
    pub(crate) pattern: String,
    /// Never empty once created
    pub(crate) handlers: Vec<RouteHandler<Ctx>>,
}

/// Method-bucketed route table (internal)
pub(crate) struct RouteTable<Ctx: Send + Sync + 'static> {
    buckets: HashMap<MethodFilter, Vec<PatternEntry<Ctx>>>,
    handler_count: usize,
}

impl<Ctx: Send + Sync + 'static> Default for RouteTable<Ctx> {
    fn default() -> Self {
        Self {
            buckets: HashMap::new(),
            handler_count: 0,
        }
    }
}

impl<Ctx: Send + Sync + 'static> RouteTable<Ctx> {
    /// Append a handler to the (filter, pattern) list, creating it if absent.
    ///
    /// Returns the handler's position in that list.
    pub(crate) fn insert(
        &mut self,
        filter: MethodFilter,
        pattern: String,
        handler: RouteHandler<Ctx>,
    ) -> usize {
        let bucket = self.buckets.entry(filter).or_default();
        self.handler_count += 1;

        match bucket.iter_mut().find(|entry| entry.pattern == pattern) {
            Some(entry) => {
                entry.handlers.push(handler);
                entry.handlers.len() - 1
            }
            None => {
                bucket.push(PatternEntry {
                    pattern,
                    handlers: vec![handler],
                });
                0
            }
        }
    }

    /// Total number of registered handlers across every bucket
    pub(crate) fn handler_count(&self) -> usize {
        self.handler_count
    }

    /// Patterns eligible for a request, in trial order.
    ///
    /// The request method's bucket comes first, then the wildcard bucket.
    /// Methods outside the enumeration only see the wildcard bucket.
    pub(crate) fn candidates(
        &self,
        method: Option<HttpMethod>,
    ) -> impl Iterator<Item = (MethodFilter, &PatternEntry<Ctx>)> {
        method
            .map(MethodFilter::Method)
            .into_iter()
            .chain(std::iter::once(MethodFilter::Any))
            .filter_map(move |filter| self.buckets.get(&filter).map(|bucket| (filter, bucket)))
            .flat_map(|(filter, bucket)| bucket.iter().map(move |entry| (filter, entry)))
    }

    /// Describe every registered pattern.
    ///
    /// Method buckets are listed in enumeration order, the wildcard bucket last.
    pub(crate) fn routes(&self) -> Vec<RouteInfo> {
        HttpMethod::ALL
            .into_iter()
            .map(MethodFilter::Method)
            .chain(std::iter::once(MethodFilter::Any))
            .filter_map(|filter| self.buckets.get(&filter).map(|bucket| (filter, bucket)))
            .flat_map(|(filter, bucket)| {
                bucket.iter().map(move |entry| RouteInfo {
                    method: filter.to_string(),
                    pattern: entry.pattern.clone(),
                    handlers: entry.handlers.len(),
                })
            })
            .collect()
    }
}

/// Description of one registered (method, pattern) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Method name, or `*` for wildcard routes
    pub method: String,
    /// Pattern as registered
    pub pattern: String,
    /// Number of handlers in the fallback chain
    pub handlers: usize,
}
