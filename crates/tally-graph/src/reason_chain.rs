//! Reason chain analysis for explaining why an entity was kept.
//!
//! The store only answers one hop ("what directly caused X?"). Reporting
//! tools usually want the whole story, e.g.
//! `Physics Module <- Rigidbody <- Required by Scripts`. This module walks
//! the reasons outward using nothing but the public query API and cuts
//! cycles, which the store does not rule out.

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::REQUIRED_BY_SCRIPTS;
use crate::store::AttributionStore;

/// Default bound on chain depth used by reporting tools.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 32;

/// Upper bound on the number of chains collected for one entity.
const MAX_CHAINS: usize = 1024;

/// Upper bound on partial paths the walk expands for one entity.
///
/// Densely connected graphs hold exponentially many paths. Once either cap
/// is reached the walk stops and returns what it has.
const MAX_STEPS: usize = 1 << 16;

/// One path from an entity out to a root cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonChain {
    /// Entity first, root cause last.
    pub path: Vec<String>,
    /// Number of hops (path length - 1).
    pub depth: usize,
}

impl ReasonChain {
    pub fn new(path: Vec<String>) -> Self {
        let depth = path.len().saturating_sub(1);
        Self { path, depth }
    }

    /// The entity being explained.
    pub fn subject(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    /// The entity at the end of the chain, which has no reasons of its own.
    pub fn root_cause(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Format as `"Physics Module <- Rigidbody <- Required by Scripts"`.
    pub fn format_chain(&self) -> String {
        self.path.join(" <- ")
    }
}

/// Summary of every chain found for an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainAnalysis {
    pub target: String,
    pub chains: Vec<ReasonChain>,
    pub min_depth: Option<usize>,
    pub max_depth: Option<usize>,
    /// Distinct root causes in order of first appearance.
    pub root_causes: Vec<String>,
}

impl ChainAnalysis {
    pub fn from_chains(target: impl Into<String>, chains: Vec<ReasonChain>) -> Self {
        let min_depth = chains.iter().map(|c| c.depth).min();
        let max_depth = chains.iter().map(|c| c.depth).max();

        let mut seen = HashSet::default();
        let root_causes = chains
            .iter()
            .filter_map(ReasonChain::root_cause)
            .filter(|root| seen.insert(*root))
            .map(str::to_owned)
            .collect();

        Self {
            target: target.into(),
            chains,
            min_depth,
            max_depth,
            root_causes,
        }
    }

    /// Walk `store` from `target` and summarise the result.
    pub fn analyze(store: &AttributionStore, target: &str, max_depth: usize) -> Self {
        Self::from_chains(target, reason_chains(store, target, max_depth))
    }

    /// Whether any recorded reason was found.
    pub fn is_explained(&self) -> bool {
        !self.chains.is_empty()
    }

    /// Whether some chain ends at the script reason.
    pub fn is_script_driven(&self) -> bool {
        self.root_causes.iter().any(|root| root == REQUIRED_BY_SCRIPTS)
    }

    /// The shortest chain (if any).
    pub fn shortest_chain(&self) -> Option<&ReasonChain> {
        self.chains.iter().min_by_key(|c| c.depth)
    }
}

/// Find reason chains from `entity` to a root cause.
///
/// A root cause is an entity with no reasons. Paths never visit an entity
/// twice; a path whose only continuations are cycles yields no chain. Paths
/// longer than `max_depth` hops are dropped.
///
/// The walk is depth-first and bounded: it stops after 1024 chains or
/// 65536 expanded paths, whichever comes first, so large
/// graphs return a partial answer instead of exhausting memory. Chains come
/// out shortest first; among equal depths they follow reason order.
pub fn reason_chains(store: &AttributionStore, entity: &str, max_depth: usize) -> Vec<ReasonChain> {
    let mut chains = Vec::new();
    let mut stack: Vec<Vec<&str>> = vec![vec![entity]];
    let mut steps = 0usize;

    while let Some(path) = stack.pop() {
        if chains.len() >= MAX_CHAINS || steps >= MAX_STEPS {
            trace!(entity, chains = chains.len(), steps, "reason chain walk truncated");
            break;
        }
        steps += 1;

        let Some(&current) = path.last() else {
            continue;
        };

        let reasons = store.reasons_for_including(current);
        if reasons.is_empty() {
            if path.len() > 1 {
                chains.push(ReasonChain::new(
                    path.iter().map(|name| (*name).to_owned()).collect(),
                ));
            }
            continue;
        }

        if path.len() > max_depth {
            continue;
        }

        // Reversed so the first reason is explored first.
        for reason in reasons.into_iter().rev() {
            if path.contains(&reason) {
                continue;
            }
            let mut next = path.clone();
            next.push(reason);
            stack.push(next);
        }
    }

    chains.sort_by_key(|chain| chain.depth);
    chains
}
