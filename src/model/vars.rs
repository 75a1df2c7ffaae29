//! The dense variable store backing a [`super::Model`].

use super::domain::Domain;
use super::var::VarId;

/// Dense storage of every variable's current domain, indexed by [`VarId`].
#[derive(Debug, Default, Clone)]
pub struct Vars {
    domains: Vec<Domain>,
}

impl Vars {
    pub fn new_var(&mut self, lo: i64, hi: i64) -> VarId {
        let id = VarId(self.domains.len());
        self.domains.push(Domain::new(lo, hi));
        id
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn domain(&self, v: VarId) -> Domain {
        self.domains[v.index()]
    }

    pub fn set_domain(&mut self, v: VarId, d: Domain) {
        self.domains[v.index()] = d;
    }

    pub fn all(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.domains.len()).map(VarId)
    }

    pub fn snapshot(&self) -> Vec<Domain> {
        self.domains.clone()
    }

    pub fn restore(&mut self, snapshot: Vec<Domain>) {
        self.domains = snapshot;
    }

    /// Fixed value of every variable, in id order. Panics if any domain is
    /// not a singleton — callers only use this at a search leaf where every
    /// variable has already been branched to a point value.
    pub fn snapshot_values(&self) -> Vec<i64> {
        self.domains.iter().map(|d| d.value().expect("snapshot_values called on an unfixed domain")).collect()
    }
}
