//! A solved assignment: one fixed value per [`super::VarId`].

use std::ops::Index;

use super::var::VarId;

#[derive(Debug, Clone)]
pub struct Solution {
    values: Vec<i64>,
    pub objective: i64,
}

impl Solution {
    pub(super) fn new(values: Vec<i64>, objective: i64) -> Self {
        Solution { values, objective }
    }

    pub fn get(&self, v: VarId) -> i64 {
        self.values[v.index()]
    }
}

impl Index<VarId> for Solution {
    type Output = i64;

    fn index(&self, v: VarId) -> &i64 {
        &self.values[v.index()]
    }
}
