//! Constraint representation: linear equalities and inequalities over
//! weighted sums of variables.
//!
//! Every rule compiler in `crate::rules` reduces to one of these two shapes
//! (see `spec.md` §4.3–§4.12 — each hard/soft rule is, at bottom, a linear
//! equality or a linear inequality over the assignment grid and a handful of
//! derived integer variables). Keeping the constraint language this narrow
//! is deliberate: it is exactly the subset `selen` calls `lin_eq`/`lin_le`,
//! and it lets this solver stay small while still being a real, independent
//! implementation rather than a stub.

use super::var::VarId;
use super::vars::Vars;

/// `Σ terms == rhs` or `Σ terms <= rhs`, where `terms` are `(coefficient,
/// variable)` pairs.
#[derive(Debug, Clone)]
pub struct Linear {
    pub terms: Vec<(i64, VarId)>,
    pub op: Op,
    pub rhs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Le,
}

impl Linear {
    pub fn eq(terms: Vec<(i64, VarId)>, rhs: i64) -> Self {
        Linear { terms, op: Op::Eq, rhs }
    }

    pub fn le(terms: Vec<(i64, VarId)>, rhs: i64) -> Self {
        Linear { terms, op: Op::Le, rhs }
    }

    /// `Σ terms >= rhs`, encoded as `Σ (-terms) <= -rhs`.
    pub fn ge(terms: Vec<(i64, VarId)>, rhs: i64) -> Self {
        let negated = terms.into_iter().map(|(c, v)| (-c, v)).collect();
        Linear { terms: negated, op: Op::Le, rhs: -rhs }
    }

    fn bounds_excluding(&self, skip: usize, vars: &Vars) -> (i64, i64) {
        let mut lo = 0i64;
        let mut hi = 0i64;
        for (i, (c, v)) in self.terms.iter().enumerate() {
            if i == skip {
                continue;
            }
            let d = vars.domain(*v);
            if *c >= 0 {
                lo += c * d.lo;
                hi += c * d.hi;
            } else {
                lo += c * d.hi;
                hi += c * d.lo;
            }
        }
        (lo, hi)
    }

    /// Tightens the domain of each participating variable given the current
    /// bounds of the others. Returns `true` if any domain changed. Never
    /// makes the model *less* correct if it under-prunes — [`Self::holds`]
    /// is the authority used at a fully assigned leaf.
    pub fn narrow(&self, vars: &mut Vars) -> bool {
        let mut changed = false;
        for (i, (c, v)) in self.terms.iter().enumerate() {
            if *c == 0 {
                continue;
            }
            let (others_lo, others_hi) = self.bounds_excluding(i, vars);
            // Valid range for `c * x` given the others' current bounds:
            // Le:  c*x <= rhs - others_lo                (others at best case)
            // Eq:  c*x in [rhs - others_hi, rhs - others_lo]
            let (span_lo, span_hi) = match self.op {
                Op::Le => (i64::MIN, self.rhs - others_lo),
                Op::Eq => (self.rhs - others_hi, self.rhs - others_lo),
            };
            let (x_lo, x_hi) = if *c > 0 {
                (ceil_div_bound(span_lo, *c), floor_div_bound(span_hi, *c))
            } else {
                (ceil_div_bound(span_hi, *c), floor_div_bound(span_lo, *c))
            };
            let d = vars.domain(*v);
            let mut nd = d;
            if nd.tighten(x_lo, x_hi) {
                changed = true;
            }
            vars.set_domain(*v, nd);
        }
        changed
    }

    /// Ground-truth check against a fully (or partially) assigned state.
    /// Used at leaves of search; also doubles as a quick infeasibility check
    /// (`None` when still underdetermined, bounds-wise).
    pub fn holds(&self, vars: &Vars) -> bool {
        let mut sum = 0i64;
        for (c, v) in &self.terms {
            match vars.domain(*v).value() {
                Some(val) => sum += c * val,
                None => return true, // not yet decided; don't reject early
            }
        }
        match self.op {
            Op::Eq => sum == self.rhs,
            Op::Le => sum <= self.rhs,
        }
    }

    /// `true` once every participating variable is fixed.
    pub fn is_ground(&self, vars: &Vars) -> bool {
        self.terms.iter().all(|(_, v)| vars.domain(*v).is_fixed())
    }

    /// Cheap bound check: `false` means the constraint can *never* be
    /// satisfied given current domains, regardless of future branching.
    pub fn is_feasible(&self, vars: &Vars) -> bool {
        let (lo, hi) = self.bounds_excluding(self.terms.len(), vars);
        match self.op {
            Op::Eq => lo <= self.rhs && self.rhs <= hi,
            Op::Le => lo <= self.rhs,
        }
    }
}

/// Floor division that is correct for a negative divisor, unlike plain `/`
/// (which truncates toward zero) or `div_euclid` (which keeps the remainder
/// non-negative instead of flooring the quotient).
fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn div_ceil(a: i64, b: i64) -> i64 {
    -div_floor(-a, b)
}

/// `a` is already an "unbounded" sentinel (`i64::MIN` or `i64::MAX`, used by
/// an `Op::Le` span that has no finite bound on one side). Dividing a
/// sentinel by `b` stays unbounded, but a negative `b` flips which side:
/// `-infinity / -1` is `+infinity`, not a number plain division could ever
/// produce (and `i64::MIN / -1` is exactly the case that overflows). Neither
/// `ceil` nor `floor` of an infinite value is meaningful, so both bound
/// helpers share this.
fn saturated(a: i64, b: i64) -> Option<i64> {
    if a == i64::MIN {
        Some(if b > 0 { i64::MIN } else { i64::MAX })
    } else if a == i64::MAX {
        Some(if b > 0 { i64::MAX } else { i64::MIN })
    } else {
        None
    }
}

/// `ceil(a / b)`, saturating instead of overflowing when `a` is already an
/// unbounded sentinel.
fn ceil_div_bound(a: i64, b: i64) -> i64 {
    match saturated(a, b) {
        Some(v) => v,
        None => div_ceil(a, b),
    }
}

/// `floor(a / b)`, saturating instead of overflowing when `a` is already an
/// unbounded sentinel.
fn floor_div_bound(a: i64, b: i64) -> i64 {
    match saturated(a, b) {
        Some(v) => v,
        None => div_floor(a, b),
    }
}
