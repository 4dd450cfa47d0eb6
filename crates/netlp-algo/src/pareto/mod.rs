//! Bi-objective shortest paths by the epsilon-constraint method
//!
//! Each arc carries two lengths. A path is *non-dominated* when no other path
//! is at least as short in both lengths and strictly shorter in one. The
//! enumerator traces the non-dominated frontier by repeatedly solving a
//! single-objective model:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  EPSILON-CONSTRAINT LOOP                                              │
//! │                                                                      │
//! │  M ← initial bound (default: Σ secondary lengths + 1)                │
//! │  loop:                                                               │
//! │    minimize   Σ length · x                                           │
//! │    subject to unit s-t flow,  Σ secondary_length · x ≤ M − step      │
//! │    infeasible  → frontier exhausted, stop                            │
//! │    unbounded   → modeling fault, abort with an error                 │
//! │    optimal     → record (length, secondary), M ← secondary           │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every found point lowers the bound strictly, so the secondary values of
//! the returned points strictly decrease and the primary values never
//! decrease. Two consecutive points may tie on the primary value: the method
//! guarantees *weakly* non-dominated points only.
//!
//! The iterations are inherently sequential since each model depends on the
//! bound produced by the previous one. [`EpsilonConstraint`] exposes them as
//! a lazy iterator; [`eps_constraint`] collects them into a [`ParetoFront`].

mod epsilon;
mod front;

pub use epsilon::{default_bound, eps_constraint, EpsilonConstraint};
pub use front::{ParetoFront, ParetoPoint};
