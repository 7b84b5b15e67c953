//! Source jobs: filename range claims and label reconciliation.

pub mod range;
mod reconciler;

pub use range::{NumberRange, parse_range_from_stem};
pub use reconciler::{
    LabeledClip, ReconcileOutcome, Reconciliation, Reconciler, SourceJob, order_jobs,
};

pub(crate) use reconciler::label_span;
