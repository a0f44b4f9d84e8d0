//! Cleaning stages: missing-value resolution and type normalization.

mod imputation;
mod missing;
mod normalize;

pub use imputation::{FillStrategy, ImputationDictionary};
pub use missing::{
    EmptyGroupPolicy, FillSummary, GroupFill, MissingValueResolver, ResolutionReport,
    ResolverRoles,
};
pub use normalize::{TargetTypes, TypeNormalizer, vehicle_target_types};
