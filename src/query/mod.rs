//! Plane-splitting of hulls.
//!
//! The main entry point is [`Hull::split`](crate::shape::Hull::split). Splitting many hulls
//! by a sequence of planes is done by [`split_hulls_by_planes`].

pub use self::split::{split_hulls_by_planes, CutPlane, SplitError};

mod split;
