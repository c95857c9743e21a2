pub use self::split::{CutPlane, SplitError};
pub use self::split_hulls::split_hulls_by_planes;

mod split;
mod split_cap;
mod split_hull;
mod split_hulls;
