//! Volume and center-of-mass of hulls.

pub use self::mass_properties_hull::signed_volume_and_center_of_mass;

mod mass_properties_hull;
