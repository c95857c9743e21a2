#[macro_use]
extern crate approx;
extern crate nalgebra as na;

mod geometry;
