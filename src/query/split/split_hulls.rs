use crate::query::split::CutPlane;
use crate::shape::Hull;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Splits every hull by each plane in turn.
///
/// Each plane is applied to all the pieces produced by the previous planes. Empty pieces are
/// discarded as soon as they are produced, so the result only contains non-empty hulls.
///
/// With the `parallel` feature enabled, the hulls are split in parallel.
pub fn split_hulls_by_planes(hulls: Vec<Hull>, planes: &[CutPlane], fill_cut: bool) -> Vec<Hull> {
    let mut pieces: Vec<Hull> = hulls.into_iter().filter(|h| !h.is_empty()).collect();

    for plane in planes {
        #[cfg(feature = "parallel")]
        {
            pieces = pieces
                .into_par_iter()
                .flat_map_iter(|hull| split_non_empty(hull, plane, fill_cut))
                .collect();
        }

        #[cfg(not(feature = "parallel"))]
        {
            pieces = pieces
                .into_iter()
                .flat_map(|hull| split_non_empty(hull, plane, fill_cut))
                .collect();
        }

        log::trace!("{} pieces after splitting by {:?}.", pieces.len(), plane);
    }

    pieces
}

fn split_non_empty(hull: Hull, plane: &CutPlane, fill_cut: bool) -> Vec<Hull> {
    match hull.split_by_plane(plane, fill_cut) {
        Ok((above, below)) => [above, below]
            .into_iter()
            .filter(|h| !h.is_empty())
            .collect(),
        Err(err) => {
            log::debug!("Discarding a hull: {}", err);
            Vec::new()
        }
    }
}
