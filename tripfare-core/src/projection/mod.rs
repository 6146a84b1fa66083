//! coordinate reference systems for projecting zone centroids. the
//! projections are the ellipsoidal forms from Snyder, "Map Projections: A
//! Working Manual" (USGS PP 1395), evaluated on the GRS80 ellipsoid.
mod albers;
mod crs;
mod ellipsoid;
mod error;
mod lambert;

pub use crs::{ConicParameters, Crs, LinearUnit};
pub use ellipsoid::Ellipsoid;
pub use error::ProjectionError;
