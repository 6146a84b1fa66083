use super::{lambert::normalize_longitude, ConicParameters, Ellipsoid, ProjectionError};

/// Albers Equal-Area Conic (Snyder ch. 14).
/// all inputs and outputs are radians and meters, relative to the false origin.
pub(super) struct AlbersEqualArea {
    a: f64,
    ellipsoid: Ellipsoid,
    n: f64,
    c: f64,
    rho0: f64,
    lambda0: f64,
}

impl AlbersEqualArea {
    pub fn new(
        params: &ConicParameters,
        ellipsoid: Ellipsoid,
    ) -> Result<AlbersEqualArea, ProjectionError> {
        let phi1 = params.standard_parallel_1.to_radians();
        let phi2 = params.standard_parallel_2.to_radians();
        let phi0 = params.latitude_of_origin.to_radians();
        let (m1, m2) = (ellipsoid.m(phi1), ellipsoid.m(phi2));
        let (q1, q2, q0) = (ellipsoid.q(phi1), ellipsoid.q(phi2), ellipsoid.q(phi0));
        let n = if (phi1 - phi2).abs() > 1e-10 {
            (m1 * m1 - m2 * m2) / (q2 - q1)
        } else {
            phi1.sin()
        };
        if n.abs() < 1e-10 || !n.is_finite() {
            return Err(ProjectionError::InvalidParameters(format!(
                "standard parallels {} and {} do not define a cone",
                params.standard_parallel_1, params.standard_parallel_2
            )));
        }
        let c = m1 * m1 + n * q1;
        let a = ellipsoid.semi_major_axis;
        let rho0 = a * (c - n * q0).sqrt() / n;
        if !rho0.is_finite() {
            return Err(ProjectionError::InvalidParameters(format!(
                "latitude of origin {} is outside of the projection domain",
                params.latitude_of_origin
            )));
        }
        Ok(AlbersEqualArea {
            a,
            ellipsoid,
            n,
            c,
            rho0,
            lambda0: params.central_meridian.to_radians(),
        })
    }

    pub fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let q = self.ellipsoid.q(phi);
        let rho = self.a * (self.c - self.n * q).sqrt() / self.n;
        let theta = self.n * normalize_longitude(lambda - self.lambda0);
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let dy = self.rho0 - y;
        let sign = self.n.signum();
        let rho = sign * (x * x + dy * dy).sqrt();
        let theta = (sign * x).atan2(sign * dy);
        let q = (self.c - (rho * self.n / self.a).powi(2)) / self.n;
        let phi = self
            .ellipsoid
            .phi_from_q(q)
            .ok_or(ProjectionError::NoConvergence { x, y })?;
        Ok((theta / self.n + self.lambda0, phi))
    }
}
