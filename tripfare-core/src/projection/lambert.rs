use super::{ConicParameters, Ellipsoid, ProjectionError};

/// Lambert Conformal Conic with two standard parallels (Snyder ch. 15).
/// all inputs and outputs are radians and meters, relative to the false origin.
pub(super) struct LambertConformalConic {
    a: f64,
    ellipsoid: Ellipsoid,
    n: f64,
    big_f: f64,
    rho0: f64,
    lambda0: f64,
}

impl LambertConformalConic {
    pub fn new(
        params: &ConicParameters,
        ellipsoid: Ellipsoid,
    ) -> Result<LambertConformalConic, ProjectionError> {
        let phi1 = params.standard_parallel_1.to_radians();
        let phi2 = params.standard_parallel_2.to_radians();
        let phi0 = params.latitude_of_origin.to_radians();
        let (m1, m2) = (ellipsoid.m(phi1), ellipsoid.m(phi2));
        let (t1, t2, t0) = (ellipsoid.t(phi1), ellipsoid.t(phi2), ellipsoid.t(phi0));
        let n = if (phi1 - phi2).abs() > 1e-10 {
            (m1.ln() - m2.ln()) / (t1.ln() - t2.ln())
        } else {
            phi1.sin()
        };
        if n.abs() < 1e-10 || !n.is_finite() {
            return Err(ProjectionError::InvalidParameters(format!(
                "standard parallels {} and {} do not define a cone",
                params.standard_parallel_1, params.standard_parallel_2
            )));
        }
        let big_f = m1 / (n * t1.powf(n));
        let a = ellipsoid.semi_major_axis;
        Ok(LambertConformalConic {
            a,
            ellipsoid,
            n,
            big_f,
            rho0: a * big_f * t0.powf(n),
            lambda0: params.central_meridian.to_radians(),
        })
    }

    pub fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let rho = self.a * self.big_f * self.ellipsoid.t(phi).powf(self.n);
        let theta = self.n * normalize_longitude(lambda - self.lambda0);
        (rho * theta.sin(), self.rho0 - rho * theta.cos())
    }

    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let dy = self.rho0 - y;
        let sign = self.n.signum();
        let rho = sign * (x * x + dy * dy).sqrt();
        let theta = (sign * x).atan2(sign * dy);
        let lambda = theta / self.n + self.lambda0;
        if rho == 0.0 {
            return Ok((lambda, std::f64::consts::FRAC_PI_2 * sign));
        }
        let t = (rho / (self.a * self.big_f)).powf(1.0 / self.n);
        let phi = self
            .ellipsoid
            .phi_from_t(t)
            .ok_or(ProjectionError::NoConvergence { x, y })?;
        Ok((lambda, phi))
    }
}

pub(super) fn normalize_longitude(lambda: f64) -> f64 {
    use std::f64::consts::PI;
    let mut l = lambda;
    while l > PI {
        l -= 2.0 * PI;
    }
    while l < -PI {
        l += 2.0 * PI;
    }
    l
}
