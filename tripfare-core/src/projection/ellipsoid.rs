use std::f64::consts::FRAC_PI_2;

/// reference ellipsoid, described by its semi-major axis (meters) and
/// inverse flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    pub semi_major_axis: f64,
    pub inverse_flattening: f64,
}

pub const GRS80: Ellipsoid = Ellipsoid {
    semi_major_axis: 6_378_137.0,
    inverse_flattening: 298.257_222_101,
};

const MAX_ITERATIONS: usize = 20;
const CONVERGENCE_TOLERANCE: f64 = 1e-12;

impl Ellipsoid {
    /// first eccentricity squared
    pub fn e2(&self) -> f64 {
        let f = 1.0 / self.inverse_flattening;
        2.0 * f - f * f
    }

    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Snyder eq. 14-15
    pub fn m(&self, phi: f64) -> f64 {
        let sin_phi = phi.sin();
        phi.cos() / (1.0 - self.e2() * sin_phi * sin_phi).sqrt()
    }

    /// Snyder eq. 15-9
    pub fn t(&self, phi: f64) -> f64 {
        let e = self.e();
        let e_sin = e * phi.sin();
        (std::f64::consts::FRAC_PI_4 - phi / 2.0).tan()
            / ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)
    }

    /// Snyder eq. 3-12
    pub fn q(&self, phi: f64) -> f64 {
        let e = self.e();
        let e2 = self.e2();
        let sin_phi = phi.sin();
        let e_sin = e * sin_phi;
        (1.0 - e2)
            * (sin_phi / (1.0 - e_sin * e_sin)
                - (1.0 / (2.0 * e)) * ((1.0 - e_sin) / (1.0 + e_sin)).ln())
    }

    /// meridional radius of curvature at a latitude, in meters
    pub fn meridional_radius(&self, phi: f64) -> f64 {
        let e2 = self.e2();
        let sin_phi = phi.sin();
        self.semi_major_axis * (1.0 - e2) / (1.0 - e2 * sin_phi * sin_phi).powf(1.5)
    }

    /// latitude from the isometric value t (Snyder eq. 7-9)
    pub fn phi_from_t(&self, t: f64) -> Option<f64> {
        let e = self.e();
        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_ITERATIONS {
            let e_sin = e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - e_sin) / (1.0 + e_sin)).powf(e / 2.0)).atan();
            if (next - phi).abs() < CONVERGENCE_TOLERANCE {
                return Some(next);
            }
            phi = next;
        }
        None
    }

    /// latitude from the authalic value q (Snyder eq. 3-16)
    pub fn phi_from_q(&self, q: f64) -> Option<f64> {
        let e = self.e();
        let e2 = self.e2();
        let q_pole = self.q(FRAC_PI_2);
        if (q.abs() - q_pole).abs() < CONVERGENCE_TOLERANCE {
            return Some(FRAC_PI_2.copysign(q));
        }
        let mut phi = (q / 2.0).clamp(-1.0, 1.0).asin();
        for _ in 0..MAX_ITERATIONS {
            let sin_phi = phi.sin();
            let e_sin = e * sin_phi;
            let one_minus = 1.0 - e_sin * e_sin;
            let delta = one_minus * one_minus / (2.0 * phi.cos())
                * (q / (1.0 - e2) - sin_phi / one_minus
                    + (1.0 / (2.0 * e)) * ((1.0 - e_sin) / (1.0 + e_sin)).ln());
            phi += delta;
            if delta.abs() < CONVERGENCE_TOLERANCE {
                return Some(phi);
            }
        }
        None
    }
}
