//! Map projection math
//!
//! Converts between geodetic longitude/latitude and the projected plane of a
//! catalog definition. Transverse Mercator uses the Krüger series expanded to
//! sixth order in the third flattening `n`, which keeps errors well below a
//! millimeter inside the Colombian zones.

use std::f64::consts::FRAC_PI_2;

use super::catalog::{Ellipsoid, ProjectionKind, ReferenceDefinition, TransverseMercatorParams};

/// Projector built from a catalog definition
#[derive(Debug, Clone)]
pub enum Projector {
    /// Geographic system: coordinates already are longitude/latitude
    LongLat,
    /// Ellipsoidal transverse Mercator
    TransverseMercator(TransverseMercator),
}

impl Projector {
    /// Build the projector for a definition
    pub fn from_definition(definition: &ReferenceDefinition) -> Self {
        match definition.kind {
            ProjectionKind::LongLat => Projector::LongLat,
            ProjectionKind::TransverseMercator(params) => {
                Projector::TransverseMercator(TransverseMercator::new(definition.ellipsoid, params))
            },
        }
    }

    /// Convert coordinates of this system to longitude/latitude in degrees
    pub fn to_geodetic(&self, x: f64, y: f64) -> Result<(f64, f64), String> {
        match self {
            Projector::LongLat => {
                check_geodetic_range(x, y)?;
                Ok((x, y))
            },
            Projector::TransverseMercator(tm) => tm.inverse(x, y),
        }
    }

    /// Convert longitude/latitude in degrees to coordinates of this system
    pub fn from_geodetic(&self, lon: f64, lat: f64) -> Result<(f64, f64), String> {
        check_geodetic_range(lon, lat)?;
        match self {
            Projector::LongLat => Ok((lon, lat)),
            Projector::TransverseMercator(tm) => tm.forward(lon, lat),
        }
    }
}

fn check_geodetic_range(lon: f64, lat: f64) -> Result<(), String> {
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {} outside [-180, 180]", lon));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {} outside [-90, 90]", lat));
    }
    Ok(())
}

/// Wrap an angle in radians to [-pi, pi]
fn wrap_pi(angle: f64) -> f64 {
    let wrapped = (angle + std::f64::consts::PI).rem_euclid(std::f64::consts::TAU) - std::f64::consts::PI;
    if wrapped == -std::f64::consts::PI && angle > 0.0 { std::f64::consts::PI } else { wrapped }
}

/// Ellipsoidal transverse Mercator projection
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    k_0: f64,
    lon_0: f64,
    x_0: f64,
    y_0: f64,
    /// Eccentricity
    e: f64,
    /// Rectifying radius
    radius: f64,
    /// Scaled northing of the latitude of origin
    xi_0: f64,
    alpha: [f64; 6],
    beta: [f64; 6],
    delta: [f64; 6],
}

impl TransverseMercator {
    pub fn new(ellipsoid: Ellipsoid, params: TransverseMercatorParams) -> Self {
        let f = ellipsoid.flattening();
        let n = f / (2.0 - f);
        let (n2, n3) = (n * n, n * n * n);
        let (n4, n5, n6) = (n3 * n, n3 * n2, n3 * n3);

        let radius = ellipsoid.semi_major_axis / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);

        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0 + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0 - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0 + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];

        let beta = [
            n / 2.0 - 2.0 * n2 / 3.0 + 37.0 * n3 / 96.0 - n4 / 360.0 - 81.0 * n5 / 512.0 + 96199.0 * n6 / 604800.0,
            n2 / 48.0 + n3 / 15.0 - 437.0 * n4 / 1440.0 + 46.0 * n5 / 105.0 - 1118711.0 * n6 / 3870720.0,
            17.0 * n3 / 480.0 - 37.0 * n4 / 840.0 - 209.0 * n5 / 4480.0 + 5569.0 * n6 / 90720.0,
            4397.0 * n4 / 161280.0 - 11.0 * n5 / 504.0 - 830251.0 * n6 / 7257600.0,
            4583.0 * n5 / 161280.0 - 108847.0 * n6 / 3991680.0,
            20648693.0 * n6 / 638668800.0,
        ];

        // Conformal latitude to geodetic latitude
        let delta = [
            2.0 * n - 2.0 * n2 / 3.0 - 2.0 * n3 + 116.0 * n4 / 45.0 + 26.0 * n5 / 45.0 - 2854.0 * n6 / 675.0,
            7.0 * n2 / 3.0 - 8.0 * n3 / 5.0 - 227.0 * n4 / 45.0 + 2704.0 * n5 / 315.0 + 2323.0 * n6 / 945.0,
            56.0 * n3 / 15.0 - 136.0 * n4 / 35.0 - 1262.0 * n5 / 105.0 + 73814.0 * n6 / 2835.0,
            4279.0 * n4 / 630.0 - 332.0 * n5 / 35.0 - 399572.0 * n6 / 14175.0,
            4174.0 * n5 / 315.0 - 144838.0 * n6 / 6237.0,
            601676.0 * n6 / 22275.0,
        ];

        let mut tm = TransverseMercator {
            k_0: params.k_0,
            lon_0: params.lon_0.to_radians(),
            x_0: params.x_0,
            y_0: params.y_0,
            e: (f * (2.0 - f)).sqrt(),
            radius,
            xi_0: 0.0,
            alpha,
            beta,
            delta,
        };

        // On the central meridian eta' = 0, so xi' is the conformal latitude
        let chi_0 = tm.conformal_tangent(params.lat_0.to_radians()).atan();
        tm.xi_0 = chi_0 + tm.alpha.iter().enumerate()
            .map(|(j, a)| a * (2.0 * (j + 1) as f64 * chi_0).sin())
            .sum::<f64>();

        tm
    }

    /// Tangent of the conformal latitude
    fn conformal_tangent(&self, phi: f64) -> f64 {
        let s = phi.sin();
        (s.atanh() - self.e * (self.e * s).atanh()).sinh()
    }

    /// Longitude/latitude in degrees to easting/northing in meters
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), String> {
        if lat.abs() >= 90.0 {
            return Err("poles are outside the transverse Mercator domain".to_string());
        }

        let phi = lat.to_radians();
        let lam = wrap_pi(lon.to_radians() - self.lon_0);
        if lam.abs() >= FRAC_PI_2 {
            return Err(format!(
                "more than 90 degrees from the central meridian {}",
                self.lon_0.to_degrees()
            ));
        }

        let t = self.conformal_tangent(phi);
        let xi_p = t.atan2(lam.cos());
        let eta_p = (lam.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        let x = self.x_0 + self.k_0 * self.radius * eta;
        let y = self.y_0 + self.k_0 * self.radius * (xi - self.xi_0);

        if x.is_finite() && y.is_finite() {
            Ok((x, y))
        } else {
            Err("projection produced a non-finite value".to_string())
        }
    }

    /// Easting/northing in meters to longitude/latitude in degrees
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), String> {
        let xi = (y - self.y_0) / (self.k_0 * self.radius) + self.xi_0;
        let eta = (x - self.x_0) / (self.k_0 * self.radius);

        if xi.abs() > FRAC_PI_2 {
            return Err("northing lies beyond the pole".to_string());
        }

        let mut xi_p = xi;
        let mut eta_p = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi_p -= b * (k * xi).sin() * (k * eta).cosh();
            eta_p -= b * (k * xi).cos() * (k * eta).sinh();
        }

        let chi = (xi_p.sin() / eta_p.cosh()).asin();
        let lam = eta_p.sinh().atan2(xi_p.cos());
        if !lam.is_finite() || lam.abs() >= FRAC_PI_2 {
            return Err("easting lies outside the projection domain".to_string());
        }

        let phi = chi + self.delta.iter().enumerate()
            .map(|(j, d)| d * (2.0 * (j + 1) as f64 * chi).sin())
            .sum::<f64>();

        let lon = wrap_pi(self.lon_0 + lam).to_degrees();
        let lat = phi.to_degrees();

        if lon.is_finite() && lat.is_finite() {
            Ok((lon, lat))
        } else {
            Err("inverse projection produced a non-finite value".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bogota_zone() -> TransverseMercator {
        TransverseMercator::new(Ellipsoid::GRS80, TransverseMercatorParams {
            lat_0: 4.596200416666666,
            lon_0: -74.07750791666666,
            k_0: 1.0,
            x_0: 1000000.0,
            y_0: 1000000.0,
        })
    }

    #[test]
    fn test_origin_maps_to_false_origin() {
        let tm = bogota_zone();
        let (x, y) = tm.forward(-74.07750791666666, 4.596200416666666).unwrap();
        assert!((x - 1000000.0).abs() < 1e-6);
        assert!((y - 1000000.0).abs() < 1e-6);
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let tm = bogota_zone();
        for &(lon, lat) in &[(-74.08, 4.60), (-76.5, 3.4), (-72.0, 11.0), (-70.1, -4.2)] {
            let (x, y) = tm.forward(lon, lat).unwrap();
            let (lon2, lat2) = tm.inverse(x, y).unwrap();
            assert!((lon - lon2).abs() < 1e-9, "lon {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-9, "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_meridian_arc_length() {
        // One degree of latitude near the equator is about 110.6 km on GRS80
        let tm = TransverseMercator::new(Ellipsoid::GRS80, TransverseMercatorParams {
            lat_0: 0.0, lon_0: 0.0, k_0: 1.0, x_0: 0.0, y_0: 0.0,
        });
        let (x, y) = tm.forward(0.0, 1.0).unwrap();
        assert!(x.abs() < 1e-9);
        assert!((y - 110574.39).abs() < 0.5, "y = {}", y);
    }

    #[test]
    fn test_forward_rejects_far_longitudes() {
        let tm = bogota_zone();
        assert!(tm.forward(30.0, 4.0).is_err());
        assert!(tm.forward(-74.0, 90.0).is_err());
    }

    #[test]
    fn test_geodetic_range_checked() {
        let projector = Projector::LongLat;
        assert!(projector.to_geodetic(-74.0, 4.6).is_ok());
        assert!(projector.to_geodetic(-200.0, 4.6).is_err());
        assert!(projector.from_geodetic(-74.0, 95.0).is_err());
    }
}
