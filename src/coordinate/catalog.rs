//! EPSG definition catalog
//!
//! The curated reference systems are described in `epsg_definitions.toml`,
//! compiled into the binary and parsed once on first use.

use std::collections::HashMap;
use lazy_static::lazy_static;
use log::{debug, error};

use super::crs::SpatialReference;
use crate::errors::{CoordError, CoordResult};

lazy_static! {
    // Parse the embedded TOML file on first access
    static ref EPSG_CATALOG: ReferenceCatalog = {
        let content = include_str!("../../epsg_definitions.toml");
        ReferenceCatalog::from_str(content).unwrap_or_else(|e| {
            error!("Failed to parse EPSG definitions: {}", e);
            ReferenceCatalog::default()
        })
    };
}

/// Reference ellipsoid parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Name used in WKT output
    pub name: &'static str,
    /// Semi-major axis in meters
    pub semi_major_axis: f64,
    /// Inverse flattening
    pub inverse_flattening: f64,
}

impl Ellipsoid {
    pub const GRS80: Ellipsoid = Ellipsoid {
        name: "GRS_1980",
        semi_major_axis: 6378137.0,
        inverse_flattening: 298.257222101,
    };

    pub const WGS84: Ellipsoid = Ellipsoid {
        name: "WGS_1984",
        semi_major_axis: 6378137.0,
        inverse_flattening: 298.257223563,
    };

    /// Flattening
    pub fn flattening(&self) -> f64 {
        1.0 / self.inverse_flattening
    }

    fn from_proj_name(name: &str) -> CoordResult<Self> {
        match name.to_uppercase().as_str() {
            "GRS80" => Ok(Ellipsoid::GRS80),
            "WGS84" => Ok(Ellipsoid::WGS84),
            other => Err(CoordError::GenericError(format!("Unknown ellipsoid: {}", other))),
        }
    }
}

/// Parameters of a transverse Mercator projection, angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercatorParams {
    pub lat_0: f64,
    pub lon_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

/// Projection method of a definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionKind {
    /// Longitude/latitude in degrees
    LongLat,
    /// Transverse Mercator in meters
    TransverseMercator(TransverseMercatorParams),
}

/// A parsed catalog entry
#[derive(Debug, Clone)]
pub struct ReferenceDefinition {
    pub code: u32,
    pub name: String,
    pub proj: String,
    pub kind: ProjectionKind,
    pub ellipsoid: Ellipsoid,
}

impl ReferenceDefinition {
    /// Parse a PROJ-style definition string
    ///
    /// Only `+proj=longlat` and `+proj=tmerc` are accepted; linear units
    /// other than meters are rejected.
    pub fn parse(code: u32, name: &str, proj: &str) -> CoordResult<Self> {
        let mut params: HashMap<String, String> = HashMap::new();
        for token in proj.split_whitespace() {
            let token = token.trim_start_matches('+');
            match token.split_once('=') {
                Some((key, value)) => params.insert(key.to_string(), value.to_string()),
                None => params.insert(token.to_string(), String::new()),
            };
        }

        let ellipsoid = match (params.get("ellps"), params.get("datum")) {
            (Some(ellps), _) => Ellipsoid::from_proj_name(ellps)?,
            (None, Some(datum)) => Ellipsoid::from_proj_name(datum)?,
            (None, None) => Ellipsoid::WGS84,
        };

        if let Some(units) = params.get("units") {
            if units != "m" {
                return Err(CoordError::GenericError(format!(
                    "EPSG:{} uses unsupported units '{}'", code, units)));
            }
        }

        let number = |key: &str, default: f64| -> CoordResult<f64> {
            match params.get(key) {
                Some(value) => value.parse::<f64>().map_err(|_| CoordError::GenericError(
                    format!("EPSG:{} has an invalid value for {}: {}", code, key, value))),
                None => Ok(default),
            }
        };

        let kind = match params.get("proj").map(String::as_str) {
            Some("longlat") | Some("latlong") => ProjectionKind::LongLat,
            Some("tmerc") => {
                let k_0 = match params.get("k_0") {
                    Some(_) => number("k_0", 1.0)?,
                    None => number("k", 1.0)?,
                };
                ProjectionKind::TransverseMercator(TransverseMercatorParams {
                    lat_0: number("lat_0", 0.0)?,
                    lon_0: number("lon_0", 0.0)?,
                    k_0,
                    x_0: number("x_0", 0.0)?,
                    y_0: number("y_0", 0.0)?,
                })
            },
            Some(other) => return Err(CoordError::GenericError(format!(
                "EPSG:{} uses unsupported projection '{}'", code, other))),
            None => return Err(CoordError::GenericError(format!(
                "EPSG:{} definition has no +proj parameter", code))),
        };

        Ok(ReferenceDefinition {
            code,
            name: name.to_string(),
            proj: proj.to_string(),
            kind,
            ellipsoid,
        })
    }

    /// ESRI-flavoured WKT, as written to `.prj` sidecar files
    pub fn to_wkt(&self) -> String {
        let datum = if self.ellipsoid == Ellipsoid::GRS80 { "MAGNA" } else { "WGS_1984" };
        let geogcs = format!(
            "GEOGCS[\"GCS_{}\",DATUM[\"D_{}\",SPHEROID[\"{}\",{:?},{:?}]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]]",
            datum, datum, self.ellipsoid.name,
            self.ellipsoid.semi_major_axis, self.ellipsoid.inverse_flattening
        );

        match self.kind {
            ProjectionKind::LongLat => geogcs,
            ProjectionKind::TransverseMercator(p) => format!(
                "PROJCS[\"{}\",{},PROJECTION[\"Transverse_Mercator\"],PARAMETER[\"False_Easting\",{:?}],PARAMETER[\"False_Northing\",{:?}],PARAMETER[\"Central_Meridian\",{:?}],PARAMETER[\"Scale_Factor\",{:?}],PARAMETER[\"Latitude_Of_Origin\",{:?}],UNIT[\"Meter\",1.0]]",
                self.name.replace(" / ", "_").replace(' ', "_"),
                geogcs, p.x_0, p.y_0, p.lon_0, p.k_0, p.lat_0
            ),
        }
    }
}

/// Container for the known EPSG definitions
#[derive(Debug, Default)]
pub struct ReferenceCatalog {
    definitions: HashMap<u32, ReferenceDefinition>,
}

impl ReferenceCatalog {
    /// Parse definitions from a TOML string
    pub fn from_str(content: &str) -> CoordResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| CoordError::GenericError(format!("Failed to parse TOML: {}", e)))?;

        let mut catalog = ReferenceCatalog::default();

        if let Some(table) = toml_value.get("definitions").and_then(|v| v.as_table()) {
            for (key, entry) in table {
                let code = key.parse::<u32>()
                    .map_err(|_| CoordError::GenericError(format!("Invalid EPSG code in catalog: {}", key)))?;
                let proj = entry.get("proj").and_then(|v| v.as_str())
                    .ok_or_else(|| CoordError::GenericError(format!("EPSG:{} has no proj string", code)))?;
                let name = entry.get("name").and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("EPSG:{}", code));

                let definition = ReferenceDefinition::parse(code, &name, proj)?;
                debug!("Loaded definition for EPSG:{} ({})", code, definition.name);
                catalog.definitions.insert(code, definition);
            }
        }

        Ok(catalog)
    }

    /// Look up a definition by EPSG code
    pub fn get(&self, code: u32) -> Option<&ReferenceDefinition> {
        self.definitions.get(&code)
    }

    /// Number of known definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Definition of a reference from the embedded catalog
pub fn lookup(reference: SpatialReference) -> CoordResult<&'static ReferenceDefinition> {
    let code = reference.epsg_code();
    EPSG_CATALOG.get(code).ok_or(CoordError::UnsupportedReference(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::crs::ALLOWED_EPSG_CODES;

    #[test]
    fn test_embedded_catalog_covers_allowed_codes() {
        for code in ALLOWED_EPSG_CODES {
            let reference = crate::coordinate::SpatialReferenceFactory::from_epsg(code);
            let definition = lookup(reference).unwrap();
            assert_eq!(definition.code, code);
        }
        assert!(matches!(lookup(SpatialReference::Other(3857)), Err(CoordError::UnsupportedReference(3857))));
    }

    #[test]
    fn test_parse_tmerc_definition() {
        let def = ReferenceDefinition::parse(
            9377,
            "MAGNA-SIRGAS / Origen-Nacional",
            "+proj=tmerc +lat_0=4 +lon_0=-73 +k=0.9992 +x_0=5000000 +y_0=2000000 +ellps=GRS80 +units=m +no_defs",
        ).unwrap();

        assert_eq!(def.ellipsoid, Ellipsoid::GRS80);
        match def.kind {
            ProjectionKind::TransverseMercator(p) => {
                assert_eq!(p.lat_0, 4.0);
                assert_eq!(p.lon_0, -73.0);
                assert_eq!(p.k_0, 0.9992);
                assert_eq!(p.x_0, 5000000.0);
                assert_eq!(p.y_0, 2000000.0);
            },
            other => panic!("unexpected projection {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_projection() {
        assert!(ReferenceDefinition::parse(3857, "Web Mercator", "+proj=merc +ellps=WGS84").is_err());
        assert!(ReferenceDefinition::parse(1, "Feet", "+proj=tmerc +units=us-ft").is_err());
    }

    #[test]
    fn test_wkt_for_export_target() {
        let wkt = lookup(SpatialReference::OrigenNacional).unwrap().to_wkt();
        assert!(wkt.starts_with("PROJCS[\"MAGNA-SIRGAS_Origen-Nacional\""));
        assert!(wkt.contains("SPHEROID[\"GRS_1980\",6378137.0,298.257222101]"));
        assert!(wkt.contains("PARAMETER[\"False_Easting\",5000000.0]"));
        assert!(wkt.contains("PARAMETER[\"Scale_Factor\",0.9992]"));

        let geographic = lookup(SpatialReference::Wgs84).unwrap().to_wkt();
        assert!(geographic.starts_with("GEOGCS[\"GCS_WGS_1984\""));
    }
}
