//! Spatial reference system identifiers

use std::fmt;
use crate::errors::{CoordError, CoordResult};

/// EPSG codes offered for origin and destination selection
pub const ALLOWED_EPSG_CODES: [u32; 5] = [4326, 3116, 3115, 9377, 4996];

/// EPSG code every export ends in
pub const EXPORT_EPSG_CODE: u32 = 9377;

/// Identifier for the curated coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpatialReference {
    /// WGS 84 (EPSG:4326)
    Wgs84,
    /// Geographic system EPSG:4996
    Geographic4996,
    /// MAGNA-SIRGAS / Colombia West zone (EPSG:3115)
    ColombiaWest,
    /// MAGNA-SIRGAS / Colombia Bogota zone (EPSG:3116)
    ColombiaBogota,
    /// MAGNA-SIRGAS / Origen-Nacional (EPSG:9377)
    OrigenNacional,
    /// Any other EPSG code; carries no definition
    Other(u32),
}

impl SpatialReference {
    /// Get the EPSG code for this reference system
    pub fn epsg_code(&self) -> u32 {
        match self {
            SpatialReference::Wgs84 => 4326,
            SpatialReference::Geographic4996 => 4996,
            SpatialReference::ColombiaWest => 3115,
            SpatialReference::ColombiaBogota => 3116,
            SpatialReference::OrigenNacional => 9377,
            SpatialReference::Other(code) => *code,
        }
    }

    /// Whether coordinates are angular (degrees) rather than linear
    pub fn is_geographic(&self) -> bool {
        matches!(self, SpatialReference::Wgs84 | SpatialReference::Geographic4996)
    }

    /// The fixed export target
    pub fn export_target() -> Self {
        SpatialReference::OrigenNacional
    }

    /// References selectable as origin or destination, in menu order
    pub fn allowed() -> Vec<SpatialReference> {
        ALLOWED_EPSG_CODES.iter().map(|&code| SpatialReferenceFactory::from_epsg(code)).collect()
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code())
    }
}

/// Factory for creating spatial references
pub struct SpatialReferenceFactory;

impl SpatialReferenceFactory {
    /// Create a reference from an EPSG code
    pub fn from_epsg(epsg: u32) -> SpatialReference {
        match epsg {
            4326 => SpatialReference::Wgs84,
            4996 => SpatialReference::Geographic4996,
            3115 => SpatialReference::ColombiaWest,
            3116 => SpatialReference::ColombiaBogota,
            9377 => SpatialReference::OrigenNacional,
            _ => SpatialReference::Other(epsg),
        }
    }

    /// Parse a reference from a string (e.g. "EPSG:4326" or "4326")
    pub fn from_string(crs_str: &str) -> CoordResult<SpatialReference> {
        let crs_str = crs_str.trim().to_uppercase();
        let code_str = crs_str.strip_prefix("EPSG:").unwrap_or(crs_str.as_str());

        code_str.trim().parse::<u32>()
            .map(Self::from_epsg)
            .map_err(|_| CoordError::GenericError(format!("Invalid EPSG code: {}", crs_str)))
    }

    /// Parse a reference and require it to be one of the selectable codes
    pub fn from_allowed_string(crs_str: &str) -> CoordResult<SpatialReference> {
        let reference = Self::from_string(crs_str)?;
        if ALLOWED_EPSG_CODES.contains(&reference.epsg_code()) {
            Ok(reference)
        } else {
            Err(CoordError::UnsupportedReference(reference.epsg_code()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(SpatialReference::Wgs84.is_geographic());
        assert!(SpatialReference::Geographic4996.is_geographic());
        assert!(!SpatialReference::ColombiaBogota.is_geographic());
        assert!(!SpatialReference::ColombiaWest.is_geographic());
        assert!(!SpatialReference::OrigenNacional.is_geographic());
    }

    #[test]
    fn test_from_string() {
        assert_eq!(SpatialReferenceFactory::from_string("epsg:3116").unwrap(), SpatialReference::ColombiaBogota);
        assert_eq!(SpatialReferenceFactory::from_string(" 9377 ").unwrap(), SpatialReference::OrigenNacional);
        assert_eq!(SpatialReferenceFactory::from_string("3857").unwrap(), SpatialReference::Other(3857));
        assert!(SpatialReferenceFactory::from_string("mercator").is_err());
    }

    #[test]
    fn test_allowed_codes_round_trip() {
        let codes: Vec<u32> = SpatialReference::allowed().iter().map(|r| r.epsg_code()).collect();
        assert_eq!(codes, ALLOWED_EPSG_CODES.to_vec());
        assert_eq!(SpatialReference::export_target().epsg_code(), EXPORT_EPSG_CODE);
        assert!(matches!(
            SpatialReferenceFactory::from_allowed_string("3857"),
            Err(CoordError::UnsupportedReference(3857))
        ));
    }
}
