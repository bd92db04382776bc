//! Standalone Leaflet page for viewing coordinates on a map

use log::{debug, info};

use crate::coordinate::{Point, ProjectionEngine, SpatialReference};
use crate::dataset::{MapMarker, MapView};
use crate::errors::CoordResult;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const OSM_TILES: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const ESRI_TILES: &str = "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ZOOM: u8 = 14;

/// Express a map view in WGS84 degrees
///
/// Views built from projected coordinates are converted marker by marker;
/// geographic views are returned unchanged.
pub fn geographic_view(view: &MapView, engine: &ProjectionEngine) -> CoordResult<MapView> {
    if view.reference.is_geographic() {
        return Ok(view.clone());
    }

    debug!("Converting {} map markers from {} to WGS84", view.markers.len(), view.reference);
    let xs: Vec<f64> = view.markers.iter().map(|m| m.lon).collect();
    let ys: Vec<f64> = view.markers.iter().map(|m| m.lat).collect();
    let (lons, lats) = engine.transform(&xs, &ys, view.reference, SpatialReference::Wgs84)?;
    let center = engine.transform_point(
        &Point::new(view.center.lon, view.center.lat),
        view.reference,
        SpatialReference::Wgs84,
    )?;

    Ok(MapView {
        markers: lats.into_iter().zip(lons).map(|(lat, lon)| MapMarker { lat, lon }).collect(),
        center: MapMarker { lat: center.y, lon: center.x },
        reference: SpatialReference::Wgs84,
    })
}

/// Render a map view as an HTML document
///
/// The page has an OpenStreetMap base layer, an Esri satellite layer, a
/// layer switcher and one marker per point.
pub fn render_html(view: &MapView, title: &str) -> String {
    let markers = view.markers.iter()
        .map(|m| format!("[{:.7}, {:.7}]", m.lat, m.lon))
        .collect::<Vec<_>>()
        .join(",\n      ");

    info!("Rendering map with {} markers centered at ({:.7}, {:.7})",
          view.markers.len(), view.center.lat, view.center.lon);

    format!(r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="{css}">
  <script src="{js}"></script>
  <style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map('map').setView([{lat:.7}, {lon:.7}], {zoom});
    var base = L.tileLayer('{osm}', {{ attribution: '&copy; OpenStreetMap contributors' }}).addTo(map);
    var satellite = L.tileLayer('{esri}', {{ attribution: 'ESRI' }});
    var markers = [
      {markers}
    ];
    markers.forEach(function (p) {{ L.marker(p).addTo(map); }});
    L.control.layers({{ 'Mapa base': base, 'Satélite': satellite }}).addTo(map);
  </script>
</body>
</html>
"#,
        title = escape_html(title),
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
        lat = view.center.lat,
        lon = view.center.lon,
        zoom = ZOOM,
        osm = OSM_TILES,
        esri = ESRI_TILES,
        markers = markers,
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(reference: SpatialReference, markers: Vec<MapMarker>, center: MapMarker) -> MapView {
        MapView { markers, center, reference }
    }

    #[test]
    fn test_render_contains_markers_and_layers() {
        let v = view(
            SpatialReference::Wgs84,
            vec![MapMarker { lat: 4.6, lon: -74.08 }],
            MapMarker { lat: 4.6, lon: -74.08 },
        );
        let html = render_html(&v, "Origen <EPSG:4326>");
        assert!(html.contains("[4.6000000, -74.0800000]"));
        assert!(html.contains("setView([4.6000000, -74.0800000], 14)"));
        assert!(html.contains("World_Imagery"));
        assert!(html.contains("L.control.layers"));
        assert!(html.contains("Origen &lt;EPSG:4326&gt;"));
    }

    #[test]
    fn test_geographic_view_converts_projected_markers() {
        let engine = ProjectionEngine::new();
        // False origin of the Bogota zone
        let origin = MapMarker { lat: 1_000_000.0, lon: 1_000_000.0 };
        let v = view(SpatialReference::ColombiaBogota, vec![origin], origin);

        let converted = geographic_view(&v, &engine).unwrap();
        assert_eq!(converted.reference, SpatialReference::Wgs84);
        assert!((converted.markers[0].lat - 4.596200416666666).abs() < 1e-9);
        assert!((converted.markers[0].lon + 74.07750791666666).abs() < 1e-9);
        assert!((converted.center.lat - converted.markers[0].lat).abs() < 1e-12);
    }

    #[test]
    fn test_geographic_view_keeps_geographic_input() {
        let engine = ProjectionEngine::new();
        let v = view(SpatialReference::Wgs84, vec![], MapMarker { lat: 1.0, lon: 2.0 });
        assert_eq!(geographic_view(&v, &engine).unwrap(), v);
    }
}
