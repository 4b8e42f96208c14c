//! Provenance timeline and harvest map points

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::compliance::nearest_zone;
use crate::core::models::{ApprovedZone, Event, EventKind, GeoPoint};

/// Map center used when a batch has no harvest points
pub const DEFAULT_MAP_CENTER: GeoPoint = GeoPoint::new(15.3173, 75.7139);

/// One row of a provenance timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// Event ID
    pub event_id: String,
    /// Event kind
    pub kind: EventKind,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// One-line summary
    pub title: String,
    /// Detail lines
    pub details: Vec<String>,
}

/// Build a chronological timeline; ties keep append order
#[must_use]
pub fn build_timeline(events: &[Event]) -> Vec<TimelineEntry> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp());
    sorted.into_iter().map(entry_for).collect()
}

fn entry_for(event: &Event) -> TimelineEntry {
    let (title, details) = match event {
        Event::Collection(e) => (
            format!("Harvested by {}", e.collector_name),
            vec![
                format!("Location: {}", e.location_name),
                format!("GPS: {}", e.gps_location),
                format!("Quality: {}", e.quality_metrics.appearance),
                format!("Moisture: {}%", e.quality_metrics.moisture),
            ],
        ),
        Event::Processing(e) => {
            let mut details = vec![format!("Process: {}", e.step_type)];
            if let Some(t) = e.temperature {
                details.push(format!("Temperature: {t}°C"));
            }
            details.push(format!("Duration: {} hours", e.duration));
            if !e.notes.is_empty() {
                details.push(format!("Notes: {}", e.notes));
            }
            (format!("{} by {}", e.step_type, e.processor_name), details)
        },
        Event::QualityTest(e) => {
            let verdict = if e.results.passed { "PASSED" } else { "FAILED" };
            let mut details = vec![
                format!("Result: {verdict}"),
                format!("Value: {}{}", e.results.value, e.results.unit),
                format!("Standard: {}", e.results.standard),
            ];
            if let Some(cert) = &e.certificate_url {
                details.push(format!("Certificate: {cert}"));
            }
            (format!("{} test by {}", e.test_type, e.lab_name), details)
        },
        Event::Transfer(e) => (
            format!("Transfer: {} → {}", e.from_entity, e.to_entity),
            vec![
                format!("Quantity: {} {}", e.quantity, e.unit),
                format!("Receiver: {}", e.entity_type),
            ],
        ),
    };

    TimelineEntry {
        event_id: event.id().to_string(),
        kind: event.kind(),
        timestamp: event.timestamp(),
        title,
        details,
    }
}

/// A harvest location to plot on a map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    /// Collection event ID
    pub event_id: String,
    /// GPS point
    pub point: GeoPoint,
    /// Species harvested
    pub species: String,
    /// Place name
    pub location_name: String,
    /// Collector display name
    pub collector_name: String,
    /// Harvest time
    pub timestamp: DateTime<Utc>,
    /// Closest approved zone, if any are configured
    pub nearest_zone: Option<String>,
    /// Distance to that zone's center in meters
    pub zone_distance_m: Option<f64>,
    /// Whether the point lies inside any approved zone
    pub inside_zone: bool,
}

/// Harvest points with a suggested center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// Mean of all points, or the default center
    pub center: GeoPoint,
    /// Harvest points in append order
    pub points: Vec<MapPoint>,
}

/// Collect harvest points for display on a map, each tagged with its nearest zone
#[must_use]
pub fn map_view(events: &[Event], zones: &[ApprovedZone]) -> MapView {
    let points: Vec<MapPoint> = events
        .iter()
        .filter_map(|event| match event {
            Event::Collection(e) => {
                let nearest = nearest_zone(e.gps_location, zones);
                Some(MapPoint {
                    event_id: e.id.clone(),
                    point: e.gps_location,
                    species: e.species.clone(),
                    location_name: e.location_name.clone(),
                    collector_name: e.collector_name.clone(),
                    timestamp: e.timestamp,
                    nearest_zone: nearest.map(|(zone, _)| zone.name.clone()),
                    zone_distance_m: nearest.map(|(_, distance)| distance),
                    inside_zone: nearest.is_some_and(|(zone, distance)| distance <= zone.radius),
                })
            },
            _ => None,
        })
        .collect();

    let center = if points.is_empty() {
        DEFAULT_MAP_CENTER
    } else {
        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let lat = points.iter().map(|p| p.point.latitude).sum::<f64>() / n;
        let lng = points.iter().map(|p| p.point.longitude).sum::<f64>() / n;
        GeoPoint::new(lat, lng)
    };

    MapView { center, points }
}
