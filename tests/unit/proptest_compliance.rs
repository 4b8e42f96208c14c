//! Property-based tests for distance and scoring
//!
//! Uses proptest to verify properties that should hold for all inputs.

use herbtrace::core::models::{Event, GeoPoint, default_zones, haversine_distance};
use herbtrace::core::services::{check_compliance, parse_scanned, verification_url};
use proptest::prelude::*;

use crate::common::{collection, quality_test};

fn point() -> impl Strategy<Value = (f64, f64)> {
    (-90.0f64..=90.0, -180.0f64..=180.0)
}

proptest! {
    /// A point is at distance zero from itself
    #[test]
    fn distance_to_self_is_zero((lat, lng) in point()) {
        let p = GeoPoint::new(lat, lng);
        prop_assert!(haversine_distance(p, p).abs() < 1e-6);
    }

    /// Distance does not depend on argument order
    #[test]
    fn distance_is_symmetric(a in point(), b in point()) {
        let a = GeoPoint::new(a.0, a.1);
        let b = GeoPoint::new(b.0, b.1);
        prop_assert!((haversine_distance(a, b) - haversine_distance(b, a)).abs() < 1e-6);
    }

    /// No two points are farther apart than half the circumference
    #[test]
    fn distance_is_bounded(a in point(), b in point()) {
        let d = haversine_distance(GeoPoint::new(a.0, a.1), GeoPoint::new(b.0, b.1));
        prop_assert!(d >= 0.0);
        prop_assert!(d <= std::f64::consts::PI * 6_371_000.0 + 1.0);
    }

    /// Score stays in range for any mix of harvest locations
    #[test]
    fn score_in_range(
        harvests in prop::collection::vec(point(), 0..8),
        tested in any::<bool>(),
    ) {
        let mut events: Vec<Event> = harvests
            .iter()
            .enumerate()
            .map(|(i, p)| collection(&format!("c{i}"), *p))
            .collect();
        if tested {
            events.push(quality_test("q", true));
        }
        let v = check_compliance(&events, &default_zones());
        prop_assert!(v.compliance_score <= 100);
        prop_assert_eq!(v.valid, v.violations.is_empty());
    }

    /// Adding a harvest never raises the score once a harvest exists
    #[test]
    fn score_never_increases_with_more_harvests(
        first in point(),
        extra in point(),
    ) {
        let zones = default_zones();
        let base = vec![collection("c0", first), quality_test("q", true)];
        let mut more = base.clone();
        more.push(collection("c1", extra));

        let before = check_compliance(&base, &zones).compliance_score;
        let after = check_compliance(&more, &zones).compliance_score;
        prop_assert!(after <= before);
    }

    /// QR payloads resolve back to the batch ID
    #[test]
    fn qr_payload_round_trips(id in "ASH-[0-9]{13}-[0-9a-z]{9}") {
        let url = verification_url("https://ayur-trace.com", &id);
        prop_assert_eq!(parse_scanned(&url).unwrap(), id);
    }
}
