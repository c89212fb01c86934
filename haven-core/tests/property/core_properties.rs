use haven_core::models::*;
use proptest::prelude::*;

// ── Filter never admits a listing above its price bound ───────────────────

proptest! {
    #[test]
    fn filter_never_admits_over_price_max(
        cap in 1_000.0f64..5_000_000.0,
        price in 1_000.0f64..10_000_000.0,
    ) {
        let filter = RetrievalFilter {
            price_max: Some(cap),
            ..RetrievalFilter::unbounded(RelaxationLevel::Significant)
        };
        let listing = Candidate { price: Some(price), ..Default::default() };
        if filter.admits(&listing) {
            prop_assert!(price <= cap);
        }
    }

    #[test]
    fn haversine_is_symmetric_and_non_negative(
        lat1 in -80.0f64..80.0, lon1 in -179.0f64..179.0,
        lat2 in -80.0f64..80.0, lon2 in -179.0f64..179.0,
    ) {
        let a = GeoPoint::new(lat1, lon1);
        let b = GeoPoint::new(lat2, lon2);
        let ab = a.haversine_km(&b);
        let ba = b.haversine_km(&a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn scalar_kinds_hold_one_value(values in proptest::collection::vec(1u32..6, 1..6)) {
        let mut intent = SearchIntent::empty("q");
        for v in &values {
            intent.add_hard(HardConstraint::MinBaths(*v));
        }
        prop_assert_eq!(intent.hard_constraints.len(), 1);
        prop_assert_eq!(intent.min_baths(), Some(values[0]));
    }
}
