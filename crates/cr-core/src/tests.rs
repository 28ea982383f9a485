//! Unit tests for cr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_breaks_ties_by_value() {
        assert!(NodeId(0) < NodeId(1));
        let mut ids = vec![NodeId(9), NodeId(3), NodeId(5)];
        ids.sort();
        assert_eq!(ids, vec![NodeId(3), NodeId(5), NodeId(9)]);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
        assert_eq!(EdgeId(0).to_string(), "EdgeId(0)");
    }

    #[test]
    fn oversized_index_is_rejected() {
        assert!(NodeId::try_from(u32::MAX as usize + 1).is_err());
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(-17.38955, -66.17980);
        assert!(p.distance_m(p) < 1e-6);
        assert_eq!(p.planar_distance_2(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(-17.0, -66.0);
        let b = GeoPoint::new(-18.0, -66.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn finiteness() {
        assert!(GeoPoint::new(0.0, 0.0).is_finite());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn display_six_decimals() {
        assert_eq!(GeoPoint::new(-17.5, -66.25).to_string(), "(-17.500000, -66.250000)");
    }
}
