//! Unit tests for vh-handover.

use vh_core::{Heading, Point2, StationId, VehicleId};

use crate::{StationSpec, StationStore, VehicleView, DEFAULT_DISTANCE_THRESHOLD};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: StationId = StationId(0);
const B: StationId = StationId(1);

/// Two stations 60 m apart on the x axis, range 40, wired to each other.
fn pair(capacity_b: usize) -> StationStore {
    let specs = [
        StationSpec::new(Point2::new(50.0, 50.0), 40.0, 10),
        StationSpec::new(Point2::new(110.0, 50.0), 40.0, capacity_b),
    ];
    let mut stations = StationStore::from_specs(&specs, DEFAULT_DISTANCE_THRESHOLD).unwrap();
    stations.wire_neighbors(vec![vec![B], vec![A]]).unwrap();
    stations
}

fn view(x: f64, y: f64, heading: f64) -> VehicleView {
    VehicleView {
        id:              VehicleId(0),
        position:        Point2::new(x, y),
        heading:         Heading(heading),
        failed_attempts: 0,
    }
}

// ── StationStore ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::HandoverError;

    #[test]
    fn ids_follow_spec_order() {
        let stations = pair(10);
        assert_eq!(stations.len(), 2);
        assert_eq!(stations.get(B).unwrap().position, Point2::new(110.0, 50.0));
        assert_eq!(stations.get(A).unwrap().distance_threshold, 0.7);
    }

    #[test]
    fn per_station_threshold_overrides_default() {
        let specs = [StationSpec::new(Point2::new(0.0, 0.0), 10.0, 1).with_threshold(0.5)];
        let stations = StationStore::from_specs(&specs, 0.9).unwrap();
        assert_eq!(stations.get(A).unwrap().exit_radius(), 5.0);
    }

    #[test]
    fn invalid_specs_rejected() {
        let zero_range = [StationSpec::new(Point2::new(0.0, 0.0), 0.0, 1)];
        assert!(matches!(StationStore::from_specs(&zero_range, 0.7), Err(HandoverError::Config(_))));
        let bad_threshold = [StationSpec::new(Point2::new(0.0, 0.0), 5.0, 1).with_threshold(-1.0)];
        assert!(StationStore::from_specs(&bad_threshold, 0.7).is_err());
    }

    #[test]
    fn wiring_drops_self_and_repeats() {
        let mut stations = pair(10);
        stations.wire_neighbors(vec![vec![A, B, B], vec![A]]).unwrap();
        assert_eq!(stations.get(A).unwrap().neighbors, [B]);
        assert!(matches!(
            stations.wire_neighbors(vec![vec![StationId(5)], vec![]]),
            Err(HandoverError::UnknownStation(StationId(5)))
        ));
        assert!(stations.wire_neighbors(vec![vec![B]]).is_err());
    }

    #[test]
    fn serve_and_release() {
        let mut stations = pair(10);
        stations.serve(A, VehicleId(0)).unwrap();
        stations.serve(A, VehicleId(1)).unwrap();
        assert_eq!(stations.load(A), 2);
        assert!(matches!(
            stations.serve(A, VehicleId(0)),
            Err(HandoverError::AlreadyServed { .. })
        ));
        stations.release(A, VehicleId(0)).unwrap();
        assert_eq!(stations.get(A).unwrap().served(), [VehicleId(1)]);
        assert!(matches!(
            stations.release(A, VehicleId(0)),
            Err(HandoverError::NotServed { .. })
        ));
        assert_eq!(stations.total_load(), 1);
    }

    #[test]
    fn transfer_moves_to_end_of_target() {
        let mut stations = pair(10);
        stations.serve(B, VehicleId(5)).unwrap();
        stations.serve(A, VehicleId(0)).unwrap();
        stations.transfer(VehicleId(0), A, B).unwrap();
        assert_eq!(stations.loads(), [0, 2]);
        assert_eq!(stations.get(B).unwrap().served(), [VehicleId(5), VehicleId(0)]);
    }

    #[test]
    fn failed_transfer_changes_nothing() {
        let mut stations = pair(10);
        stations.serve(A, VehicleId(0)).unwrap();
        stations.serve(B, VehicleId(1)).unwrap();

        assert!(matches!(
            stations.transfer(VehicleId(1), A, B),
            Err(HandoverError::AlreadyServed { .. })
        ));
        assert!(matches!(
            stations.transfer(VehicleId(2), A, B),
            Err(HandoverError::NotServed { .. })
        ));
        assert!(matches!(
            stations.transfer(VehicleId(0), A, A),
            Err(HandoverError::SelfTransfer { .. })
        ));
        assert!(matches!(
            stations.transfer(VehicleId(0), A, StationId(9)),
            Err(HandoverError::UnknownStation(StationId(9)))
        ));
        assert_eq!(stations.get(A).unwrap().served(), [VehicleId(0)]);
        assert_eq!(stations.get(B).unwrap().served(), [VehicleId(1)]);
    }

    #[test]
    fn capacity_and_overload() {
        let mut stations = pair(1);
        assert!(stations.has_capacity(B));
        stations.serve(B, VehicleId(0)).unwrap();
        assert!(!stations.has_capacity(B));
        stations.serve(B, VehicleId(1)).unwrap();
        assert!(stations.get(B).unwrap().is_overloaded());
        assert_eq!(stations.get(B).unwrap().relative_load(), 2.0);
        assert!(!stations.has_capacity(StationId(7)));
    }
}

// ── Prediction ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod predict_tests {
    use super::*;
    use crate::{is_exiting, rank_candidates};

    #[test]
    fn exiting_needs_distance_and_departure() {
        let stations = pair(10);
        let a = stations.get(A).unwrap();
        // 28.4 m > 0.7 × 40 m, heading east away from A.
        assert!(is_exiting(a, Point2::new(78.4, 50.0), Heading(0.0)));
        // Same spot but heading back toward A.
        assert!(!is_exiting(a, Point2::new(78.4, 50.0), Heading(180.0)));
        // Heading away but still inside the exit radius.
        assert!(!is_exiting(a, Point2::new(70.0, 50.0), Heading(0.0)));
        // Perpendicular to A counts as not approaching.
        assert!(is_exiting(a, Point2::new(78.4, 50.0), Heading(90.0)));
    }

    #[test]
    fn exactly_on_exit_radius_is_not_exiting() {
        let specs = [StationSpec::new(Point2::new(50.0, 50.0), 40.0, 10).with_threshold(0.5)];
        let stations = StationStore::from_specs(&specs, DEFAULT_DISTANCE_THRESHOLD).unwrap();
        let a = stations.get(A).unwrap();
        assert!(!is_exiting(a, Point2::new(70.0, 50.0), Heading(0.0)));
        assert!(is_exiting(a, Point2::new(70.5, 50.0), Heading(0.0)));
    }

    #[test]
    fn ranking_sorted_and_cut_at_range() {
        let specs = [
            StationSpec::new(Point2::new(0.0, 0.0), 10.0, 1),
            StationSpec::new(Point2::new(30.0, 0.0), 40.0, 1), // ratio 0.5
            StationSpec::new(Point2::new(10.0, 0.0), 40.0, 1), // ratio 0.0
            StationSpec::new(Point2::new(90.0, 0.0), 40.0, 1), // ratio 2.0
        ];
        let mut stations = StationStore::from_specs(&specs, 0.7).unwrap();
        stations
            .wire_neighbors(vec![
                vec![StationId(3), StationId(1), StationId(2)],
                vec![],
                vec![],
                vec![],
            ])
            .unwrap();
        let ranked = rank_candidates(&stations, A, Point2::new(10.0, 0.0));
        let ids: Vec<StationId> = ranked.iter().map(|c| c.station).collect();
        assert_eq!(ids, [StationId(2), StationId(1)]);
        assert_eq!(ranked[1].ratio, 0.5);
    }

    #[test]
    fn ranking_keeps_neighbor_order_on_ties() {
        let specs = [
            StationSpec::new(Point2::new(40.0, 100.0), 40.0, 10),
            StationSpec::new(Point2::new(150.0, 120.0), 60.0, 10),
            StationSpec::new(Point2::new(150.0, 80.0), 60.0, 10),
        ];
        let mut stations = StationStore::from_specs(&specs, 0.7).unwrap();
        stations.wire_neighbors(vec![vec![StationId(2), StationId(1)], vec![], vec![]]).unwrap();
        let ranked = rank_candidates(&stations, A, Point2::new(100.0, 100.0));
        assert_eq!(ranked[0].ratio, ranked[1].ratio);
        assert_eq!(ranked[0].station, StationId(2));
    }

    #[test]
    fn unknown_serving_station_has_no_candidates() {
        let stations = pair(10);
        assert!(rank_candidates(&stations, StationId(4), Point2::new(0.0, 0.0)).is_empty());
    }
}

// ── RangeHandover ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod range_tests {
    use super::*;
    use crate::{Decision, HandoverCause, HandoverStrategy, OverloadPolicy, RangeHandover};

    #[test]
    fn departing_vehicle_goes_to_free_neighbor() {
        let stations = pair(10);
        let decision = RangeHandover::new().decide(&stations, A, &view(78.4, 50.0, 0.0));
        assert_eq!(decision, Decision::Transfer { to: B, cause: HandoverCause::Range });
    }

    #[test]
    fn vehicle_inside_exit_radius_stays() {
        let stations = pair(10);
        assert_eq!(RangeHandover::new().decide(&stations, A, &view(60.0, 50.0, 0.0)), Decision::Stay);
    }

    #[test]
    fn full_neighbor_defers() {
        let mut stations = pair(1);
        stations.serve(B, VehicleId(9)).unwrap();
        assert_eq!(
            RangeHandover::new().decide(&stations, A, &view(78.4, 50.0, 0.0)),
            Decision::Deferred
        );
    }

    #[test]
    fn neighbor_behind_vehicle_is_not_accepted() {
        // Exiting A westward at (21.6, 50); B lies behind and out of range.
        let stations = pair(10);
        assert_eq!(
            RangeHandover::new().decide(&stations, A, &view(21.6, 50.0, 180.0)),
            Decision::Deferred
        );
    }

    #[test]
    fn equal_ratio_prefers_earlier_neighbor() {
        let specs = [
            StationSpec::new(Point2::new(40.0, 100.0), 40.0, 10),
            StationSpec::new(Point2::new(150.0, 120.0), 60.0, 10),
            StationSpec::new(Point2::new(150.0, 80.0), 60.0, 10),
        ];
        let vehicle = view(100.0, 100.0, 0.0);
        for (order, expected) in [
            (vec![StationId(1), StationId(2)], StationId(1)),
            (vec![StationId(2), StationId(1)], StationId(2)),
        ] {
            let mut stations = StationStore::from_specs(&specs, 0.7).unwrap();
            stations.wire_neighbors(vec![order, vec![], vec![]]).unwrap();
            assert_eq!(
                RangeHandover::new().decide(&stations, A, &vehicle),
                Decision::Transfer { to: expected, cause: HandoverCause::Range }
            );
        }
    }

    #[test]
    fn force_after_repeated_deferrals() {
        let stations = pair(10);
        let strategy = RangeHandover::new().with_overload(OverloadPolicy::ForceAfter { attempts: 2 });
        // Heading north: approaching neither station.
        let mut vehicle = view(78.4, 50.0, 90.0);
        assert_eq!(RangeHandover::new().decide(&stations, A, &vehicle), Decision::Deferred);

        vehicle.failed_attempts = 1;
        assert_eq!(strategy.decide(&stations, A, &vehicle), Decision::Deferred);
        vehicle.failed_attempts = 2;
        assert_eq!(
            strategy.decide(&stations, A, &vehicle),
            Decision::Transfer { to: B, cause: HandoverCause::Forced }
        );
    }

    #[test]
    fn forcing_still_respects_capacity() {
        let mut stations = pair(1);
        stations.serve(B, VehicleId(9)).unwrap();
        let strategy = RangeHandover::new().with_overload(OverloadPolicy::ForceAfter { attempts: 0 });
        assert_eq!(strategy.decide(&stations, A, &view(78.4, 50.0, 90.0)), Decision::Deferred);
    }

    #[test]
    fn load_balancing_moves_off_busy_station() {
        let specs = [
            StationSpec::new(Point2::new(50.0, 50.0), 40.0, 2),
            StationSpec::new(Point2::new(110.0, 50.0), 40.0, 10),
        ];
        let mut stations = StationStore::from_specs(&specs, 0.7).unwrap();
        stations.wire_neighbors(vec![vec![B], vec![A]]).unwrap();
        stations.serve(A, VehicleId(0)).unwrap();
        stations.serve(A, VehicleId(1)).unwrap();

        // 20 m from A, heading toward B (exactly at B's range).
        let vehicle = view(70.0, 50.0, 0.0);
        assert_eq!(RangeHandover::new().decide(&stations, A, &vehicle), Decision::Stay);
        assert_eq!(
            RangeHandover::new().with_load_balancing(0.8).decide(&stations, A, &vehicle),
            Decision::Transfer { to: B, cause: HandoverCause::LoadBalancing }
        );
        // Below the threshold nothing happens.
        assert_eq!(
            RangeHandover::new().with_load_balancing(1.5).decide(&stations, A, &vehicle),
            Decision::Stay
        );
    }

    #[test]
    fn default_threshold_comes_from_strategy() {
        assert_eq!(RangeHandover::new().default_distance_threshold(), 0.7);
        assert_eq!(RangeHandover::new().with_threshold(0.5).default_distance_threshold(), 0.5);
    }
}

// ── Counters ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod counter_tests {
    use crate::{HandoverCause, HandoverCounters};

    #[test]
    fn record_and_accumulate() {
        let mut tick = HandoverCounters::default();
        tick.record(HandoverCause::Range);
        tick.record(HandoverCause::Forced);
        tick.record_failed();
        assert_eq!(tick.handovers(), 2);

        let mut total = HandoverCounters { range: 3, ..Default::default() };
        total += tick;
        assert_eq!(total, HandoverCounters { range: 4, load_balancing: 0, forced: 1, failed: 1 });
    }
}
