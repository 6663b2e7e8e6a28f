//! Unit tests for vh-mobility.

#[cfg(test)]
mod helpers {
    use vh_spatial::World;
    use vh_trace::{Trace, TraceSample};

    /// Eastbound trace at 1 m/s starting at `(first, 50)`.
    pub fn eastbound(first: i64, n: i64) -> Trace {
        let samples = (first..first + n)
            .map(|t| TraceSample::new(t, 10.0 + t as f64, 50.0, 0.0))
            .collect();
        Trace::new("east", samples).unwrap()
    }

    pub fn world() -> World {
        World::new(200.0, 200.0).unwrap()
    }
}

#[cfg(test)]
mod replay {
    use vh_core::{AgentRef, Point2, SimClock, VehicleId};
    use vh_trace::{Trace, TraceSample};

    use super::helpers::{eastbound, world};
    use crate::{MobilityError, ReplayEvent, VehicleStore};

    #[test]
    fn trace_at_zero_activates_on_initialize() {
        let clock = SimClock::new(1_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(0, 3));

        assert_eq!(store.initialize(v, &clock, &mut world).unwrap(), ReplayEvent::Activated);
        assert!(store.get(v).unwrap().is_active());
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(10.0, 50.0)));
        assert_eq!(store.active_count(), 1);
    }

    #[test]
    fn late_trace_stays_pending_until_first_ts() {
        let clock = SimClock::new(500);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(2, 4));

        assert_eq!(store.initialize(v, &clock, &mut world).unwrap(), ReplayEvent::Pending);
        // Ticks 1..=3 map to external 0, 1, 1.
        for _ in 0..3 {
            assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Pending);
        }
        assert!(world.position(AgentRef::Vehicle(v)).is_none());
        assert!(!store.get(v).unwrap().is_active());

        // Tick 4 → t=2.
        assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Activated);
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(12.0, 50.0)));
    }

    #[test]
    fn half_second_ticks_hold_then_move() {
        let clock = SimClock::new(500);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(0, 5));
        store.initialize(v, &clock, &mut world).unwrap();

        let events: Vec<ReplayEvent> =
            (0..4).map(|_| store.advance(v, &clock, &mut world).unwrap()).collect();
        assert_eq!(
            events,
            [ReplayEvent::Held, ReplayEvent::Moved, ReplayEvent::Held, ReplayEvent::Moved]
        );
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(12.0, 50.0)));
        assert_eq!(store.get(v).unwrap().cursor(), Some(2));
        assert_eq!(store.get(v).unwrap().steps().0, 4);
    }

    #[test]
    fn heading_follows_samples() {
        let samples = vec![
            TraceSample::new(0, 10.0, 10.0, 0.0),
            TraceSample::new(1, 10.0, 11.0, 90.0),
        ];
        let clock = SimClock::new(1_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("turn", Trace::new("turn", samples).unwrap());
        store.initialize(v, &clock, &mut world).unwrap();
        assert_eq!(store.get(v).unwrap().heading().degrees(), 0.0);
        store.advance(v, &clock, &mut world).unwrap();
        assert_eq!(store.get(v).unwrap().heading().degrees(), 90.0);
    }

    #[test]
    fn retires_after_last_sample_and_freezes() {
        let clock = SimClock::new(1_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(0, 2));
        store.initialize(v, &clock, &mut world).unwrap();

        assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Moved);
        assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Retired);
        assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Frozen);

        let vehicle = store.get(v).unwrap();
        assert!(!vehicle.is_active());
        assert!(vehicle.is_retired());
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(11.0, 50.0)));
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn skipped_sample_is_desync() {
        // 2 s ticks jump over odd timesteps.
        let clock = SimClock::new(2_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(0, 6));
        store.initialize(v, &clock, &mut world).unwrap();

        match store.advance(v, &clock, &mut world) {
            Err(MobilityError::Desync { vehicle, expected, found }) => {
                assert_eq!(vehicle, v);
                assert_eq!(expected, 2);
                assert_eq!(found, Some(1));
            }
            other => panic!("expected desync, got {other:?}"),
        }
        // Nothing was applied.
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(10.0, 50.0)));
        assert_eq!(store.get(v).unwrap().cursor(), Some(0));
    }

    #[test]
    fn missed_first_sample_is_desync() {
        let clock = SimClock::new(2_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(1, 4));
        assert_eq!(store.initialize(v, &clock, &mut world).unwrap(), ReplayEvent::Pending);
        assert!(matches!(
            store.advance(v, &clock, &mut world),
            Err(MobilityError::Desync { expected: 2, found: Some(1), .. })
        ));
    }

    #[test]
    fn out_of_bounds_sample_is_rejected() {
        let samples = vec![TraceSample::new(0, 250.0, 10.0, 0.0)];
        let clock = SimClock::new(1_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("off", Trace::new("off", samples).unwrap());
        assert!(matches!(store.initialize(v, &clock, &mut world), Err(MobilityError::Spatial(_))));
        assert!(!store.get(v).unwrap().is_active());
    }

    #[test]
    fn quarantine_freezes_vehicle() {
        let clock = SimClock::new(1_000);
        let mut world = world();
        let mut store = VehicleStore::new();
        let v = store.spawn("east", eastbound(0, 5));
        store.initialize(v, &clock, &mut world).unwrap();
        store.get_mut(v).unwrap().quarantine();
        assert_eq!(store.advance(v, &clock, &mut world).unwrap(), ReplayEvent::Frozen);
        assert_eq!(world.position(AgentRef::Vehicle(v)), Some(Point2::new(10.0, 50.0)));
        assert!(store.advance(VehicleId(9), &clock, &mut world).is_err());
    }
}

#[cfg(test)]
mod store {
    use vh_core::{StationId, VehicleId};

    use super::helpers::eastbound;
    use crate::{MobilityError, VehicleStore};

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut store = VehicleStore::new();
        let a = store.spawn("a", eastbound(0, 2));
        let b = store.spawn("b", eastbound(0, 2));
        assert_eq!((a, b), (VehicleId(0), VehicleId(1)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.ids().collect::<Vec<_>>(), [a, b]);
        assert_eq!(store.get(b).unwrap().trace_id, "b");
    }

    #[test]
    fn station_handle_round_trips() {
        let mut store = VehicleStore::new();
        let v = store.spawn("a", eastbound(0, 2));
        assert_eq!(store.get(v).unwrap().station(), None);
        store.set_station(v, Some(StationId(3))).unwrap();
        assert_eq!(store.get(v).unwrap().station(), Some(StationId(3)));
        assert!(matches!(
            store.set_station(VehicleId(7), None),
            Err(MobilityError::NotFound(VehicleId(7)))
        ));
    }
}
