//! Scenario parsing and an end-to-end run of the sample scenario.

#[cfg(test)]
mod scenario_tests {
    use vh_handover::OverloadPolicy;
    use vh_sim::DesyncPolicy;
    use vh_trace::HeadingConvention;

    use crate::scenario::Scenario;

    #[test]
    fn empty_file_uses_defaults() {
        let s = Scenario::parse("").unwrap();
        assert_eq!(s.sim.tick_duration_ms, 500);
        assert_eq!(s.handover.capacity, 10);
        assert_eq!(s.handover.desync_policy, DesyncPolicy::Abort);
        assert!(s.stations.is_empty());
        assert!(s.traces.csv.is_none());
        assert!(s.log_level.is_none());
    }

    #[test]
    fn sample_scenario_parses() {
        let s = Scenario::parse(include_str!("../ring.toml")).unwrap();
        assert_eq!(s.sim.total_ticks, 400);
        assert_eq!(s.traces.synthetic.count, 40);
        assert_eq!(s.traces.heading, HeadingConvention::Math);
        assert_eq!(s.log_level.as_deref(), Some("info"));

        let world = s.world().unwrap();
        let specs = s.station_specs(&world);
        assert_eq!(specs.len(), 4);
        assert!(specs.iter().all(|spec| spec.range_m == 45.0 && spec.capacity == 10));
    }

    #[test]
    fn handover_section_overrides() {
        let s = Scenario::parse(
            r#"
            [handover]
            distance_threshold     = 0.6
            load_balance_threshold = 0.8
            desync_policy          = "quarantine"
            overload               = { kind = "force_after", attempts = 5 }
            "#,
        )
        .unwrap();
        assert_eq!(s.handover.strategy.distance_threshold, 0.6);
        assert_eq!(s.handover.strategy.load_balance_threshold, Some(0.8));
        assert_eq!(s.handover.strategy.overload, OverloadPolicy::ForceAfter { attempts: 5 });
        assert_eq!(s.handover.desync_policy, DesyncPolicy::Quarantine);
    }

    #[test]
    fn explicit_stations_replace_corners() {
        let s = Scenario::parse(
            r#"
            [[stations]]
            position = { x = 20.0, y = 20.0 }
            range_m  = 30.0
            capacity = 2

            [[stations]]
            position           = { x = 180.0, y = 20.0 }
            range_m            = 30.0
            capacity           = 2
            distance_threshold = 0.5
            "#,
        )
        .unwrap();
        let world = s.world().unwrap();
        let specs = s.station_specs(&world);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].distance_threshold, Some(0.5));
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(Scenario::parse("[handover]\ndesync_policy = \"ignore\"").is_err());
    }
}

#[cfg(test)]
mod run_tests {
    use vh_output::{CsvWriter, SimOutputObserver};
    use vh_sim::ModelBuilder;
    use vh_trace::synthesize_fleet;

    use crate::scenario::Scenario;

    #[test]
    fn synthetic_scenario_runs_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Scenario::parse(include_str!("../ring.toml")).unwrap();
        s.sim.total_ticks = 60;
        s.traces.synthetic.count = 8;

        let world = s.world().unwrap();
        let stations = s.station_specs(&world);
        let feed = synthesize_fleet(world.waypoints(), &s.traces.synthetic).unwrap();
        let mut model = ModelBuilder::new(s.sim.clone(), world, feed)
            .stations(stations)
            .strategy(s.handover.strategy.clone())
            .desync_policy(s.handover.desync_policy)
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &s.sim);
        model.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let summaries = std::fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        // Header plus one line per tick.
        assert_eq!(summaries.lines().count(), 61);
        assert_eq!(model.stations.len(), 4);
    }
}
