mod common;

use f1_core::{TransformError, run_pipeline, verify_integrity};
use f1_model::{
    DropReason, PipelineOptions, PitStopJoinPolicy, SourceTable, TableName, UnresolvedKeyPolicy,
};

use common::{Fixture, ints, reals, texts};

fn results_header() -> &'static str {
    "resultId,raceId,driverId,constructorId,statusId,grid,position,points,laps,milliseconds,\
     fastestLap,rank,fastestLapTime,fastestLapSpeed"
}

#[test]
fn builds_reference_driver_and_qualifying_row() {
    let raw = Fixture::new()
        .with(
            SourceTable::Qualifying,
            "qualifyId,raceId,driverId,constructorId,q1,q2,q3,position\n1,18,1,1,1:24.603,,,1",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");

    let drivers = output.warehouse.table(TableName::DimDrivers);
    assert_eq!(ints(drivers, "driver_id"), vec![Some(1)]);
    assert_eq!(
        texts(drivers, "full_name"),
        vec![Some("Lewis Hamilton".to_string())]
    );

    let qualifying = output.warehouse.table(TableName::FactQualifying);
    assert_eq!(ints(qualifying, "driver_id"), vec![Some(1)]);
    assert_eq!(ints(qualifying, "q1_time_ms"), vec![Some(84_603)]);
    assert_eq!(ints(qualifying, "q2_time_ms"), vec![Some(0)]);
    assert_eq!(ints(qualifying, "q3_time_ms"), vec![Some(0)]);
    assert_eq!(ints(qualifying, "position"), vec![Some(1)]);
}

#[test]
fn output_tables_use_literal_column_order() {
    let output = run_pipeline(&Fixture::new().raw(), &PipelineOptions::default()).expect("pipeline");
    for table in output.warehouse.tables() {
        let columns: Vec<String> = table
            .data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(columns, table.name.column_names(), "{}", table.name);
    }
}

#[test]
fn qualifying_row_with_unknown_driver_is_excluded() {
    let raw = Fixture::new()
        .with(
            SourceTable::Qualifying,
            "qualifyId,raceId,driverId,constructorId,q1,q2,q3,position\n\
             1,18,1,1,1:24.603,,,1\n\
             2,18,99,1,1:25.000,,,2",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");

    let qualifying = output.warehouse.table(TableName::FactQualifying);
    assert_eq!(ints(qualifying, "qualify_id"), vec![Some(1)]);
    let report = output
        .report
        .table(TableName::FactQualifying)
        .expect("qualifying report");
    assert_eq!(report.input_rows, 2);
    assert_eq!(report.output_rows, 1);
    assert_eq!(report.dropped_count(DropReason::UnresolvedDriver), 1);
}

#[test]
fn positions_gained_is_grid_minus_position_with_missing_as_zero() {
    let raw = Fixture::new()
        .with(
            SourceTable::Results,
            &format!(
                "{}\n\
                 1,18,1,1,1,5,3,10,58,5690616,39,2,1:27.452,218.300\n\
                 2,18,1,1,1,5,\\N,0,12,\\N,\\N,\\N,\\N,\\N",
                results_header()
            ),
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");
    let results = output.warehouse.table(TableName::FactRaceResults);

    assert_eq!(reals(results, "positions_gained"), vec![Some(2.0), Some(0.0)]);
    assert_eq!(ints(results, "position"), vec![Some(3), None]);
    assert_eq!(ints(results, "grid"), vec![Some(5), Some(5)]);
    assert_eq!(ints(results, "milliseconds"), vec![Some(5_690_616), Some(0)]);
    assert_eq!(ints(results, "fastest_lap_time_ms"), vec![Some(87_452), Some(0)]);
    assert_eq!(reals(results, "fastest_lap_speed"), vec![Some(218.3), Some(0.0)]);
    assert_eq!(ints(results, "laps"), vec![Some(58), Some(12)]);
}

#[test]
fn dimensions_drop_missing_and_duplicate_ids_then_resequence() {
    let raw = Fixture::new()
        .with(
            SourceTable::Drivers,
            "driverId,driverRef,forename,surname,dob,nationality\n\
             20,vettel,Sebastian,Vettel,1987-07-03,German\n\
             ,ghost,No,Id,,\n\
             7,bourdais,Sébastien,Bourdais,1979-02-28,French\n\
             20,vettel_again,Seb,V,,\n\
             x,broken,Not,Numeric,,",
        )
        .with(
            SourceTable::Circuits,
            "circuitId,circuitRef,name,location,country\n\
             4,catalunya,Circuit de Barcelona-Catalunya,Montmeló,Spain\n\
             1,albert_park,Albert Park,Melbourne,Australia",
        )
        .with(
            SourceTable::Qualifying,
            "qualifyId,raceId,driverId,constructorId,q1,q2,q3,position\n\
             1,18,7,1,1:26.000,,,3\n\
             2,18,20,1,1:25.000,,,1",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");

    let drivers = output.warehouse.table(TableName::DimDrivers);
    assert_eq!(ints(drivers, "driver_id"), vec![Some(1), Some(2)]);
    assert_eq!(
        texts(drivers, "driver_ref"),
        vec![Some("vettel".to_string()), Some("bourdais".to_string())]
    );
    let report = output.report.table(TableName::DimDrivers).expect("report");
    assert_eq!(report.dropped_count(DropReason::MissingId), 2);
    assert_eq!(report.dropped_count(DropReason::DuplicateId), 1);

    let circuits = output.warehouse.table(TableName::DimCircuits);
    assert_eq!(ints(circuits, "circuit_id"), vec![Some(4), Some(1)]);

    let qualifying = output.warehouse.table(TableName::FactQualifying);
    assert_eq!(ints(qualifying, "driver_id"), vec![Some(2), Some(1)]);
    assert!(verify_integrity(&output.warehouse).expect("verify").is_clean());
}

#[test]
fn race_dates_fall_back_to_sentinel() {
    let raw = Fixture::new()
        .with(
            SourceTable::Races,
            "raceId,year,round,circuitId,name,date,time\n\
             18,2008,1,1,Australian Grand Prix,2008-03-16,04:30:00\n\
             19,\\N,2,1,Malaysian Grand Prix,not a date,\n\
             20,2008,3,1,Bahrain Grand Prix,,",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");
    let races = output.warehouse.table(TableName::DimRaces);

    assert_eq!(ints(races, "race_id"), vec![Some(1), Some(2), Some(3)]);
    assert_eq!(
        texts(races, "date"),
        vec![
            Some("2008-03-16".to_string()),
            Some("1900-01-01".to_string()),
            Some("1900-01-01".to_string()),
        ]
    );
    assert_eq!(ints(races, "year"), vec![Some(2008), None, Some(2008)]);
    assert_eq!(ints(races, "circuit_id"), vec![Some(1), Some(1), Some(1)]);
    assert_eq!(texts(races, "time")[0].as_deref(), Some("04:30:00"));
}

#[test]
fn fact_keys_use_surrogates_not_original_ids() {
    let raw = Fixture::new()
        .with(
            SourceTable::Races,
            "raceId,year,round,circuitId,name,date,time\n\
             841,2011,1,1,Australian Grand Prix,2011-03-27,06:00:00\n\
             842,2011,2,1,Malaysian Grand Prix,2011-04-10,08:00:00",
        )
        .with(
            SourceTable::Results,
            &format!(
                "{}\n\
                 20779,842,1,1,1,1,1,25,56,5710,43,1,1:40.571,198.7",
                results_header()
            ),
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");
    let results = output.warehouse.table(TableName::FactRaceResults);
    assert_eq!(ints(results, "result_id"), vec![Some(20_779)]);
    assert_eq!(ints(results, "race_id"), vec![Some(2)]);
}

#[test]
fn fact_rows_without_usable_primary_key_are_dropped() {
    let raw = Fixture::new()
        .with(
            SourceTable::Qualifying,
            "qualifyId,raceId,driverId,constructorId,q1,q2,q3,position\n\
             1,18,1,1,1:24.603,,,1\n\
             ,18,1,1,1:24.603,,,1\n\
             1,18,1,1,1:30.000,,,2",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");
    let qualifying = output.warehouse.table(TableName::FactQualifying);
    assert_eq!(ints(qualifying, "q1_time_ms"), vec![Some(84_603)]);
    let report = output.report.table(TableName::FactQualifying).expect("report");
    assert_eq!(report.dropped_count(DropReason::MissingId), 1);
    assert_eq!(report.dropped_count(DropReason::DuplicateId), 1);
}

fn shared_car_fixture() -> Fixture {
    Fixture::new()
        .with(
            SourceTable::Constructors,
            "constructorId,constructorRef,name,nationality\n\
             6,ferrari,Ferrari,Italian\n\
             1,mclaren,McLaren,British",
        )
        .with(
            SourceTable::Results,
            &format!(
                "{}\n\
                 1,18,1,1,1,1,1,10,58,,,,,\n\
                 2,18,1,6,1,2,2,8,58,,,,,",
                results_header()
            ),
        )
        .with(
            SourceTable::PitStops,
            "raceId,driverId,stop,lap,milliseconds\n18,1,1,16,22898\n18,1,2,36,\\N",
        )
}

#[test]
fn ambiguous_pit_stop_join_fails_by_default() {
    let raw = shared_car_fixture().raw();
    let error = run_pipeline(&raw, &PipelineOptions::default()).expect_err("ambiguous join");
    let transform = error
        .downcast_ref::<TransformError>()
        .expect("transform error");
    assert!(matches!(
        transform,
        TransformError::AmbiguousPitStopJoin {
            race_id: 18,
            driver_id: 1,
            matches: 2,
            ambiguous_keys: 1,
        }
    ));
}

#[test]
fn first_policy_uses_first_results_row() {
    let raw = shared_car_fixture().raw();
    let options = PipelineOptions::default().with_pit_stop_join(PitStopJoinPolicy::First);
    let output = run_pipeline(&raw, &options).expect("pipeline");
    let pit_stops = output.warehouse.table(TableName::FactPitStops);

    assert_eq!(ints(pit_stops, "pit_stop_id"), vec![Some(1), Some(2)]);
    // McLaren is the second constructor row, so its surrogate is 2.
    assert_eq!(ints(pit_stops, "constructor_id"), vec![Some(2), Some(2)]);
    assert_eq!(ints(pit_stops, "stop_number"), vec![Some(1), Some(2)]);
    assert_eq!(ints(pit_stops, "lap"), vec![Some(16), Some(36)]);
    assert_eq!(ints(pit_stops, "duration_ms"), vec![Some(22_898), Some(0)]);
}

#[test]
fn expand_policy_emits_one_row_per_match() {
    let raw = shared_car_fixture().raw();
    let options = PipelineOptions::default().with_pit_stop_join(PitStopJoinPolicy::Expand);
    let output = run_pipeline(&raw, &options).expect("pipeline");
    let pit_stops = output.warehouse.table(TableName::FactPitStops);

    assert_eq!(
        ints(pit_stops, "pit_stop_id"),
        vec![Some(1), Some(2), Some(3), Some(4)]
    );
    assert_eq!(
        ints(pit_stops, "constructor_id"),
        vec![Some(2), Some(1), Some(2), Some(1)]
    );
}

#[test]
fn pit_stop_without_results_row_has_unresolved_constructor() {
    let raw = Fixture::new()
        .with(
            SourceTable::PitStops,
            "raceId,driverId,stop,lap,milliseconds\n18,1,1,16,22898",
        )
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");
    assert_eq!(
        output.warehouse.table(TableName::FactPitStops).record_count(),
        0
    );
    let report = output.report.table(TableName::FactPitStops).expect("report");
    assert_eq!(report.dropped_count(DropReason::UnresolvedConstructor), 1);
}

#[test]
fn sentinel_mode_points_unresolved_keys_at_unknown_rows() {
    let raw = Fixture::new()
        .with(
            SourceTable::Results,
            &format!(
                "{}\n\
                 1,18,42,1,99,1,1,10,58,,,,,\n\
                 2,77,1,1,1,1,1,10,58,,,,,",
                results_header()
            ),
        )
        .raw();
    let options = PipelineOptions::default().with_unresolved_keys(UnresolvedKeyPolicy::Sentinel);
    let output = run_pipeline(&raw, &options).expect("pipeline");

    let drivers = output.warehouse.table(TableName::DimDrivers);
    assert_eq!(ints(drivers, "driver_id"), vec![Some(0), Some(1)]);
    assert_eq!(
        texts(drivers, "full_name"),
        vec![
            Some("Unknown Driver".to_string()),
            Some("Lewis Hamilton".to_string())
        ]
    );
    assert_eq!(texts(drivers, "driver_ref")[0].as_deref(), Some("unknown"));
    let status = output.warehouse.table(TableName::DimStatus);
    assert_eq!(texts(status, "status_description")[0].as_deref(), Some("Unknown"));
    assert_eq!(output.warehouse.table(TableName::DimRaces).record_count(), 1);

    let results = output.warehouse.table(TableName::FactRaceResults);
    assert_eq!(ints(results, "result_id"), vec![Some(1)]);
    assert_eq!(ints(results, "driver_id"), vec![Some(0)]);
    assert_eq!(ints(results, "status_id"), vec![Some(0)]);

    let report = output.report.table(TableName::FactRaceResults).expect("report");
    assert_eq!(report.sentinel_keys, 2);
    assert_eq!(report.dropped_count(DropReason::UnresolvedRace), 1);
    assert!(verify_integrity(&output.warehouse).expect("verify").is_clean());
}

#[test]
fn sentinel_mode_drops_source_rows_keyed_zero() {
    let raw = Fixture::new()
        .with(SourceTable::Status, "statusId,status\n0,Reserved\n1,Finished")
        .raw();
    let options = PipelineOptions::default().with_unresolved_keys(UnresolvedKeyPolicy::Sentinel);
    let output = run_pipeline(&raw, &options).expect("pipeline");

    let status = output.warehouse.table(TableName::DimStatus);
    assert_eq!(ints(status, "status_id"), vec![Some(0), Some(1)]);
    assert_eq!(
        texts(status, "status_description"),
        vec![Some("Unknown".to_string()), Some("Finished".to_string())]
    );
    let report = output.report.table(TableName::DimStatus).expect("report");
    assert_eq!(report.dropped_count(DropReason::ReservedKey), 1);
    assert!(verify_integrity(&output.warehouse).expect("verify").is_clean());
}

#[test]
fn error_mode_keeps_source_rows_keyed_zero() {
    let raw = Fixture::new()
        .with(SourceTable::Status, "statusId,status\n0,Reserved\n1,Finished")
        .raw();
    let output = run_pipeline(&raw, &PipelineOptions::default()).expect("pipeline");

    let status = output.warehouse.table(TableName::DimStatus);
    assert_eq!(ints(status, "status_id"), vec![Some(0), Some(1)]);
    let report = output.report.table(TableName::DimStatus).expect("report");
    assert_eq!(report.dropped_count(DropReason::ReservedKey), 0);
}

#[test]
fn identical_input_builds_identical_tables() {
    let fixture = shared_car_fixture();
    let options = PipelineOptions::default().with_pit_stop_join(PitStopJoinPolicy::Expand);
    let first = run_pipeline(&fixture.raw(), &options).expect("first run");
    let second = run_pipeline(&fixture.raw(), &options).expect("second run");
    for (a, b) in first.warehouse.tables().iter().zip(second.warehouse.tables()) {
        assert_eq!(a.name, b.name);
        assert!(a.data.equals_missing(&b.data), "{} differs", a.name);
    }
    assert_eq!(first.report, second.report);
}
