use std::fs;
use std::path::Path;

use f1_cli::pipeline::{RunRequest, execute_run};
use f1_load::MANIFEST_FILE;
use f1_model::{IntegrityViolation, PipelineOptions, TableName};
use rusqlite::Connection;

const EXTRACTS: [(&str, &str); 8] = [
    (
        "drivers.csv",
        "driverId,driverRef,number,code,forename,surname,dob,nationality,url\n\
         1,hamilton,44,HAM,Lewis,Hamilton,1985-01-07,British,http://example.org/1\n\
         2,heidfeld,\\N,HEI,Nick,Heidfeld,1977-05-10,German,http://example.org/2\n",
    ),
    (
        "constructors.csv",
        "constructorId,constructorRef,name,nationality,url\n\
         1,mclaren,McLaren,British,http://example.org/m\n\
         2,bmw_sauber,BMW Sauber,German,http://example.org/b\n",
    ),
    (
        "circuits.csv",
        "circuitId,circuitRef,name,location,country,lat,lng,alt,url\n\
         1,albert_park,Albert Park Grand Prix Circuit,Melbourne,Australia,-37.8497,144.968,10,u\n",
    ),
    (
        "races.csv",
        "raceId,year,round,circuitId,name,date,time,url\n\
         18,2008,1,1,Australian Grand Prix,2008-03-16,04:30:00,u\n",
    ),
    ("status.csv", "statusId,status\n1,Finished\n11,+1 Lap\n"),
    (
        "qualifying.csv",
        "qualifyId,raceId,driverId,constructorId,number,position,q1,q2,q3\n\
         1,18,1,1,22,1,1:26.572,1:25.187,1:26.714\n\
         2,18,2,2,3,2,1:25.960,1:25.518,1:27.236\n",
    ),
    (
        "pit_stops.csv",
        "raceId,driverId,stop,lap,time,duration,milliseconds\n\
         18,1,1,16,17:28:24,23.227,23227\n",
    ),
    (
        "results.csv",
        "resultId,raceId,driverId,constructorId,number,grid,position,positionText,\
         positionOrder,points,laps,time,milliseconds,fastestLap,rank,fastestLapTime,\
         fastestLapSpeed,statusId\n\
         1,18,1,1,22,1,1,1,1,10,58,1:34:50.616,5690616,39,2,1:27.452,218.300,1\n\
         2,18,2,2,3,5,2,2,2,8,58,+5.478,5696094,41,3,1:27.739,217.586,11\n",
    ),
];

fn write_extracts(dir: &Path) {
    for (file, text) in EXTRACTS {
        fs::write(dir.join(file), text).expect("write extract");
    }
}

fn request(data_dir: &Path) -> RunRequest {
    RunRequest::new(data_dir, PipelineOptions::default())
}

#[test]
fn loads_sqlite_and_csv() {
    let data = tempfile::tempdir().expect("tempdir");
    write_extracts(data.path());
    let out = tempfile::tempdir().expect("tempdir");
    let database = out.path().join("warehouse.db");
    let csv_dir = out.path().join("tables");

    let mut request = request(data.path());
    request.sqlite = Some(database.clone());
    request.csv_dir = Some(csv_dir.clone());
    let outcome = execute_run(&request).expect("run");

    assert!(!outcome.has_errors());
    assert!(!outcome.load_blocked);
    assert_eq!(outcome.loads.len(), 2);
    assert_eq!(outcome.loads[0].sink, "sqlite");
    assert_eq!(outcome.loads[1].sink, "csv");

    let connection = Connection::open(&database).expect("open database");
    let stops: i64 = connection
        .query_row(
            "SELECT p.duration_ms FROM fact_pit_stops p \
             JOIN dim_constructors c ON c.constructor_id = p.constructor_id \
             WHERE c.constructor_ref = 'mclaren'",
            [],
            |row| row.get(0),
        )
        .expect("pit stop");
    assert_eq!(stops, 23_227);

    for name in TableName::LOAD_ORDER {
        assert!(csv_dir.join(format!("{name}.csv")).is_file(), "{name}");
    }
    assert!(csv_dir.join(MANIFEST_FILE).is_file());
    let report = outcome
        .report
        .table(TableName::FactRaceResults)
        .expect("results report");
    assert_eq!(report.output_rows, 2);
}

#[test]
fn dry_run_loads_nothing() {
    let data = tempfile::tempdir().expect("tempdir");
    write_extracts(data.path());
    let out = tempfile::tempdir().expect("tempdir");
    let database = out.path().join("warehouse.db");

    let mut request = request(data.path());
    request.sqlite = Some(database.clone());
    request.dry_run = true;
    let outcome = execute_run(&request).expect("run");

    assert!(outcome.loads.is_empty());
    assert!(!database.exists());
    let entry = outcome
        .manifest
        .entry(TableName::DimDrivers)
        .expect("manifest entry");
    assert_eq!(entry.rows, 2);
}

#[test]
fn integrity_violations_block_the_load() {
    let data = tempfile::tempdir().expect("tempdir");
    write_extracts(data.path());
    fs::write(
        data.path().join("races.csv"),
        "raceId,year,round,circuitId,name,date,time\n\
         18,2008,1,7,Australian Grand Prix,2008-03-16,04:30:00\n",
    )
    .expect("write races");
    let out = tempfile::tempdir().expect("tempdir");
    let database = out.path().join("warehouse.db");

    let mut request = request(data.path());
    request.sqlite = Some(database.clone());
    let outcome = execute_run(&request).expect("run");

    assert!(outcome.has_errors());
    assert!(outcome.load_blocked);
    assert!(outcome.loads.is_empty());
    assert!(!database.exists());
    assert!(outcome.integrity.violations.iter().any(|violation| matches!(
        violation,
        IntegrityViolation::OrphanForeignKey {
            table: TableName::DimRaces,
            value: 7,
            ..
        }
    )));
}

#[test]
fn missing_extract_fails_the_run() {
    let data = tempfile::tempdir().expect("tempdir");
    write_extracts(data.path());
    fs::remove_file(data.path().join("pit_stops.csv")).expect("remove");

    let error = execute_run(&request(data.path())).expect_err("missing file");
    assert!(format!("{error:#}").contains("pit_stops.csv"));
}

#[test]
fn csv_output_over_the_extracts_is_rejected() {
    let data = tempfile::tempdir().expect("tempdir");
    write_extracts(data.path());
    fs::write(data.path().join("notes.txt"), "keep me").expect("write notes");

    let mut over_extracts = request(data.path());
    over_extracts.csv_dir = Some(data.path().to_path_buf());
    let error = execute_run(&over_extracts).expect_err("csv dir is the data dir");
    assert!(format!("{error:#}").contains("contains the data directory"));

    for (file, text) in EXTRACTS {
        assert_eq!(fs::read_to_string(data.path().join(file)).expect(file), text);
    }
    assert!(data.path().join("notes.txt").is_file());
    execute_run(&request(data.path())).expect("extracts still readable");
}

#[test]
fn csv_output_above_the_extracts_is_rejected() {
    let root = tempfile::tempdir().expect("tempdir");
    let data_dir = root.path().join("raw");
    fs::create_dir_all(&data_dir).expect("create data dir");
    write_extracts(&data_dir);

    let mut request = request(&data_dir);
    request.csv_dir = Some(root.path().to_path_buf());
    execute_run(&request).expect_err("csv dir contains the data dir");
    assert!(data_dir.join("drivers.csv").is_file());
}
