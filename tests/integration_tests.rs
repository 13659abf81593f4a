use cyclistic_dashboard::analyzers::types::HourlyMode;
use cyclistic_dashboard::normalize::{CoordinateBackfill, NormalizeOptions, RowIssue};
use cyclistic_dashboard::{FilterCriteria, Pipeline, RiderSelection, RiderType};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_rides.csv")
}

fn load() -> Pipeline {
    let (pipeline, _) =
        Pipeline::load(&fixture(), &NormalizeOptions::default()).expect("Failed to load fixture");
    pipeline
}

#[test]
fn test_full_pipeline() {
    let (pipeline, report) = Pipeline::load(&fixture(), &NormalizeOptions::default()).unwrap();

    assert_eq!(report.rows_read, 12);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].row, 11);
    assert_eq!(
        report.skipped[0].issue,
        RowIssue::UnknownRiderType("tourist".to_string())
    );
    assert_eq!(pipeline.day_options(), vec!["7", "2", "1", "3", "4"]);

    let views = pipeline.aggregate();

    assert_eq!(views.summary.total_rides, 11);
    let avg = views.summary.average_ride_length.unwrap();
    assert!((avg - 17.575).abs() < 1e-9);
    assert_eq!(views.summary.most_active_day.as_deref(), Some("7"));

    let casual = &views.type_counts[0];
    assert_eq!(casual.rider_type, RiderType::Casual);
    assert_eq!(casual.ride_count, 5);
    assert_eq!(views.type_counts[1].ride_count, 6);

    let names: Vec<&str> = views
        .top_stations
        .iter()
        .map(|s| s.station_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Streeter Dr & Grand Ave",
            "Canal St & Adams St",
            "Clinton St & Madison St",
            "Millennium Park",
        ]
    );

    assert_eq!(views.hourly.mode, HourlyMode::Combined);
    assert_eq!(views.heat_points.items.len(), 10);
    assert_eq!(views.routes.items.len(), 10);
    assert_eq!(views.start_locations.items.len(), 10);
}

#[test]
fn test_single_rider_and_day_selection() {
    let pipeline = load().with_criteria(FilterCriteria::new(RiderSelection::Member, ["2"]));

    let views = pipeline.aggregate();

    assert_eq!(views.summary.total_rides, 3);
    assert_eq!(views.hourly.mode, HourlyMode::SingleRider);
    let hours: Vec<u8> = views.hourly.series[0].points.iter().map(|p| p.hour).collect();
    assert_eq!(hours, vec![8, 17, 18]);
}

#[test]
fn test_compare_both_series_cover_full_day() {
    let pipeline = load();
    let criteria = FilterCriteria::all_days(pipeline.dataset(), RiderSelection::CompareBoth);

    let views = pipeline.with_criteria(criteria).aggregate();

    assert_eq!(views.hourly.series.len(), 2);
    for series in &views.hourly.series {
        assert_eq!(series.points.len(), 24);
        assert!(series.has_gap);
    }
    let total: usize = views
        .hourly
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.ride_count))
        .sum();
    assert_eq!(total, 11);
}

#[test]
fn test_casual_selection_splits_top_stations_but_not_busiest() {
    let pipeline = load();
    let criteria = FilterCriteria::all_days(pipeline.dataset(), RiderSelection::Casual);
    let views = pipeline.with_criteria(criteria).aggregate();

    assert_eq!(views.top_stations.len(), 2);
    assert_eq!(views.top_stations[0].station_name, "Streeter Dr & Grand Ave");
    assert_eq!(views.top_stations[0].by_rider.len(), 1);
    assert_eq!(views.top_stations[0].by_rider[0].ride_count, 3);

    let busiest: Vec<&str> = views
        .busiest_stations
        .stations
        .iter()
        .map(|s| s.station_name.as_str())
        .collect();
    assert!(busiest.contains(&"Canal St & Adams St"));
}

#[test]
fn test_empty_day_selection_reports_no_data() {
    let pipeline =
        load().with_criteria(FilterCriteria::new(RiderSelection::All, Vec::<String>::new()));

    let views = pipeline.aggregate();

    assert_eq!(views.summary.total_rides, 0);
    assert_eq!(views.summary.average_ride_length, None);
    assert_eq!(views.summary.most_active_day, None);
    assert!(views.routes.items.is_empty());
    assert_eq!(views.routes.center, None);
}

#[test]
fn test_no_backfill_leaves_routes_empty() {
    let options = NormalizeOptions {
        backfill: CoordinateBackfill::Disabled,
        ..Default::default()
    };
    let (pipeline, _) = Pipeline::load(&fixture(), &options).unwrap();

    let views = pipeline.aggregate();

    assert!(views.routes.items.is_empty());
    assert_eq!(views.heat_points.items.len(), 10);
}

#[test]
fn test_gzip_source_matches_plain_source() {
    let path = std::env::temp_dir().join("cyclistic_integration_rides.csv.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&fs::read(fixture()).unwrap()).unwrap();
    fs::write(&path, encoder.finish().unwrap()).unwrap();

    let (gzipped, _) = Pipeline::load(&path, &NormalizeOptions::default()).unwrap();

    assert_eq!(gzipped.dataset(), load().dataset());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_row_cap_on_large_source() {
    let mut csv = String::from(
        "member_casual,day_of_week,hour_of_day,ride_length,station_name,latitude,longitude",
    );
    for i in 0..500 {
        csv.push_str(&format!("\nmember,{},{},{},S{},41.9,-87.6", i % 7 + 1, i % 24, i, i));
    }

    let (pipeline, report) =
        Pipeline::from_reader(csv.as_bytes(), &NormalizeOptions::default()).unwrap();

    assert_eq!(report.rows_read, 100);
    assert_eq!(pipeline.dataset().len(), 100);
    let last = &pipeline.dataset().records()[99];
    assert_eq!(last.station_name.as_deref(), Some("S99"));
}
