//! Tests for simulation output: windowing, round trips and mesh regions

use std::fmt::Write as _;

use coslib::prelude::*;
use coslib::{
    read_series_window, write_delimited, MeshThresholds, SeriesFileOptions, TimeWindow,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Eight `%` header lines then `sweeps` sweeps over a 3-node mesh, with
/// value `100 * sweep + node`
fn simulation_output(sweeps: usize) -> String {
    let mut text = String::new();
    for i in 1..=8 {
        writeln!(text, "% header {}", i).unwrap();
    }
    for sweep in 0..sweeps {
        for (node, x) in [0.0, 1.5, 3.0].iter().enumerate() {
            writeln!(text, "{},{}", x, 100 * sweep + node).unwrap();
        }
    }
    text
}

#[test]
fn test_two_sweep_scenario() {
    let series =
        TimeSeries::new(vec![1.0, 2.0, 1.0, 2.0], vec![10.0, 20.0, 30.0, 40.0]).unwrap();
    let options = WindowOptions::default().delta_t(1.0);

    assert_eq!(
        series.windows(),
        vec![TimeWindow { start: 0, stop: 1 }, TimeWindow { start: 2, stop: 3 }]
    );
    assert_eq!(series.extract_window(1.0, &options).unwrap(), vec![30.0, 40.0]);
}

#[test]
fn test_window_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ce.csv");
    std::fs::write(&path, simulation_output(4)).unwrap();

    let options = SeriesFileOptions::default();
    assert_eq!(
        read_series_window(&path, 0.3, &options).unwrap(),
        vec![300.0, 301.0, 302.0]
    );

    let options = SeriesFileOptions {
        window: WindowOptions::default().location(1.5),
        ..SeriesFileOptions::default()
    };
    assert_eq!(read_series_window(&path, 0.2, &options).unwrap(), vec![201.0]);

    let options = SeriesFileOptions {
        window: WindowOptions::default().delete([0]),
        ..SeriesFileOptions::default()
    };
    assert_eq!(
        read_series_window(&path, 0.0, &options).unwrap(),
        vec![1.0, 2.0]
    );

    assert!(matches!(
        read_series_window(&path, 0.4, &SeriesFileOptions::default()),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn test_window_values_by_region() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phie.csv");
    std::fs::write(&path, simulation_output(2)).unwrap();

    let values = read_series_window(&path, 0.1, &SeriesFileOptions::default()).unwrap();
    let regions = partition(&[0.0, 1.5, 3.0]);

    assert_eq!(regions.slice(Region::Negative, &values).unwrap(), vec![100.0]);
    assert_eq!(regions.slice(Region::Separator, &values).unwrap(), vec![101.0]);
    assert_eq!(regions.slice(Region::Positive, &values).unwrap(), vec![102.0]);
}

#[test]
fn test_delimited_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.csv");
    let m = Matrix::from_rows(vec![
        vec![0.0, 1.0, -2.5],
        vec![1e-12, 6.02e23, 0.1],
    ])
    .unwrap();

    write_delimited(&path, &m).unwrap();
    let grid = read_delimited(&path, &DelimitedOptions::numeric()).unwrap();
    assert_eq!(extract_numbers(&grid, None, None).unwrap(), m);

    // Text-kind read still coerces numeric text
    let grid = read_delimited(&path, &DelimitedOptions::default()).unwrap();
    assert_eq!(extract_numbers(&grid, None, None).unwrap(), m);
}

#[cfg(feature = "mat")]
#[test]
fn test_convert_then_window() {
    use coslib::{convert_csv_to_mat, matrix_names, read_matrix};

    let dir = tempfile::tempdir().unwrap();
    let cs = dir.path().join("cs.csv");
    let mut text = String::from("% solid concentration\n% x, value\n");
    text.push_str("0,1\n1,2\n0,3\n1,4\n");
    std::fs::write(&cs, text).unwrap();

    let gold = dir.path().join("gold.mat");
    convert_csv_to_mat(&gold, &[&cs]).unwrap();
    assert_eq!(matrix_names(&gold).unwrap(), vec!["cs"]);

    let samples = read_matrix(&gold, "cs").unwrap();
    assert_eq!(samples.shape(), (4, 2));

    let series = TimeSeries::from_matrix(&samples).unwrap();
    let options = WindowOptions::default().delta_t(0.5);
    assert_eq!(series.extract_window(0.5, &options).unwrap(), vec![3.0, 4.0]);
}

proptest! {
    #[test]
    fn prop_partition_is_disjoint_cover(
        mesh in prop::collection::vec(-1.0f64..4.0, 0..60),
        negative in 0.0f64..2.0,
        width in 0.0f64..2.0,
    ) {
        let thresholds = MeshThresholds { negative, separator: negative + width };
        let regions = coslib::partition_with(&mesh, &thresholds);

        let mut seen = vec![0usize; mesh.len()];
        for region in Region::ALL {
            for &i in regions.region(region) {
                seen[i] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
        prop_assert_eq!(regions.len(), mesh.len());
    }

    #[test]
    fn prop_windows_tile_series(steps in prop::collection::vec(-1.0f64..1.0, 1..80)) {
        let mut x = vec![0.0];
        for step in &steps {
            x.push(x[x.len() - 1] + step);
        }
        let y = x.clone();
        let series = TimeSeries::new(x, y).unwrap();

        let windows = series.windows();
        prop_assert_eq!(windows[0].start, 0);
        prop_assert_eq!(windows[windows.len() - 1].stop, series.len() - 1);
        for pair in windows.windows(2) {
            prop_assert_eq!(pair[1].start, pair[0].stop + 1);
        }
    }
}
