use std::io::Write;
use std::path::Path;

use emg_scope::data::loader::{discover_csv_files, load_csv};

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn nonexistent_path_yields_empty_table_without_panicking() {
    let table = load_csv(Path::new("/no/such/recording.csv"));
    assert!(table.is_empty());
}

#[test]
fn valid_recording_is_parsed_with_ns_timestamps_as_seconds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "rec.csv",
        "timestamp_ns,emg0,emg1\n\
         1000000000,0.1,-0.2\n\
         1005000000,0.3,0.4\n\
         1010000000,-0.5,0.6\n",
    );

    let table = load_csv(&path);
    assert_eq!(table.len(), 3);
    assert_eq!(table.channel_names(), vec!["emg0", "emg1"]);
    // Nanosecond-scale values are converted to seconds.
    assert!(table.index.iter().zip([1.0, 1.005, 1.01]).all(|(a, b)| (a - b).abs() < 1e-9));
    assert_eq!(table.channels[1].values, vec![-0.2, 0.4, 0.6]);
}

#[test]
fn small_first_column_is_kept_as_raw_sample_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "rec.csv", "idx,emg0\n0,1.0\n1,2.0\n2,3.0\n");

    let table = load_csv(&path);
    assert_eq!(table.index, vec![0.0, 1.0, 2.0]);
}

#[test]
fn malformed_rows_collapse_to_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let ragged = write_file(dir.path(), "ragged.csv", "t,emg0\n0,0.1\n1\n");
    assert!(load_csv(&ragged).is_empty());

    let textual = write_file(dir.path(), "textual.csv", "t,emg0\n0,hello\n");
    assert!(load_csv(&textual).is_empty());

    let single_column = write_file(dir.path(), "single.csv", "t\n0\n1\n");
    assert!(load_csv(&single_column).is_empty());
}

#[test]
fn discovery_walks_subdirectories_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "S1/emg-rest.csv", "t,emg0\n0,0.0\n");
    write_file(dir.path(), "S0/emg-fist.csv", "t,emg0\n0,0.0\n");
    write_file(dir.path(), "S0/notes.txt", "not a recording");

    let files = discover_csv_files(dir.path());
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("S0/emg-fist.csv"));
    assert!(files[1].ends_with("S1/emg-rest.csv"));
}

#[test]
fn discovery_of_missing_directory_is_empty() {
    assert!(discover_csv_files(Path::new("/no/such/dir")).is_empty());
}
