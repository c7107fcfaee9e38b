use bikeshare_stats::ingestion::LoadOptions;
use bikeshare_stats::session::{run, Prompter, ScriptedSource, SessionOptions};
use bikeshare_stats::BikeshareError;

fn options() -> SessionOptions {
    SessionOptions {
        load: LoadOptions::in_dir("tests/fixtures"),
        max_attempts: 3,
        page_size: 5,
    }
}

fn run_script(lines: &[&str]) -> (Result<(), BikeshareError>, String) {
    let mut prompter = Prompter::new(
        ScriptedSource::new(lines.iter().copied()),
        Vec::new(),
        options().max_attempts,
    );
    let result = run(&mut prompter, &options());
    let out = String::from_utf8(prompter.into_output()).unwrap();
    (result, out)
}

#[test]
fn full_session_with_paging_and_restart() {
    // Two Monday trips fit in one raw-data window, so the next answer is the restart question.
    let (result, out) = run_script(&[
        "gotham",
        "Chicago",
        "day",
        "monday",
        "yes",
        "yes",
        "washington",
        "none",
        "no",
        "no",
    ]);
    result.unwrap();

    assert!(out.contains("invalid city"));
    assert!(out.contains("CHICAGO -- MONDAY"));
    assert!(out.contains("Total trips: 2"));
    assert!(out.contains("2017-03-06 13:49:38"));
    assert!(out.contains("WASHINGTON -- NO FILTER"));
    assert!(out.contains("Total trips: 6"));
}

#[test]
fn paging_stops_at_the_end_of_the_set() {
    // Ten Chicago trips: two windows, then no further raw-data question.
    let (result, out) = run_script(&["chicago", "none", "yes", "yes", "no"]);
    result.unwrap();

    assert_eq!(out.matches("Would you like to view raw data?").count(), 2);
    assert!(out.contains("2017-02-04 12:21:41"));
}

#[test]
fn empty_filter_prints_no_data() {
    let (result, out) = run_script(&["new york city", "month", "february", "no"]);
    result.unwrap();

    assert!(out.contains("NEW YORK CITY -- FEBRUARY"));
    assert!(out.contains("No data for this filter."));
    assert!(!out.contains("Would you like to view raw data?"));
}

#[test]
fn exhausted_retries_end_the_session() {
    let (result, _) = run_script(&["chicago", "year", "week", "fortnight"]);
    assert!(matches!(
        result,
        Err(BikeshareError::RetriesExhausted { attempts: 3, .. })
    ));
}

#[test]
fn missing_dataset_is_an_error() {
    let mut prompter = Prompter::new(ScriptedSource::new(["chicago"]), Vec::new(), 3);
    let opts = SessionOptions {
        load: LoadOptions::in_dir("tests/does_not_exist"),
        ..SessionOptions::default()
    };
    assert!(matches!(
        run(&mut prompter, &opts),
        Err(BikeshareError::Io(_))
    ));
}
