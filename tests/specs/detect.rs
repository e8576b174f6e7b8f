//! Behavioral specs for `smelltab detect`.

use crate::prelude::*;

const HEADER: &str = "App,TestClass,TestFilePath,ProductionFilePath,RelativeTestFilePath,\
RelativeProductionFilePath,NumberOfMethods,Assertion Roulette,Conditional Test Logic,\
Empty Test,Exception Catching Throwing,IgnoredTest,Magic Number Test,Redundant Print,\
Sleepy Test,Unknown Test";

const SIMPLE_TEST: &str = r#"
import org.junit.Test;

public class FooTest {
    @Test
    public void works() {
        org.junit.Assert.assertTrue(true);
    }
}
"#;

fn canonical_fixture(name: &str) -> String {
    fixture(name).canonicalize().unwrap().display().to_string()
}

// =============================================================================
// REPORT SHAPE
// =============================================================================

/// > The first line is the header: seven fixed columns then one per smell
#[test]
fn report_starts_with_header() {
    let run = detect().on("calculator").passes();
    assert_eq!(run.stdout().lines().next(), Some(HEADER));
}

/// > One row per test file, sorted by test path
#[test]
fn one_row_per_test_file_sorted() {
    let rows = detect().on("calculator").passes().rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "CalcTest");
    assert_eq!(rows[2][1], "LegacyTest");
}

/// > Matched tests carry absolute and root-relative production paths
#[test]
fn matched_row_has_production_paths() {
    let root = canonical_fixture("calculator");
    let rows = detect().on("calculator").passes().rows();
    let calc = &rows[1];

    assert_eq!(calc[0], "calculator");
    assert_eq!(calc[2], format!("{root}/src/test/java/calc/CalcTest.java"));
    assert_eq!(calc[3], format!("{root}/src/main/java/calc/Calc.java"));
    assert_eq!(calc[4], "src/test/java/calc/CalcTest.java");
    assert_eq!(calc[5], "src/main/java/calc/Calc.java");
}

/// > Smell columns count the affected test methods
#[test]
fn matched_row_counts_smells() {
    let rows = detect().on("calculator").passes().rows();
    assert_eq!(
        rows[1][6..],
        ["4", "1", "0", "1", "1", "1", "1", "1", "1", "2"]
    );
}

/// > Unmatched tests leave both production cells empty
#[test]
fn unmatched_row_has_empty_production_cells() {
    let rows = detect().on("calculator").passes().rows();
    let legacy = &rows[2];

    assert_eq!(legacy[3], "");
    assert_eq!(legacy[5], "");
    assert_eq!(legacy[6..], ["1", "0", "1", "0", "0", "0", "1", "0", "0", "0"]);
}

/// > Production files never get rows of their own
#[test]
fn production_files_are_not_rows() {
    detect()
        .on("calculator")
        .passes()
        .stdout_lacks(",Calc,")
        .stdout_lacks(",Format,");
}

/// > A file the detector cannot analyze keeps its row with empty smell cells
#[test]
fn failing_file_keeps_row_with_empty_cells() {
    let run = detect().on("broken").passes();
    let rows = run.rows();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][1], "BadTest");
    assert_eq!(rows[1][6..], ["0", "", "", "", "", "", "", "", "", ""]);
    assert_eq!(rows[2][1], "GoodTest");
    assert_eq!(rows[2][6..], ["1", "0", "0", "0", "0", "0", "0", "0", "0", "0"]);
}

/// > Running twice over an unchanged tree gives identical output
#[test]
fn output_is_deterministic() {
    let first = detect().on("calculator").passes().stdout();
    detect().on("calculator").passes().stdout_eq(&first);
}

/// > Parallel detection produces the same report as sequential detection
#[test]
fn parallel_matches_sequential() {
    let sequential = detect().on("calculator").args(&["-j", "1"]).passes().stdout();
    detect()
        .on("calculator")
        .args(&["-j", "4"])
        .passes()
        .stdout_eq(&sequential);
}

/// > A tree without test files produces only the header
#[test]
fn empty_tree_writes_header_only() {
    let temp = Project::empty();
    temp.file("src/main/java/Foo.java", "class Foo {}");

    detect()
        .target(temp.path())
        .passes()
        .stdout_eq(&format!("{HEADER}\n"));
}

/// > The current directory is analyzed when no path is given
#[test]
fn defaults_to_current_directory() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);

    let rows = detect().pwd(temp.path()).passes().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][4], "src/test/java/FooTest.java");
}

// =============================================================================
// OPTIONS
// =============================================================================

/// > --app sets the App column
#[test]
fn app_flag_labels_rows() {
    let rows = detect().on("calculator").args(&["--app", "demo"]).passes().rows();
    assert!(rows[1..].iter().all(|row| row[0] == "demo"));
}

/// > Without a label anywhere the App column reads myApp
#[test]
fn app_defaults_to_my_app() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);

    let rows = detect().target(temp.path()).passes().rows();
    assert_eq!(rows[1][0], "myApp");
}

/// > -o writes the report to a file and nothing to stdout
#[test]
fn output_flag_writes_file() {
    let out = Project::empty();
    let report = out.path().join("report.csv");

    let run = detect()
        .on("calculator")
        .args(&["-o", report.to_str().unwrap()])
        .passes();

    assert_eq!(run.stdout(), "");
    let written = std::fs::read_to_string(&report).unwrap();
    assert!(written.starts_with(HEADER));
    assert_eq!(written.lines().count(), 3);
}

/// > Cells containing commas are quoted by default
#[test]
fn minimal_quoting_wraps_commas() {
    let temp = Project::empty();
    temp.file("src/test/java/a,b/FooTest.java", SIMPLE_TEST);

    detect()
        .target(temp.path())
        .passes()
        .stdout_has(",\"src/test/java/a,b/FooTest.java\",");
}

/// > --quoting none joins cells verbatim
#[test]
fn no_quoting_joins_verbatim() {
    let temp = Project::empty();
    temp.file("src/test/java/a,b/FooTest.java", SIMPLE_TEST);

    detect()
        .target(temp.path())
        .args(&["--quoting", "none"])
        .passes()
        .stdout_has(",src/test/java/a,b/FooTest.java,")
        .stdout_lacks("\"");
}

/// > --timeout accepts human durations
#[test]
fn timeout_flag_accepts_durations() {
    let expected = detect().on("calculator").passes().stdout();
    detect()
        .on("calculator")
        .args(&["--timeout", "30s"])
        .passes()
        .stdout_eq(&expected);
}

// =============================================================================
// FAILURES
// =============================================================================

/// > A missing root exits 3 and writes no report
#[test]
fn missing_root_exits_with_internal_error() {
    let temp = Project::empty();
    let missing = temp.path().join("nope");

    let run = detect()
        .target(&missing)
        .exits(3)
        .stderr_has("smelltab:");
    assert_eq!(run.stdout(), "");
}

/// > A missing root does not leave an empty report file behind
#[test]
fn missing_root_creates_no_output_file() {
    let temp = Project::empty();
    let report = temp.path().join("report.csv");

    detect()
        .target(temp.path().join("nope"))
        .args(&["-o", report.to_str().unwrap()])
        .exits(3);

    assert!(!report.exists());
}

/// > A root that is a file is rejected
#[test]
fn file_root_is_rejected() {
    let temp = Project::empty();
    temp.file("FooTest.java", SIMPLE_TEST);

    detect().target(temp.path().join("FooTest.java")).exits(3);
}

/// > An out-of-range --timeout is an argument error, not a crash
#[test]
fn huge_timeout_is_rejected() {
    detect()
        .on("calculator")
        .args(&["--timeout", "1e30s"])
        .exits(2)
        .stderr_has("out of range");
}
