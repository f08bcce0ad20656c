use difference::{Changeset, Difference};
use libtest_mimic::{run_tests, Arguments, Outcome, Test};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[macro_use]
mod common;
mod json_emit_test;

use common::*;
use exec::*;
use json_emit_test::JsonEmitTest;
use longdiv_emit_test::LongdivEmitTest;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let test_files = collect_test_files()?;
    let tests = test_files.into_iter().flat_map(TestCase::new).collect();
    run_tests(&args, tests, TestCase::drive_test).exit();
}

/// Collects all `.longdiv` system test files, starting from longdiv/src/test and visiting all
/// nested directories.
fn collect_test_files() -> Result<Vec<Test<PathBuf>>, Box<dyn Error>> {
    let root_test_path = Path::new("src/test");
    let mut dirs_to_visit = vec![root_test_path.to_path_buf()];
    let mut tests = Vec::with_capacity(32);
    while let Some(dir) = dirs_to_visit.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let entry_type = entry.file_type()?;
            if entry_type.is_dir() {
                dirs_to_visit.push(path);
                continue;
            }
            if path.extension() == Some(OsStr::new("longdiv")) {
                let name = path.strip_prefix(root_test_path)?.display().to_string();

                tests.push(Test {
                    name,
                    kind: "system".to_owned(),
                    is_ignored: false,
                    is_bench: false,
                    data: path,
                });
            }
        }
    }
    tests.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tests)
}

#[derive(Clone)]
struct TestCase {
    path: PathBuf,
    variant: TestCaseVariant,
}

impl TestCase {
    /// Executes a longdiv system test.
    fn drive_test(test: &Test<Self>) -> Outcome {
        let test_name = test.name.clone();
        let test_path = test.data.path.clone();
        match test.data.variant.clone() {
            TestCaseVariant::FailedTestConstruction(msg) => fail!(msg),
            TestCaseVariant::LongdivEmit(tc) => tc.drive_test(test_name, test_path),
            TestCaseVariant::JsonEmit(tc) => tc.drive_test(test_name, test_path),
        }
    }

    /// Creates a set of test cases from a longdiv system test file.
    fn new(test_file: Test<PathBuf>) -> Vec<Test<Self>> {
        let mut cases = Vec::with_capacity(2);
        let mut builder = TestCaseBuilder::new(&mut cases, &test_file);

        let content = match fs::read_to_string(&test_file.data) {
            Ok(content) => content,
            Err(e) => {
                builder.add(TestCaseVariant::FailedTestConstruction(e.to_string()));
                return cases;
            }
        };

        let longdiv_emit_test = match LongdivEmitTest::new(&test_file, content) {
            Ok(test) => test,
            Err(failed_test) => {
                builder.add(TestCaseVariant::FailedTestConstruction(failed_test));
                return cases;
            }
        };

        if JsonEmitTest::applies_to(&longdiv_emit_test) {
            builder.add_suffixed(JsonEmitTest::from(&longdiv_emit_test), " json emit");
        }

        builder.add(longdiv_emit_test);
        cases
    }
}

struct TestCaseBuilder<'a> {
    collector: &'a mut Vec<Test<TestCase>>,
    test_file: &'a Test<PathBuf>,
}

impl<'a> TestCaseBuilder<'a> {
    fn new(collector: &'a mut Vec<Test<TestCase>>, test_file: &'a Test<PathBuf>) -> Self {
        Self {
            collector,
            test_file,
        }
    }

    fn add(&mut self, test_case: impl Into<TestCaseVariant>) {
        self.add_suffixed(test_case, "");
    }

    fn add_suffixed(&mut self, test_case: impl Into<TestCaseVariant>, suffix: &str) {
        self.collector.push(Test {
            name: format!("{}{}", self.test_file.name, suffix),
            data: TestCase {
                path: self.test_file.data.clone(),
                variant: test_case.into(),
            },
            kind: "system".to_owned(),
            is_ignored: false,
            is_bench: false,
        });
    }
}

#[derive(Clone)]
enum TestCaseVariant {
    LongdivEmit(LongdivEmitTest),
    JsonEmit(JsonEmitTest),
    FailedTestConstruction(String),
}

macro_rules! variant_from_test {
    ($($variant:ident from $test:ident)*) => {$(
        impl From<$test> for TestCaseVariant {
            fn from(test: $test) -> Self {
                Self::$variant(test)
            }
        }
    )*};
}

variant_from_test! {
    LongdivEmit from LongdivEmitTest
    JsonEmit from JsonEmitTest
}

/// Returns the command to bless a test file.
fn get_bless_cmd(test_name: &str) -> String {
    format!(
        "BLESS=1 cargo test -p longdiv --test system_tests -- \"{}\"",
        test_name
    )
}
