use super::*;

/// A test derived from a passing pretty-emit test: the JSON emit of the same input must carry the
/// same values the pretty emit shows.
#[derive(Clone)]
pub struct JsonEmitTest {
    args: String,
    input: String,
    /// Pretty stdout of the test this one is derived from.
    pretty: String,
}

impl From<&LongdivEmitTest> for JsonEmitTest {
    fn from(test: &LongdivEmitTest) -> Self {
        Self {
            args: format!("{}\n-o json", test.args),
            input: test.input.clone(),
            pretty: test.stdout.clone(),
        }
    }
}

/// Pretty-emit labels and the JSON fields they render.
const FIELDS: &[(&str, &str)] = &[
    ("fraction:", "fraction"),
    ("simplified:", "simplified_fraction"),
    ("decimal:", "decimal_pretty"),
    ("ellipsis:", "decimal_ellipsis"),
    ("percentage:", "percentage"),
];

impl JsonEmitTest {
    /// Whether a pretty-emit test can be checked against its JSON emit.
    pub fn applies_to(test: &LongdivEmitTest) -> bool {
        test.exitcode.trim() == "0"
            && !test.args.contains("-o")
            && !test.args.contains("--explain")
    }

    /// Executes a JSON emit test, ensuring every value of the pretty emit matches the
    /// corresponding field of the JSON emit.
    pub fn drive_test(self, _test_name: String, test_path: PathBuf) -> Outcome {
        let (stdout, _stderr, _exitcode) = match exec_longdiv(&self.args, &self.input) {
            Ok(res) => res,
            Err(outcome) => return outcome,
        };

        let json: serde_json::Value = match serde_json::from_str(&stdout) {
            Ok(json) => json,
            Err(e) => {
                return print_fail! {
                    Failure:    "JSON emit of {} does not parse: {}",
                                real_path!(test_path.display()), e;
                };
            }
        };
        let result = &json["result"];

        let mut msg = String::new();
        for line in self.pretty.lines() {
            let field = FIELDS
                .iter()
                .find(|(label, _)| line.starts_with(label))
                .map(|(label, field)| (line[label.len()..].trim(), *field));
            let (expected, field) = match field {
                Some(field) => field,
                None => continue,
            };

            let actual = match &result[field] {
                serde_json::Value::String(s) => s.clone(),
                fraction @ serde_json::Value::Object(_) => format!(
                    "{}/{}",
                    fraction["numerator"].as_str().unwrap_or_default(),
                    fraction["denominator"].as_str().unwrap_or_default()
                ),
                other => other.to_string(),
            };
            if actual != expected {
                msg.push_str(&format!(
                    "Mismatch in {}: pretty emit has {:?}, JSON emit has {:?}\n",
                    field, expected, actual
                ));
            }
        }

        if msg.is_empty() {
            Outcome::Passed
        } else {
            fail!(msg)
        }
    }
}
