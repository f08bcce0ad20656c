//! The longdiv app. For the conversions themselves, see [liblongdiv's documentation](liblongdiv).

#![deny(warnings)]
#![deny(missing_docs)]

mod diagnostics;
use diagnostics::{emit_longdiv_diagnostics, sanitize_source_for_diagnostics};

use clap::value_t;
use liblongdiv::diagnostics::Diagnostic;
use liblongdiv::{
    evaluate, ConversionOptions, Emit, EmitConfig, EmitFormat, EvaluationResult,
    DEFAULT_DECIMAL_PLACES, DEFAULT_ELLIPSIS_WIDTH, DEFAULT_MAX_DIGITS, DEFAULT_MAX_STEPS,
};

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

// For wasm, use wee_alloc as a global allocator.
#[cfg(all(feature = "wasm", not(test)))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Options to run longdiv with.
#[cfg_attr(feature = "wasm", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Opts {
    /// A fraction like `1/6` or a decimal like `0.1(6)`.
    pub input: String,
    /// How the result of the conversion should be emitted.
    pub emit_format: String,
    /// Configuration options for longdiv emit.
    pub emit_config: Vec<String>,
    /// Number of fractional digits the long division quotient is rounded to.
    pub places: usize,
    /// Number of fractional digits generated before an expansion is declared truncated.
    pub max_digits: usize,
    /// Cap on the steps of the long division.
    pub max_steps: usize,
    /// Number of characters the repeating block is tiled over in the ellipsis rendering.
    pub ellipsis_width: usize,
    /// When is [Some](Option::Some) diagnostic code, will explain that code.
    pub explain_diagnostic: Option<String>,
    /// When true, longdiv emit will be colored.
    pub color: bool,
}

impl Opts {
    fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions::default()
            .decimal_places(self.places)
            .max_digits(self.max_digits)
            .max_steps(self.max_steps)
            .ellipsis_width(self.ellipsis_width)
    }
}

/// Parses [Opts](self::Opts) from the command line or given a parser that acts on the clap
/// [App](clap::App).
pub fn get_opts<P>(parser: P, color: bool) -> Result<Opts, clap::Error>
where
    P: for<'a> FnOnce(clap::App<'a, '_>) -> Result<clap::ArgMatches<'a>, clap::Error>,
{
    let default_places = DEFAULT_DECIMAL_PLACES.to_string();
    let default_max_digits = DEFAULT_MAX_DIGITS.to_string();
    let default_max_steps = DEFAULT_MAX_STEPS.to_string();
    let default_ellipsis_width = DEFAULT_ELLIPSIS_WIDTH.to_string();

    let app = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("input")
                .help("Fraction or decimal to convert, like \"1/6\" or \"0.1(6)\"")
                .required(true)
                .default_value_if("explain", None, ""),
        )
        .arg(
            clap::Arg::with_name("output-form")
                .short("-o")
                .long("--output-form")
                .next_line_help(true)
                .help(
                    "longdiv emit format. Possible values:\n\
                    \tpretty: Human-readable text, like \"decimal:    0.1(6)\".\n\
                    \tjson:   The full conversion result and its diagnostics as JSON.\n\
                    \tdebug:  Opaque internal representation. Note: this format is not stable.\n\
                    ",
                )
                .hide_possible_values(true)
                .default_value("pretty")
                .takes_value(true)
                .possible_values(&["pretty", "json", "debug"]),
        )
        .arg(
            clap::Arg::with_name("emit-config")
                .long("--emit-config")
                .next_line_help(true)
                .help(
                    "Emit configuration options. Possible values:\n\
                    \ttrace      (pretty): Lay out the long division as it is written by hand.\n\
                    \tderivation (pretty): Show how a decimal is turned into a fraction.\n\
                    ",
                )
                .hide_possible_values(true)
                .takes_value(true)
                .possible_values(&["trace", "derivation"])
                .multiple(true),
        )
        .arg(
            clap::Arg::with_name("places")
                .short("-p")
                .long("--places")
                .help("Number of decimal places the long division quotient is rounded to.")
                .takes_value(true)
                .default_value(&default_places),
        )
        .arg(
            clap::Arg::with_name("max-digits")
                .long("--max-digits")
                .help("Number of digits searched for a repeating block before giving up.")
                .takes_value(true)
                .default_value(&default_max_digits),
        )
        .arg(
            clap::Arg::with_name("max-steps")
                .long("--max-steps")
                .help("Maximum number of steps in the long division.")
                .takes_value(true)
                .default_value(&default_max_steps),
        )
        .arg(
            clap::Arg::with_name("ellipsis-width")
                .long("--ellipsis-width")
                .help("Number of repeating digits shown before \"...\", at least 1.")
                .takes_value(true)
                .default_value(&default_ellipsis_width),
        )
        .arg(
            clap::Arg::with_name("explain")
                .long("--explain")
                .value_name("diagnostic")
                .help("Provide a detailed explanation for a diagnostic code.")
                .takes_value(true),
        );
    let matches = parser(app)?;

    Ok(Opts {
        input: matches.value_of("input").unwrap_or_default().into(),
        emit_format: matches.value_of("output-form").unwrap_or("pretty").into(),
        emit_config: matches
            .values_of("emit-config")
            .map(|opts| opts.map(str::to_owned).collect())
            .unwrap_or_default(),
        places: value_t!(matches, "places", usize)?,
        max_digits: value_t!(matches, "max-digits", usize)?,
        max_steps: value_t!(matches, "max-steps", usize)?,
        ellipsis_width: value_t!(matches, "ellipsis-width", usize)?,
        explain_diagnostic: matches.value_of("explain").map(str::to_owned),
        color,
    })
}

/// Output of a longdiv execution.
#[cfg_attr(feature = "wasm", derive(Serialize, Deserialize))]
#[derive(Default, Debug)]
pub struct LongdivResult {
    /// Exit code
    pub code: i32,
    /// Emit for stdout
    pub stdout: String,
    /// Emit for stderr
    pub stderr: String,
    /// Whether the stdout should be emit as paged
    pub page: bool,
}

/// Builds a [LongdivResult](self::LongdivResult).
struct LongdivResultBuilder<'a> {
    /// File the input is defined in. [None](Option::None) if the input comes from a side
    /// channel like the command line.
    file: Option<&'a str>,
    /// Input sanitized for diagnostic emission.
    sanitized_input: String,
    emit_format: EmitFormat,
    emit_config: EmitConfig,
    color: bool,
    stdout: String,
    stderr: String,
    page: bool,
}

impl<'a> LongdivResultBuilder<'a> {
    fn new(
        file: Option<&'a str>,
        input: &'a str,
        emit_format: impl Into<EmitFormat>,
        emit_config: impl Into<EmitConfig>,
        color: bool,
    ) -> Self {
        Self {
            file,
            sanitized_input: sanitize_source_for_diagnostics(input),
            emit_format: emit_format.into(),
            emit_config: emit_config.into(),
            color,
            page: false,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn emit(&mut self, obj: &dyn Emit) {
        self.stdout
            .push_str(&obj.emit(self.emit_format, self.emit_config));
    }

    fn err(&mut self, diagnostics: &[Diagnostic]) {
        self.stderr.push_str(&emit_longdiv_diagnostics(
            self.file,
            &self.sanitized_input,
            diagnostics,
            self.color,
        ));
    }

    fn page(&mut self, page: bool) {
        self.page = page;
    }

    fn finish(self, code: i32) -> LongdivResult {
        LongdivResult {
            code,
            stdout: self.stdout,
            stderr: self.stderr,
            page: self.page,
        }
    }

    fn ok(self) -> LongdivResult {
        self.finish(0)
    }

    fn failed(self) -> LongdivResult {
        self.finish(1)
    }
}

/// Runs longdiv end-to-end.
///
/// Exits with 1 when the input has no result; warnings alone, like a truncated expansion, keep
/// the exit code at 0.
pub fn run_longdiv(opts: Opts) -> LongdivResult {
    let options = opts.conversion_options();
    let is_json = opts.emit_format == "json";
    let mut result = LongdivResultBuilder::new(
        None, // file: inputs can only be read from the command line
        &opts.input,
        opts.emit_format.as_str(),
        opts.emit_config.clone(),
        opts.color,
    );

    if let Some(diag_code) = &opts.explain_diagnostic {
        let codes = Diagnostic::all_codes_with_explanations();
        return match codes.get::<str>(diag_code) {
            Some(explanation) => {
                result.stdout.push_str(&explanation);
                result.page(true);
                result.ok()
            }
            None => {
                result
                    .stderr
                    .push_str(&format!("{} is not a diagnostic code", diag_code));
                result.failed()
            }
        };
    }

    let evaluation = evaluate(&opts.input, &options);
    let fatal = evaluation.diagnostics.iter().any(Diagnostic::is_fatal);
    result.err(&evaluation.diagnostics);

    if is_json {
        match serde_json::to_string_pretty(&evaluation) {
            Ok(json) => result.stdout.push_str(&json),
            Err(e) => {
                result.stderr.push_str(&e.to_string());
                return result.failed();
            }
        }
    } else if let EvaluationResult {
        result: Some(converted),
        ..
    } = &evaluation
    {
        result.emit(converted);
    }

    if fatal {
        result.failed()
    } else {
        result.ok()
    }
}

/// Runs longdiv through a wasm entry point.
/// `opts` must be a JS object with the same fields as [Opts](self::Opts).
/// Returns a JS object with the same fields as [LongdivResult](self::LongdivResult).
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn run_longdiv_wasm(opts: JsValue) -> JsValue {
    let result = match opts.into_serde::<Opts>() {
        Ok(opts) => run_longdiv(opts),
        Err(e) => LongdivResult {
            code: 1,
            stderr: e.to_string(),
            ..LongdivResult::default()
        },
    };
    JsValue::from_serde(&result).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> LongdivResult {
        let argv = std::iter::once("longdiv").chain(args.iter().copied());
        let opts = get_opts(|app| app.get_matches_from_safe(argv), false).unwrap();
        run_longdiv(opts)
    }

    #[test]
    fn defaults() {
        let opts = get_opts(|app| app.get_matches_from_safe(vec!["longdiv", "1/3"]), false)
            .unwrap();
        assert_eq!(opts.input, "1/3");
        assert_eq!(opts.emit_format, "pretty");
        assert!(opts.emit_config.is_empty());
        assert_eq!(opts.places, DEFAULT_DECIMAL_PLACES);
        assert_eq!(opts.max_digits, DEFAULT_MAX_DIGITS);
        assert_eq!(opts.max_steps, DEFAULT_MAX_STEPS);
        assert_eq!(opts.ellipsis_width, DEFAULT_ELLIPSIS_WIDTH);
        assert_eq!(opts.explain_diagnostic, None);
    }

    #[test]
    fn negative_input_after_separator() {
        let opts = get_opts(
            |app| app.get_matches_from_safe(vec!["longdiv", "--", "-1.25"]),
            false,
        )
        .unwrap();
        assert_eq!(opts.input, "-1.25");
    }

    #[test]
    fn rejects_non_numeric_places() {
        let opts = get_opts(
            |app| app.get_matches_from_safe(vec!["longdiv", "-p", "many", "1/3"]),
            false,
        );
        assert!(opts.is_err());
    }

    #[test]
    fn pretty() {
        let result = run(&["1/4"]);
        assert_eq!(result.code, 0);
        assert!(result.stderr.is_empty());
        assert!(result.stdout.contains("decimal:    0.25"));
    }

    #[test]
    fn division_by_zero_fails() {
        let result = run(&["1/0"]);
        assert_eq!(result.code, 1);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("error[D0003]: Division by zero"));
    }

    #[test]
    fn truncation_is_a_warning() {
        let result = run(&["--max-digits", "10", "1/97"]);
        assert_eq!(result.code, 0);
        assert!(result.stdout.contains("truncated:  yes"));
        assert!(result.stderr.contains("warning[D0004]"));
    }

    #[test]
    fn trace_cap_is_a_warning() {
        let result = run(&["--max-steps", "3", "--emit-config", "trace", "1/7"]);
        assert_eq!(result.code, 0);
        assert!(result.stdout.contains("1 / 7 = 0.14..."));
        assert!(result.stderr.contains("warning[D0007]: Long division truncated"));
        assert!(result.stderr.contains("division stopped after 3 steps"));
    }

    #[test]
    fn json() {
        let result = run(&["-o", "json", "1/6"]);
        assert_eq!(result.code, 0);
        let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
        assert_eq!(json["result"]["decimal_pretty"], "0.1(6)");
        assert_eq!(json["result"]["percentage"], "16.67%");
        assert_eq!(json["result"]["is_repeating"], true);
        assert_eq!(json["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn json_failure() {
        let result = run(&["-o", "json", "0.1(2"]);
        assert_eq!(result.code, 1);
        let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
        assert!(json["result"].is_null());
        assert_eq!(json["diagnostics"][0]["code"], "D0002");
    }

    #[test]
    fn explain() {
        let result = run(&["--explain", "D0003"]);
        assert_eq!(result.code, 0);
        assert!(result.page);
        assert!(result.stdout.starts_with("A fraction or long division"));

        let result = run(&["--explain", "D9999"]);
        assert_eq!(result.code, 1);
        assert_eq!(result.stderr, "D9999 is not a diagnostic code");
    }
}
