use lazy_static::lazy_static;

lazy_static! {
    pub static ref BLESS: bool = std::env::var("BLESS") == Ok("1".into());
    pub static ref FAIL_TODO: bool = std::env::var("FAIL_TODO") == Ok("1".into());
}

macro_rules! prefix_severity {
    (Suggestion, $content:expr) => {
        format!("Hint: {}", $content)
    };

    ($other:ident, $content:expr) => {
        $content
    };
}

/// Builds a failed outcome from lines of a severity, like
///
/// ```text
/// print_fail! {
///     Failure:    "{} clause missing in test case.", clause;
///     Suggestion: "Add it.";
/// }
/// ```
macro_rules! print_fail {
    ($($severity:ident: $($content:expr),*;)*) => {{
        let mut msg = String::new();
        $(
            msg.push_str(&prefix_severity!($severity, format!($($content),*)));
            msg.push('\n');
        )*
        fail!(msg)
    }};
}

macro_rules! fail {
    ($msg:expr) => {
        libtest_mimic::Outcome::Failed { msg: Some($msg) }
    };
}

macro_rules! real_path {
    ($path:expr) => {
        format!("longdiv/{}", $path)
    };
}
