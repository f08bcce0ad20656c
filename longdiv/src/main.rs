use longdiv::{get_opts, run_longdiv, LongdivResult};
use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use termcolor::{BufferedStandardStream, ColorChoice, WriteColor};

fn main_impl() -> Result<(), Box<dyn std::error::Error>> {
    let mut ch_stdout = BufferedStandardStream::stdout(ColorChoice::Auto);
    let mut ch_stderr = BufferedStandardStream::stderr(ColorChoice::Auto);
    let is_tty = atty::is(atty::Stream::Stderr);
    let use_color = is_tty && ch_stderr.supports_color();

    let opts = match get_opts(|app| app.get_matches_safe(), use_color) {
        Ok(opts) => opts,
        // Prints help, version, and usage errors, then exits.
        Err(e) => e.exit(),
    };
    let LongdivResult {
        code,
        stdout,
        stderr,
        page,
    } = run_longdiv(opts);

    if !stderr.is_empty() {
        writeln!(ch_stderr, "{}", stderr)?;
        ch_stderr.flush()?;
    }
    if !stdout.is_empty() {
        print_stdout(&stdout, &mut ch_stdout, page)?;
    }

    std::process::exit(code)
}

/// Shows `stdout` through `$PAGER` when `page` is set, like `rustc --explain` does. Falls back
/// to plain printing if the pager cannot be run.
fn print_stdout(
    stdout: &str,
    ch_stdout: &mut BufferedStandardStream,
    page: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if page && show_in_pager(stdout) {
        return Ok(());
    }
    writeln!(ch_stdout, "{}", stdout)?;
    ch_stdout.flush()?;
    Ok(())
}

/// Pipes `content` into the user's pager. Returns whether the pager showed it.
fn show_in_pager(content: &str) -> bool {
    let default_pager = if cfg!(windows) { "more.com" } else { "less" };
    let pager = env::var_os("PAGER").unwrap_or_else(|| OsString::from(default_pager));

    let mut child = match Command::new(pager).stdin(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(_) => return false,
    };
    let written = child
        .stdin
        .as_mut()
        .map_or(true, |pipe| pipe.write_all(content.as_bytes()).is_ok());
    // Close stdin so the pager sees EOF.
    drop(child.stdin.take());
    child.wait().is_ok() && written
}

fn main() {
    let out = std::panic::catch_unwind(main_impl);

    match out {
        Ok(Err(e)) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        Err(..) => {
            eprint!("\nnote: you found an internal longdiv error!\n");
            eprint!("\nnote: we would appreciate a bug report with the input that caused it.\n");
            std::process::exit(2);
        }
        Ok(Ok(())) => {}
    }
}
