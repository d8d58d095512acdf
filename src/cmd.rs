use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

/// Execute a configured build command in the project root.
///
/// Child output is piped and echoed to stderr in verbose mode; stdout is
/// reserved for the archive report.
pub fn execute(ctx: &Context, program: &str, args: &[&str]) -> Result<()> {
    if ctx.verbose {
        eprintln!("Executing: {} {}", program, args.join(" "));
    }

    let mut child = Command::new(program)
        .args(args)
        .current_dir(&ctx.root_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(|l| l.ok()) {
            if ctx.verbose {
                eprintln!("{}", line);
            }
        }
    }

    if let Some(stderr) = child.stderr.take() {
        let reader = BufReader::new(stderr);
        for line in reader.lines().map_while(|l| l.ok()) {
            if ctx.verbose {
                eprintln!("{}", line);
            }
        }
    }

    let status = child.wait()?;

    if !status.success() {
        return Err(Error::CommandFailed(format!(
            "{} {} failed with exit code: {}",
            program,
            args.join(" "),
            status.code().unwrap_or(-1)
        )));
    }

    Ok(())
}
