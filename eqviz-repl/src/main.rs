mod error;

use clap::Parser;
use eqviz_analysis::{
    analyze,
    sample,
    sample_curve,
    sample_parametric,
    AnalysisOptions,
    AnalysisResult,
    Curve,
    MeshGrid,
    Report,
};
use eqviz_compute::{parse, ParsedExpression};
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use serde::Serialize;
use std::{io::{self, IsTerminal, Read, Write}, process::ExitCode};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

#[derive(Parser)]
#[command(name = "eqviz")]
#[command(about = "Analyze functions of two variables, z = f(x, y)")]
struct Args {
    /// Analyze this expression and exit, instead of reading expressions interactively or from
    /// stdin.
    #[arg(long)]
    expr: Option<String>,

    /// Print the results as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    /// Include the sampled mesh in the JSON output.
    #[arg(long, requires = "json")]
    mesh: bool,

    /// Include samples along the `x` axis, with `y = 0`, in the JSON output.
    #[arg(long, requires = "json")]
    curve: bool,

    /// Include samples along the path `x = t`, `y = sin(t)` for `t` in `[0, 2 pi]` in the JSON
    /// output.
    #[arg(long, requires = "json")]
    path: bool,

    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    x_min: f64,

    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    x_max: f64,

    #[arg(long, default_value_t = -5.0, allow_negative_numbers = true)]
    y_min: f64,

    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    y_max: f64,

    /// Number of mesh samples along each axis.
    #[arg(long, default_value_t = 50)]
    resolution: usize,

    /// Distance between candidates of the critical point scan.
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Largest first derivative accepted at a critical point.
    #[arg(long, default_value_t = 0.1)]
    tolerance: f64,
}

impl Args {
    fn options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .domain(self.x_min, self.x_max, self.y_min, self.y_max)
            .resolution(self.resolution)
            .scan_step(self.step)
            .tolerance(self.tolerance)
    }
}

/// Everything printed for one expression in JSON mode.
#[derive(Serialize)]
struct Output<'a> {
    input: &'a str,
    expression: &'a ParsedExpression,
    analysis: &'a AnalysisResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    mesh: Option<MeshGrid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<Curve>,

    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Curve>,
}

/// Parses and analyzes the given input, printing the results.
fn analyze_input(input: &str, args: &Args) -> Result<(), Error> {
    let opts = args.options();
    let expr = parse(input);
    if !expr.is_valid {
        expr.report_errors_to_stderr("input")?;
    }

    let analysis = analyze(&expr, &opts);

    if args.json {
        let domain = opts.domain;
        let mesh = args.mesh
            .then(|| sample(&expr, domain.x_min, domain.x_max, domain.y_min, domain.y_max, opts.resolution))
            .transpose()?;
        let curve = args.curve
            .then(|| sample_curve(&expr, domain.x_min, domain.x_max, opts.resolution))
            .transpose()?;
        let path = args.path
            .then(|| sample_parametric(&expr, opts.resolution))
            .transpose()?;
        let output = Output { input, expression: &expr, analysis: &analysis, mesh, curve, path };

        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &output)?;
        writeln!(stdout)?;
    } else {
        println!("{}", Report::new(input, &analysis));
    }

    Ok(())
}

/// Analyzes one expression per non-empty line of the input.
fn analyze_lines(input: &str, args: &Args) -> Result<(), Error> {
    input.lines()
        .filter(|line| !line.trim().is_empty())
        .try_for_each(|line| analyze_input(line, args))
}

/// Reads expressions from the terminal until end of input, analyzing each one.
fn repl(args: &Args) -> Result<(), Error> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, args: &Args) -> Result<(), Error> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        // a bad mesh request should not end the session
        if let Err(err) = analyze_input(&input, args) {
            eprintln!("{}", err);
        }
        Ok(())
    }

    loop {
        match process_line(&mut rl, args) {
            Ok(()) => (),
            Err(Error::Readline(ReadlineError::Eof | ReadlineError::Interrupted)) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    if let Some(expr) = &args.expr {
        analyze_input(expr, args)
    } else if !io::stdin().is_terminal() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        analyze_lines(&input, args)
    } else {
        repl(args)
    }
}

fn main() -> ExitCode {
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use eqviz_analysis::Domain;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn default_options() {
        let opts = Args::parse_from(["eqviz"]).options();
        let defaults = AnalysisOptions::default();
        assert_eq!(opts.domain, defaults.domain);
        assert_eq!(opts.resolution, defaults.resolution);
        assert_eq!(opts.scan_step, defaults.scan_step);
        assert_eq!(opts.tolerance, defaults.tolerance);
    }

    #[test]
    fn negative_bounds() {
        let args = Args::parse_from(["eqviz", "--expr", "x*y", "--x-min", "-2", "--y-min", "-1.5", "--json", "--mesh"]);
        assert_eq!(args.options().domain, Domain::new(-2.0, 5.0, -1.5, 5.0));
        assert!(args.json && args.mesh);
    }

    #[test]
    fn samples_require_json() {
        for flag in ["--mesh", "--curve", "--path"] {
            assert!(Args::try_parse_from(["eqviz", flag]).is_err());
            assert!(Args::try_parse_from(["eqviz", "--json", flag]).is_ok());
        }
    }

    #[test]
    fn samples_in_output() {
        let args = Args::parse_from(["eqviz", "--json", "--curve", "--path", "--resolution", "4"]);
        let opts = args.options();
        let expr = parse("x + y");
        let analysis = analyze(&expr, &opts);
        let output = Output {
            input: "x + y",
            expression: &expr,
            analysis: &analysis,
            mesh: None,
            curve: sample_curve(&expr, opts.domain.x_min, opts.domain.x_max, opts.resolution).ok(),
            path: sample_parametric(&expr, opts.resolution).ok(),
        };

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("mesh").is_none());
        assert_eq!(json["curve"]["x"].as_array().map(Vec::len), Some(8));
        assert_eq!(json["path"]["z"].as_array().map(Vec::len), Some(4));
    }
}
