use jostle::{
    Axis, Item, LayoutParams, LayoutReport, LayoutRun, Phase, SeededJitter, SeparationMethod,
    SeparationParams,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(jostle::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<jostle::Error> for CliError {
    fn from(value: jostle::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Cluster,
    Rail,
    Snap,
    Separate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    out: Option<String>,
    pretty: bool,
    frames: bool,
    grid: Option<f64>,
    margin: Option<f64>,
    axis: Axis,
    seed: Option<u64>,
    method: Option<SeparationMethod>,
}

/// Input document: either `{"items": [...], "params": {...}}` or a bare item array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Full {
        items: Vec<Item>,
        #[serde(default)]
        params: LayoutParams,
    },
    Bare(Vec<Item>),
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    items: &'a [Item],
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a LayoutReport>,
}

#[derive(Serialize)]
struct FrameOut<'a> {
    step: usize,
    phase: Phase,
    movement: f64,
    positions_changed: bool,
    done: bool,
    items: &'a [Item],
}

fn usage() -> &'static str {
    "jostle-cli\n\
\n\
USAGE:\n\
  jostle-cli [cluster] [--grid <n>] [--margin <n>] [--seed <n>] [--method axis|radial] [--frames] [--pretty] [--out <path>] [<path>|-]\n\
  jostle-cli rail [--axis horizontal|vertical] [--grid <n>] [--margin <n>] [--seed <n>] [--method axis|radial] [--frames] [--pretty] [--out <path>] [<path>|-]\n\
  jostle-cli snap [--grid <n>] [--pretty] [--out <path>] [<path>|-]\n\
  jostle-cli separate [--margin <n>] [--seed <n>] [--method axis|radial] [--pretty] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON item array, or an object with `items` and optional `params`.\n\
  - Items look like {\"position\": [x, y], \"size\": [w, h]}; position is the center.\n\
  - Flags override values given in `params`. A grid of 0 disables snapping.\n\
  - --frames prints one JSON line per layout step instead of the final result.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "cluster" => args.command = Command::Cluster,
            "rail" => args.command = Command::Rail,
            "snap" => args.command = Command::Snap,
            "separate" => args.command = Command::Separate,
            "--pretty" => args.pretty = true,
            "--frames" => args.frames = true,
            "--grid" => {
                let Some(grid) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.grid = Some(grid.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--margin" => {
                let Some(margin) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let margin = margin.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(margin.is_finite() && margin >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.margin = Some(margin);
            }
            "--axis" => {
                let Some(axis) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.axis = axis.parse::<Axis>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--method" => {
                let Some(method) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.method = Some(
                    method
                        .parse::<SeparationMethod>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.frames && matches!(args.command, Command::Snap | Command::Separate) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn read_document(text: &str) -> Result<(Vec<Item>, LayoutParams), CliError> {
    Ok(match serde_json::from_str::<Document>(text)? {
        Document::Full { items, params } => (items, params),
        Document::Bare(items) => (items, LayoutParams::default()),
    })
}

fn open_output(out: Option<&str>) -> Result<Box<dyn Write>, CliError> {
    Ok(match out {
        None | Some("-") => Box::new(std::io::stdout().lock()),
        Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
    })
}

fn write_json(w: &mut dyn Write, value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *w, value)?;
    } else {
        serde_json::to_writer(&mut *w, value)?;
    }
    writeln!(w)?;
    Ok(())
}

fn apply_overrides(params: &mut LayoutParams, args: &Args) {
    if let Some(grid) = args.grid {
        params.grid_size = grid;
    }
    if let Some(margin) = args.margin {
        params.separation_margin = margin;
    }
    if let Some(seed) = args.seed {
        params.random_seed = seed;
    }
    if let Some(method) = args.method {
        params.settle.method = method;
    }
}

/// Steps the run to completion, writing one compact JSON line per step.
fn write_frames(run: &mut LayoutRun, items: &mut [Item], w: &mut dyn Write) -> Result<(), CliError> {
    let mut step_index = 0usize;
    loop {
        let step = run.step(items)?;
        step_index += 1;
        let frame = FrameOut {
            step: step_index,
            phase: step.phase,
            movement: step.movement,
            positions_changed: step.positions_changed,
            done: step.done,
            items: &*items,
        };
        write_json(w, &frame, false)?;
        if !step.keep_going() {
            return Ok(());
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let (mut items, mut params) = read_document(&text)?;
    apply_overrides(&mut params, &args);

    let mut out = open_output(args.out.as_deref())?;
    match args.command {
        Command::Cluster | Command::Rail => {
            let mut layout = match args.command {
                Command::Rail => jostle::run_rail_layout(&items, &params, args.axis)?,
                _ => jostle::run_cluster_layout(&items, &params)?,
            };
            if args.frames {
                write_frames(&mut layout, &mut items, &mut *out)?;
            } else {
                let report = layout.finish(&mut items)?;
                let result = LayoutOut {
                    items: &items,
                    report: Some(&report),
                };
                write_json(&mut *out, &result, args.pretty)?;
            }
        }
        Command::Snap => {
            jostle::snap_to_grid(&mut items, params.grid_size)?;
            let result = LayoutOut {
                items: &items,
                report: None,
            };
            write_json(&mut *out, &result, args.pretty)?;
        }
        Command::Separate => {
            let sep = SeparationParams {
                margin: params.separation_margin,
                method: args.method.unwrap_or_default(),
                ..Default::default()
            };
            let mut jitter = SeededJitter::new(params.random_seed);
            let forces = jostle::separate(&items, &sep, &mut jitter);
            jostle::apply_forces(forces, &mut items);
            let result = LayoutOut {
                items: &items,
                report: None,
            };
            write_json(&mut *out, &result, args.pretty)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
