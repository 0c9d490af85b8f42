extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate ipparse;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use ipparse::frontend;
use ipparse::frontend::ast::Program;
use ipparse::frontend::stats::{self, Stat};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Bad or conflicting command-line parameters.
const EXIT_PARAMETERS: i32 = 10;
/// The input file cannot be opened.
const EXIT_INPUT: i32 = 11;
/// An output file cannot be created or written.
const EXIT_OUTPUT: i32 = 12;

const STAT_FLAGS: [(&str, Stat); 4] = [
    ("loc", Stat::Loc),
    ("comments", Stat::Comments),
    ("labels", Stat::Labels),
    ("jumps", Stat::Jumps),
];

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tOutfile: {}\n\tInfile: {}\n\tStats: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("<stdin>"),
        args.value_of("stats").unwrap_or("None")
    );

    let requested = requested_stats(&args);
    if !requested.is_empty() && !args.is_present("stats") {
        error!("fatal: --loc, --comments, --labels and --jumps require --stats=FILE");
        std::process::exit(EXIT_PARAMETERS);
    }

    let reader: Box<dyn BufRead> = match args.value_of("INPUT") {
        Some(ifile) => {
            let ipath = Path::new(ifile);
            match File::open(&ipath) {
                Err(err) => {
                    error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
                    std::process::exit(EXIT_INPUT);
                },
                Ok(file) => Box::new(BufReader::new(file)),
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let program = match frontend::parse(reader) {
        Ok(program) => program,
        Err(err) => {
            error!("fatal: {}", err);
            std::process::exit(err.exit_code());
        },
    };

    if args.is_present("print-debug") {
        eprintln!("{}", listing(&program));
    }

    let document = frontend::xml::serialize(&program);
    let written = match args.value_of("output") {
        Some(filename) => File::create(filename)
            .and_then(|mut ofile| ofile.write_all(document.as_bytes())),
        None => io::stdout().write_all(document.as_bytes()),
    };
    if let Err(err) = written {
        error!("fatal: unable to write the program to `{}`: {}",
            args.value_of("output").unwrap_or("<stdout>"), err);
        std::process::exit(EXIT_OUTPUT);
    }

    if let Some(filename) = args.value_of("stats") {
        let measured = stats::extract(&program);
        info!("statistics: {:?}", measured);
        let written = File::create(filename)
            .and_then(|mut sfile| stats::write_stats(&mut sfile, &measured, &requested));
        if let Err(err) = written {
            error!("fatal: unable to write statistics file `{}`: {}", filename, err);
            std::process::exit(EXIT_OUTPUT);
        }
    }
}

/// Collects the statistics flags in the order they were given.
fn requested_stats(args: &ArgMatches) -> Vec<Stat> {
    let mut requested: Vec<(usize, Stat)> = Vec::new();
    for (flag, stat) in STAT_FLAGS.iter() {
        if let Some(indices) = args.indices_of(flag) {
            requested.extend(indices.map(|idx| (idx, *stat)));
        }
    }
    requested.sort_by_key(|(idx, _)| *idx);
    requested.into_iter().map(|(_, stat)| stat).collect()
}

fn listing(program: &Program) -> String {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, ins) in program.instructions().iter().enumerate() {
        grid.add(Cell::from(format!("{:>4}:", idx + 1)));
        grid.add(Cell::from(format!("{}", ins.opcode())));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(ins.operands().iter().map(|arg| arg.to_string()).collect::<Vec<_>>().join(" ")));
    }

    grid.fit_into_columns(4).to_string()
}

fn process_arguments() -> ArgMatches<'static> {
    let app = App::new(option_env!("CARGO_PKG_NAME").unwrap_or("ipparse"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use, reads STDIN when omitted")
            .required(false)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the XML program to an outfile instead of STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .takes_value(false)
            .help("prints a listing of the parsed instructions to STDERR"))
        .arg(Arg::with_name("stats")
            .long("stats")
            .takes_value(true)
            .value_name("FILE")
            .help("writes the requested statistics to FILE, one per line"))
        .arg(Arg::with_name("loc")
            .long("loc")
            .multiple(true)
            .takes_value(false)
            .help("statistic: number of instructions"))
        .arg(Arg::with_name("comments")
            .long("comments")
            .multiple(true)
            .takes_value(false)
            .help("statistic: number of comments"))
        .arg(Arg::with_name("labels")
            .long("labels")
            .multiple(true)
            .takes_value(false)
            .help("statistic: number of distinct labels"))
        .arg(Arg::with_name("jumps")
            .long("jumps")
            .multiple(true)
            .takes_value(false)
            .help("statistic: number of jump, call and return instructions"));

    match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => match err.kind {
            clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed => err.exit(),
            _ => {
                eprintln!("{}", err.message);
                std::process::exit(EXIT_PARAMETERS);
            },
        },
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(argv: &[&str]) -> ArgMatches<'static> {
        App::new("ipparse")
            .arg(Arg::with_name("stats").long("stats").takes_value(true))
            .arg(Arg::with_name("loc").long("loc").multiple(true))
            .arg(Arg::with_name("comments").long("comments").multiple(true))
            .arg(Arg::with_name("labels").long("labels").multiple(true))
            .arg(Arg::with_name("jumps").long("jumps").multiple(true))
            .get_matches_from(argv.iter().copied())
    }

    #[test]
    fn test_requested_stats_keeps_command_line_order() {
        let args = matches(&["ipparse", "--stats=out", "--jumps", "--loc", "--comments", "--jumps"]);
        assert_eq!(requested_stats(&args), vec![Stat::Jumps, Stat::Loc, Stat::Comments, Stat::Jumps]);

        let args = matches(&["ipparse", "--stats=out"]);
        assert!(requested_stats(&args).is_empty());
    }

    #[test]
    fn test_listing() {
        let program = frontend::parse(".IPPcode20\nMOVE GF@x int@1\n".as_bytes()).unwrap();
        let text = listing(&program);
        assert!(text.contains("MOVE"));
        assert!(text.contains("var@GF@x int@1"));
    }
}
