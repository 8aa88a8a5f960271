//! # Command Line Interface
//!
//! `bascat` prints a tokenized GW-BASIC program as text, taking the file
//! from the command line or from a pipe.

use clap::{arg,crate_version,ArgMatches,Command};
use env_logger;
use log::error;
use thiserror::Error;

type DYNERR = Box<dyn std::error::Error>;

#[derive(Error,Debug)]
enum CommandError {
    #[error("a file must be given unless the program is piped in")]
    NoInput
}

fn main() -> Result<(),DYNERR>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let long_help =
"bascat prints a tokenized GW-BASIC (or BASICA) program as text.
Protected files are deciphered automatically.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
print a program:       `bascat prog.bas`
print from a pipe:     `cat prog.bas | bascat`
save as text:          `bascat prog.bas > prog.txt`";

    let main_cmd = Command::new("bascat")
        .about("Prints tokenized GW-BASIC program files as text.")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!([file] "tokenized program file to print").required(false));
    match run(&main_cmd.get_matches()) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}",e);
            Err(e)
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(),DYNERR> {
    match matches.get_one::<String>("file") {
        Some(path) => print_lines(bascat::line_iter_from_file(path)?),
        None => {
            if atty::is(atty::Stream::Stdin) {
                return Err(Box::new(CommandError::NoInput));
            }
            print_lines(bascat::line_iter_from_stdin()?)
        }
    }
}

fn print_lines<I>(lines: I) -> Result<(),DYNERR>
where I: Iterator<Item = Result<String,DYNERR>>
{
    for line in lines {
        println!("{}",line?);
    }
    Ok(())
}
