#[macro_use] extern crate clap;
#[macro_use] extern crate log;

use chartsmith::*;
use clap::{Arg, App, AppSettings, SubCommand, ArgMatches};
use std::path::Path;
use std::process;

fn print_error_debug(e: &Error) {
    // unwind the error chain
    for e in e.iter().skip(1) {
        warn!("caused by: {}", e);
    }
}

fn source_args<'a, 'b>(cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.arg(Arg::with_name("file")
            .short("f")
            .long("file")
            .takes_value(true)
            .conflicts_with("example")
            .help("Application descriptor (defaults to $CHARTSMITH_DESCRIPTOR or ./app.json)"))
        .arg(Arg::with_name("example")
            .long("example")
            .help("Use the built-in example descriptor"))
}

fn main() {
    let app = App::new("chartsmith")
        .version(crate_version!())
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::ColoredHelp)
        .setting(AppSettings::DeriveDisplayOrder)
        .global_settings(&[AppSettings::ColoredHelp])
        .about("Compose kubernetes manifests from an application descriptor")
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("Increase verbosity"))
        .arg(Arg::with_name("debug")
            .short("d")
            .long("debug")
            .global(true)
            .help("Adds line numbers to log statements"))
        .subcommand(source_args(SubCommand::with_name("generate"))
            .arg(Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output file to save to"))
            .arg(Arg::with_name("json")
                .long("json")
                .help("Output a json List rather than yaml documents"))
            .about("Generate kubernetes manifests from a descriptor"))
        .subcommand(source_args(SubCommand::with_name("validate"))
            .about("Validate a descriptor without generating anything"))
        .subcommand(SubCommand::with_name("example")
            .about("Print the built-in example descriptor as json"));

    // arg parse
    let args = app.get_matches();
    let name = args.subcommand_name().unwrap_or("chartsmith").to_string();
    let _ = run(&args).map_err(|e| {
        error!("{} error: {}", name, e);
        print_error_debug(&e);
        process::exit(1);
    });
    process::exit(0);
}

fn run(args: &ArgMatches) -> Result<()> {
    // by default, always show INFO messages (+1)
    // everything goes to stderr, stdout is reserved for manifests
    loggerv::Logger::new()
        .output(&log::Level::Info, loggerv::Output::Stderr)
        .output(&log::Level::Debug, loggerv::Output::Stderr)
        .output(&log::Level::Trace, loggerv::Output::Stderr)
        .verbosity(args.occurrences_of("verbose") + 1)
        .module_path(true)
        .line_numbers(args.is_present("debug"))
        .init()
        .map_err(|e| format!("failed to initialise logging: {}", e))?;

    dispatch_commands(args)
}

fn resolve_source(args: &ArgMatches) -> DescriptorSource {
    if args.is_present("example") {
        DescriptorSource::Example
    } else {
        DescriptorSource::resolve(args.value_of("file"))
    }
}

/// Dispatch clap arguments to chartsmith handlers
fn dispatch_commands(args: &ArgMatches) -> Result<()> {
    if let Some(a) = args.subcommand_matches("generate") {
        let desc = resolve_source(a).load()?;
        let bundle = chartsmith::compose(&desc)?;
        let format = if a.is_present("json") { OutputFormat::Json } else { OutputFormat::Yaml };
        return match a.value_of("output") {
            Some(o) => generate::to_disk(&bundle, format, Path::new(o)),
            None => generate::to_stdout(&bundle, format),
        };
    }
    else if let Some(a) = args.subcommand_matches("validate") {
        let desc = resolve_source(a).load()?;
        let roles = chartsmith::compose(&desc)?
            .roles()
            .iter()
            .map(Role::to_string)
            .collect::<Vec<_>>();
        info!("{} is valid and generates: {}", desc.name, roles.join(", "));
        return Ok(());
    }
    else if args.subcommand_matches("example").is_some() {
        let encoded = serde_json::to_string_pretty(&ApplicationDescriptor::example())?;
        println!("{}", encoded);
        return Ok(());
    }

    unreachable!("Subcommand valid, but not implemented")
}
