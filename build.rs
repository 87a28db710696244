// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("Path to the configuration file (default: /etc/packdeps/config.toml)")
}

/// Common argument: pack base directories
fn packs_path_arg() -> Arg {
    Arg::new("packs_path")
        .short('p')
        .long("packs-path")
        .value_name("DIR")
        .action(ArgAction::Append)
        .help("Pack base directory, overrides the configured list (repeatable)")
}

fn build_cli() -> Command {
    Command::new("packdeps")
        .version(env!("CARGO_PKG_VERSION"))
        .author("packdeps Contributors")
        .about("Classify pack dependencies after an installation round")
        .subcommand_required(true)
        .subcommand(
            Command::new("classify")
                .about("Classify the dependencies of packs from one installation round")
                .arg(
                    Arg::new("status_file")
                        .default_value("-")
                        .help("JSON status file, or '-' for stdin"),
                )
                .arg(
                    Arg::new("nested")
                        .short('n')
                        .long("nested")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Remaining nesting budget for this round"),
                )
                .arg(config_arg())
                .arg(packs_path_arg())
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .action(ArgAction::SetTrue)
                        .help("Look up packs in parallel"),
                )
                .arg(
                    Arg::new("explain")
                        .long("explain")
                        .action(ArgAction::SetTrue)
                        .help("Describe each conflict on stderr"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show an installed pack's version and declared dependencies")
                .arg(Arg::new("pack").required(true).help("Pack name"))
                .arg(config_arg())
                .arg(packs_path_arg()),
        )
        .subcommand(
            Command::new("parse")
                .about("Show how dependency specs are interpreted")
                .arg(
                    Arg::new("specs")
                        .required(true)
                        .num_args(1..)
                        .help("Dependency specs, e.g. aws=v1.2.0"),
                )
                .arg(config_arg()),
        )
}

/// Render one page for `packdeps` and one per subcommand into `man_dir`
fn write_man_pages(man_dir: &Path) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(man_dir)?;

    let cli = build_cli();
    let mut pages = vec![("packdeps".to_string(), cli.clone())];
    for sub in cli.get_subcommands() {
        let name = format!("packdeps-{}", sub.get_name());
        pages.push((name.clone(), sub.clone().display_name(name)));
    }

    let mut written = Vec::with_capacity(pages.len());
    for (name, cmd) in pages {
        let mut buffer = Vec::new();
        Man::new(cmd).render(&mut buffer)?;
        let path = man_dir.join(format!("{}.1", name));
        fs::write(&path, buffer)?;
        written.push(path);
    }
    Ok(written)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping man pages");
        return;
    };

    if let Err(e) = write_man_pages(&PathBuf::from(manifest_dir).join("man")) {
        println!("cargo:warning=Failed to generate man pages: {}", e);
    }
}
