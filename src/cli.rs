// src/cli.rs
use std::{env, path::PathBuf};

use crate::runner::{self, Params};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::new();
    parse_cli(&mut params)?;
    let reply = runner::run(&params)?;
    println!("{reply}");
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => {
                let v = args.next().ok_or("Missing value for --input")?;
                params.input = Some(PathBuf::from(v));
            }
            "--periods" => {
                let v = args.next().ok_or("Missing value for --periods")?;
                params.extract.periods = parse_label_list(&v);
            }
            "--abbrev" => {
                let v = args.next().ok_or("Missing value for --abbrev")?;
                let (fragment, canonical) = v
                    .split_once('=')
                    .ok_or("--abbrev expects FRAGMENT=NAME")?;
                if fragment.is_empty() || canonical.is_empty() {
                    return Err("--abbrev expects FRAGMENT=NAME".into());
                }
                params.extract.abbreviations.push((s!(fragment), s!(canonical)));
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            file if !file.starts_with('-') && params.input.is_none() => {
                params.input = Some(PathBuf::from(file));
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(())
}

fn parse_label_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| s!(part))
        .collect()
}
