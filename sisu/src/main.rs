// --- 시수배정현황 처리 - Archivo principal ---

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};

use sisu::config::{load_dotenv, RunConfig};
use sisu::mapping_text::{parse_mapping_text, to_pretty_json};
use sisu::models::RunMode;

fn cli() -> Command {
    Command::new("sisu-stats")
        .version(env!("CARGO_PKG_VERSION"))
        .about("시수배정현황 처리: agrega horas docentes por colegio y genera 결과집계표.xlsx")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Procesa planillas .xlsx y genera el informe")
                .arg(
                    Arg::new("files")
                        .value_name("FILES")
                        .help("Planillas 시수배정현황, ej. 2024(가온고).xlsx")
                        .num_args(1..)
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_name("MODE")
                        .help("merged (todos como un colegio) | per-school")
                        .default_value("per-school"),
                )
                .arg(
                    Arg::new("mapping")
                        .long("mapping")
                        .value_name("FILE")
                        .help("JSON ramo -> 교과(군) (por defecto subject_group_mapping.json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directorio del informe")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("open")
                        .long("open")
                        .help("Abrir el informe al terminar")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dump-json")
                        .long("dump-json")
                        .value_name("FILE")
                        .help("Volcar también la agregación en JSON")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("mapping")
                .about("Convierte texto copiado de Excel (ramo<TAB>교과군) a JSON de mapeo")
                .arg(
                    Arg::new("input")
                        .value_name("INPUT")
                        .help("Archivo de texto; sin él se lee stdin")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Archivo JSON destino; sin él se imprime")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let inputs: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let mut config = RunConfig::new(inputs);
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.mode = mode.parse::<RunMode>()?;
    }
    if let Some(p) = matches.get_one::<PathBuf>("mapping") {
        config.mapping_path = p.clone();
    }
    if let Some(p) = matches.get_one::<PathBuf>("output-dir") {
        config.output_dir = p.clone();
    }
    config.auto_open = matches.get_flag("open");
    config.dump_json = matches.get_one::<PathBuf>("dump-json").cloned();

    println!("[{}] Inicio de procesamiento: {} archivos ({:?})", stamp(), config.inputs.len(), config.mode);
    let outcome = sisu::run(&config)?;

    if outcome.mapping_missing {
        eprintln!(
            "⚠️  No se encontró '{}': todos los ramos se clasificaron como 기타",
            config.mapping_path.display()
        );
    }
    match &outcome.report_path {
        Some(path) => {
            println!(
                "[{}] ✅ {} colegios, {} docentes, {} horas -> {}",
                stamp(),
                outcome.data.schools.len(),
                outcome.data.overall.teacher_count,
                outcome.data.overall.total_hours,
                path.display()
            );
        }
        None => println!("[{}] ⚠️  No hay datos para procesar (처리할 데이터가 없습니다)", stamp()),
    }
    Ok(())
}

fn mapping_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let text = match matches.get_one::<PathBuf>("input") {
        Some(p) => std::fs::read_to_string(p).map_err(|e| format!("No se pudo leer '{}': {}", p.display(), e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if text.trim().is_empty() {
        return Err("No hay datos para convertir".into());
    }

    let map = parse_mapping_text(&text)?;
    if map.is_empty() {
        return Err("No se pudo interpretar el texto; revisar el formato (ramo<TAB>교과군)".into());
    }
    let json = to_pretty_json(&map)?;

    match matches.get_one::<PathBuf>("output") {
        Some(p) => {
            std::fs::write(p, &json).map_err(|e| format!("No se pudo escribir '{}': {}", p.display(), e))?;
            println!("✅ {} entradas convertidas -> {}", map.len(), p.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> ExitCode {
    load_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("run", sub)) => run_command(sub),
        Some(("mapping", sub)) => mapping_command(sub),
        _ => Err("subcomando desconocido".into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Error: {}", e);
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_valida() {
        cli().debug_assert();
    }

    #[test]
    fn test_cli_run_args() {
        let m = cli()
            .try_get_matches_from(["sisu-stats", "run", "a(가온고).xlsx", "b(나래고).xlsx", "--mode", "merged", "--open"])
            .expect("argumentos válidos");
        let (name, sub) = m.subcommand().expect("subcomando");
        assert_eq!(name, "run");
        assert_eq!(sub.get_many::<PathBuf>("files").map(|v| v.count()), Some(2));
        assert!(sub.get_flag("open"));
    }
}
