use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rom_tracker::config::Config;
use rom_tracker::pose::LandmarkFrame;
use rom_tracker::report::SessionReport;
use rom_tracker::tracker::Session;

const CONFIG_PATH: &str = "config.toml";

fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn print_help() {
    println!("コマンド:");
    println!("  l             - 関節一覧");
    println!("  j <id>        - 関節を選択 (例: j rightKnee)");
    println!("  f <file>      - JSON Lines のフレームを再生");
    println!("  s             - 現在の角度と可動域");
    println!("  c             - スナップショットを記録");
    println!("  e [path]      - レポートを書き出し");
    println!("  r             - 可動域をリセット");
    println!("  q             - 終了");
}

/// Feeds every frame of a JSON Lines file through the session.
fn replay(session: &mut Session, path: &str) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;

    let mut frames = 0usize;
    let mut measured = 0usize;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: LandmarkFrame = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid frame", path, line_no + 1))?;
        if session.process(&frame).sample.angle.is_some() {
            measured += 1;
        }
        frames += 1;
    }

    info!(path, frames, measured, "replay finished");
    println!("{} フレーム再生 ({} フレーム測定)", frames, measured);
    if session.latest_angle().is_none() && frames > 0 {
        println!("{} が完全には見えていません", session.joint().label());
    }
    println!("  {}", session.reading());
    Ok(())
}

fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let found = Path::new(&config_path).exists();
    let config = Config::load_or_default(&config_path)?;
    init_logging(&config.log.level);
    if !found {
        warn!(path = %config_path, "config file not found; using defaults");
    }

    let mut session = Session::from_config(&config).context("Invalid joint catalog or engine settings")?;
    let session_date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut report = SessionReport::new(&config.report.patient_name, &session_date);

    println!("=== ROM Tracker {} ===", env!("GIT_VERSION"));
    println!("画面: {}x{}", config.session.width, config.session.height);
    println!("関節: {}", session.joint().label());
    println!();
    print_help();
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "l" => {
                for joint in session.registry().all() {
                    let marker = if joint.id() == session.joint().id() { "*" } else { " " };
                    println!("{} {:<16} {:<28} {:?}", marker, joint.id(), joint.label(), joint.calc_kind());
                }
            }
            "j" if parts.len() == 2 => match session.select(parts[1]) {
                Ok(joint) => println!("選択: {}", joint.label()),
                Err(e) => println!("エラー: {}", e),
            },
            "f" if parts.len() == 2 => {
                if let Err(e) = replay(&mut session, parts[1]) {
                    println!("エラー: {:#}", e);
                }
            }
            "s" => {
                println!("{}", session.joint().label());
                println!("  {}", session.reading());
                if let Some(band) = session.classify_latest() {
                    println!("  評価: {}", band);
                }
            }
            "c" => match session.capture() {
                Some(shot) => {
                    println!("記録: {} {}° ({})", shot.label, shot.angle, shot.band);
                    report.push(shot);
                }
                None => println!("測定値がないため記録できません"),
            },
            "e" => {
                let path = parts.get(1).copied().unwrap_or(config.report.output_path.as_str());
                match report.save(path) {
                    Ok(()) => {
                        println!("{}", report.render_text());
                        println!("書き出しました: {}", path);
                    }
                    Err(e) => println!("エラー: {}", e),
                }
            }
            "r" => {
                session.reset();
                println!("リセットしました");
            }
            "q" => {
                println!("終了します");
                break;
            }
            _ => {
                println!("不明なコマンド: {}", parts[0]);
            }
        }
    }

    Ok(())
}
