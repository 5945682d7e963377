use clap::Parser;
use monkey_lab::{classifier, cli, config, error, logbook, logging, preview};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use monkey_lab_common::{GUIDANCE, SPECIES};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { image, seed, latency_ms, json } => {
            let latency = match latency_ms {
                Some(ms) => Duration::from_millis(ms),
                None => config.latency()?,
            };
            let seed = seed.or(config.seed);
            let previews = preview::TempPreviews::new(config.preview_dir());
            let classifier = classifier::simulated(seed, latency, !json);

            tracing::info!(image = %image.display(), ?latency, ?seed, "판별 시작");
            let result = classifier::classify_file(&image, &previews, &classifier).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("🐒 원숭이 종 판별 데모 (모의 결과)\n");
                println!("예측: {}", result.label);
                println!("신뢰도: {}", result.confidence);
                println!("\n사용 가이드");
                for item in GUIDANCE {
                    println!("  - {}", item);
                }
            }
        }

        Commands::Logbook => {
            let previews = preview::TempPreviews::new(config.preview_dir());
            logbook::run_interactive_logbook(&previews).await?;
        }

        Commands::Species => {
            println!("판별 대상:");
            for (i, label) in SPECIES.iter().enumerate() {
                println!("  {}. {}", i + 1, label);
            }
            println!("\n사용 가이드:");
            for item in GUIDANCE {
                println!("  - {}", item);
            }
        }

        Commands::Config { set_latency_ms, set_preview_dir, set_seed, show } => {
            let mut config = config;
            let changed = set_latency_ms.is_some() || set_preview_dir.is_some() || set_seed.is_some();

            if let Some(ms) = set_latency_ms {
                config.simulated_latency_ms = ms;
            }
            if let Some(dir) = set_preview_dir {
                config.preview_dir = Some(dir);
            }
            if let Some(seed) = set_seed {
                config.seed = Some(seed);
            }
            if changed {
                config.save()?;
                println!("✔ 설정을 저장했어요: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("설정:");
                println!("  대기 시간: {}ms", config.simulated_latency_ms);
                println!("  미리보기 폴더: {}", config.preview_dir().display());
                println!(
                    "  시드: {}",
                    config.seed.map(|s| s.to_string()).unwrap_or_else(|| "미설정".into())
                );
            }
        }
    }

    Ok(())
}
