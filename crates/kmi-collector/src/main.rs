//! K-Market Insight 업종 분류 CLI.

use clap::{Parser, Subcommand, ValueEnum};
use kmi_collector::{modules, CollectorConfig};
use kmi_core::{init_logging, LogConfig};
use kmi_data::{connect_dart_client, CorpCodeSource, IndustryClassifier};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kmi-collector")]
#[command(about = "K-Market Insight 업종 분류기 (종목코드 → DART → KSIC → 상위 업종)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error). 없으면 설정 파일 값
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 기업코드 조회 방식
    #[arg(long, value_enum, default_value_t = Source::Xml, global = true)]
    source: Source,

    /// 설정 파일 경로 (없으면 KMI_CONFIG 또는 config/default.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Source {
    /// DART corpCode.xml
    Xml,
    /// dart_corp_codes 테이블
    Db,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목코드 분류 후 결과를 JSON으로 출력
    Classify {
        /// 종목코드 (예: 005930 A000660)
        #[arg(required = true)]
        codes: Vec<String>,

        /// 결과 저장 경로
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// 파일의 종목코드를 일괄 분류
    Batch {
        /// 종목코드 목록 파일 (줄 또는 쉼표 구분)
        #[arg(long)]
        input: PathBuf,

        /// 결과 저장 경로 (기본: <data_dir>/results/industry_results.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// DART 기업코드표(corpCode.zip) 다운로드
    DownloadCorpCodes {
        /// 캐시 무시하고 다시 다운로드
        #[arg(long)]
        force: bool,
    },

    /// 기업명으로 기업코드 검색
    Search {
        /// 기업명 (부분 일치)
        name: String,

        /// 최대 결과 수
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Source {
    fn corp_code_source(self) -> CorpCodeSource {
        match self {
            Source::Xml => CorpCodeSource::default(),
            Source::Db => CorpCodeSource::Database,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 설정 로드
    let config = match &cli.config {
        Some(path) => CollectorConfig::load(path)?,
        None => CollectorConfig::from_env()?,
    };

    // 로깅 초기화
    let mut log_config = LogConfig::from(&config.app.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    init_logging(log_config)?;

    tracing::info!("K-Market Insight 업종 분류기 시작");

    config.app.validate()?;
    tracing::debug!(
        data_dir = %config.app.dart.data_dir.display(),
        rate_limit = config.app.dart.rate_limit,
        "설정 로드 완료"
    );

    let source = cli.source.corp_code_source();

    // 명령 실행
    match cli.command {
        Commands::Classify { codes, output } => {
            let classifier = IndustryClassifier::from_config(&config.app, source).await?;
            let (results, stats) =
                modules::classify_stocks(&classifier, &codes, output.as_deref()).await?;
            stats.log_summary("업종 분류");
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Batch { input, output } => {
            let codes = modules::read_stock_codes(&input).await?;
            let output = output.unwrap_or_else(|| config.batch.default_output());

            let classifier = IndustryClassifier::from_config(&config.app, source).await?;
            let (_, stats) =
                modules::classify_stocks(&classifier, &codes, Some(output.as_path())).await?;
            stats.log_summary("일괄 분류");
        }
        Commands::DownloadCorpCodes { force } => {
            let count = modules::download_corp_codes(&config.app.dart, force).await?;
            println!("{}개 상장 기업 기업코드 준비 완료", count);
        }
        Commands::Search { name, limit } => {
            let limit = limit.unwrap_or(config.search.default_limit);
            let client = connect_dart_client(&config.app, source).await?;

            let records = modules::search_companies(&client, &name, limit).await;
            if records.is_empty() {
                println!("검색 결과가 없습니다: {}", name);
            }
            for (i, record) in records.iter().enumerate() {
                println!(
                    "{:>3}. {} ({}) corp_code={}",
                    i + 1,
                    record.corp_name,
                    record.stock_code,
                    record.corp_code
                );
            }
        }
    }

    tracing::info!("K-Market Insight 업종 분류기 종료");

    Ok(())
}
