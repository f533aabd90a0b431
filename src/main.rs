use clap::Parser;
use split_markdown::config::cli::confirm_overwrite;
use split_markdown::core::{Pipeline, SplitSettings};
use split_markdown::utils::{error::SplitError, logger};
use split_markdown::{CliConfig, LocalStorage, MarkdownSplitPipeline, SplitEngine, TomlConfig};

fn main() {
    let args = CliConfig::parse();

    // 載入預設值檔案 (可選)
    let file_config = match TomlConfig::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // 初始化日誌
    let verbose = args.verbose || file_config.as_ref().is_some_and(TomlConfig::verbose);
    if args.json_logs || file_config.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::debug!("CLI config: {:?}", args);

    if let Err(e) = run(&args, file_config.as_ref()) {
        fail(&e);
    }
}

fn run(args: &CliConfig, file_config: Option<&TomlConfig>) -> Result<(), SplitError> {
    let config = args.resolve(file_config)?;
    tracing::info!(
        "Splitting {} at level {} (numbered: {})",
        config.source_path.display(),
        config.level.get(),
        config.numbered
    );

    let output_dir = config.output_dir();
    let pipeline = MarkdownSplitPipeline::new(LocalStorage::new(), config);
    let engine = SplitEngine::new(pipeline);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let output = engine.plan()?;
        println!();
        for file in &output.files {
            println!("- {}", output_dir.join(&file.filename).display());
        }
        println!();
        println!("Would split: {}", output.section_count);
        return Ok(());
    }

    // 切分成功後才會清空目的資料夾，所以先讀取並檢查內容
    let output = engine.plan()?;

    if output_dir.exists() && !args.yes && !confirm_overwrite(&output_dir)? {
        println!("Cancelled.");
        return Ok(());
    }

    let report = engine.pipeline().load(output)?;
    println!();
    for title in &report.titles {
        println!("- {}", title);
    }
    println!();
    println!("Done: {}", report.section_count);
    tracing::info!("📁 Output saved to: {}", report.output_dir.display());

    Ok(())
}

fn fail(e: &SplitError) -> ! {
    // 使用者只看到下面一段訊息，詳細資訊留給 debug 日誌
    tracing::debug!("Split failed: {:?} (Category: {:?})", e, e.category());

    eprintln!();
    eprintln!("ERROR");
    eprintln!("{}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
