//! Wenku - 文库小说分卷与翻译文件工具
//!
//! - Domain: volume/, translation/, bilingual/
//! - Application: commands, queries, ports
//! - Infrastructure: persistence, adapters, context

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wenku::application::{
    CollectTempFiles, CreateVolume, DeleteVolume, ListVolumes, MakeTranslationFile, SaveTranslation,
};
use wenku::config::{load_config, load_config_from_path, print_config, AppConfig};
use wenku::domain::translation::{NovelFileMode, NovelFileTranslationsMode, TranslatorId};
use wenku::domain::volume::{ChapterId, NovelId, VolumeId};
use wenku::infrastructure::AppContext;

#[derive(Parser)]
#[command(name = "wenku")]
#[command(version, about = "Wenku novel volumes and translation files", long_about = None)]
#[command(after_help = "EXAMPLES:
    wenku import --novel n1 --file vol1.epub
    wenku make-file --novel n1 --volume vol1.epub --mode zh-jp --translator sakura
    wenku gc")]
struct Cli {
    /// Configuration file (defaults to config.toml / config.local.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List volumes of a novel with translation progress
    List {
        #[arg(long)]
        novel: String,
    },

    /// Import a .txt or .epub volume
    Import {
        #[arg(long)]
        novel: String,

        /// Source file
        #[arg(long, value_name = "PATH")]
        file: PathBuf,

        /// Volume id, defaults to the file name
        #[arg(long)]
        volume: Option<String>,

        /// Store the source file without extracting chapters
        #[arg(long)]
        no_unpack: bool,
    },

    /// Delete a volume with its chapters and translations
    Delete {
        #[arg(long)]
        novel: String,

        #[arg(long)]
        volume: String,
    },

    /// Save a chapter translation from a JSON array of lines
    Translate {
        #[arg(long)]
        novel: String,

        #[arg(long)]
        volume: String,

        #[arg(long)]
        translator: TranslatorId,

        #[arg(long)]
        chapter: String,

        /// JSON file containing an array of strings
        #[arg(long, value_name = "JSON")]
        file: PathBuf,
    },

    /// Assemble a translated download file and print its path
    MakeFile {
        #[arg(long)]
        novel: String,

        #[arg(long)]
        volume: String,

        /// zh, jp-zh or zh-jp
        #[arg(long)]
        mode: NovelFileMode,

        /// parallel or priority
        #[arg(long, default_value = "priority")]
        translations_mode: NovelFileTranslationsMode,

        /// Translators in order, may be repeated
        #[arg(long = "translator")]
        translators: Vec<TranslatorId>,
    },

    /// Delete expired temp files
    Gc,
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.filter_directive()));

    // 日志输出到 stderr，stdout 留给命令结果
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match &cli.config {
        Some(path) => load_config_from_path(Some(path.as_path())),
        None => load_config(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let ctx = AppContext::from_config(&config);

    match cli.command {
        Command::List { novel } => {
            let volumes = ctx
                .list_volumes_handler
                .handle(ListVolumes {
                    novel_id: NovelId::new(novel)?,
                })
                .await?;
            for volume in volumes {
                println!(
                    "{}\ttotal={}\tbaidu={}\tyoudao={}\tgpt={}\tsakura={}",
                    volume.volume_id,
                    volume.total,
                    volume.baidu,
                    volume.youdao,
                    volume.gpt,
                    volume.sakura
                );
            }
        }

        Command::Import {
            novel,
            file,
            volume,
            no_unpack,
        } => {
            let volume = match volume {
                Some(volume) => volume,
                None => file
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .context("cannot derive volume id from file path")?,
            };
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {:?}", file))?;

            let response = ctx
                .create_volume_handler
                .handle(CreateVolume {
                    novel_id: NovelId::new(novel)?,
                    volume_id: VolumeId::new(volume)?,
                    data,
                    unpack: !no_unpack,
                })
                .await?;
            println!("{}\tchapters={}", response.volume_id, response.chapters);
        }

        Command::Delete { novel, volume } => {
            ctx.delete_volume_handler
                .handle(DeleteVolume {
                    novel_id: NovelId::new(novel)?,
                    volume_id: VolumeId::new(volume)?,
                })
                .await?;
        }

        Command::Translate {
            novel,
            volume,
            translator,
            chapter,
            file,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {:?}", file))?;
            let lines: Vec<String> = serde_json::from_slice(&data)
                .with_context(|| format!("{:?} is not a JSON array of strings", file))?;

            ctx.save_translation_handler
                .handle(SaveTranslation {
                    novel_id: NovelId::new(novel)?,
                    volume_id: VolumeId::new(volume)?,
                    translator,
                    chapter_id: ChapterId::new(chapter)?,
                    lines,
                })
                .await?;
        }

        Command::MakeFile {
            novel,
            volume,
            mode,
            translations_mode,
            translators,
        } => {
            let response = ctx
                .make_translation_file_handler
                .handle(MakeTranslationFile {
                    novel_id: NovelId::new(novel)?,
                    volume_id: VolumeId::new(volume.clone())?,
                    mode,
                    translations_mode,
                    translations: translators,
                })
                .await?
                .with_context(|| format!("volume {} not found", volume))?;
            println!("{}", response.path.display());
        }

        Command::Gc => {
            let result = ctx
                .collect_temp_files_handler
                .handle(CollectTempFiles {
                    max_age: config.gc.temp_expire(),
                })
                .await?;
            println!(
                "deleted_files={}\tfreed_bytes={}",
                result.deleted_files, result.freed_bytes
            );
        }
    }

    Ok(())
}
