//! FD-GAN 命令行
//!
//! ```bash
//! # 在成对图像目录上训练
//! fd_gan train --data data/pairs --epochs 10 --batch-size 4 --save generators.bin
//!
//! # 在合成数据上快速演示
//! fd_gan train --synthetic 32 --image-size 16 --epochs 2
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueHint};

use fd_gan::data::{PairedDataLoader, PairedDataset, PairedImageFolder, SyntheticPairs, transforms};
use fd_gan::fd_gan::{FdGanTrainer, TrainerConfig};
use fd_gan::logging::init_tracing;

#[derive(Parser)]
#[command(author, version, about = "FD-GAN 训练器（空间域 + 频域判别器）")]
struct Cli {
    /// 未设置 RUST_LOG 时的日志级别
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 训练生成器与判别器
    Train(TrainArgs),
}

#[derive(Args)]
struct TrainArgs {
    /// JSON 格式的训练器配置
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// 成对图像目录（包含 source/ 与 reference/）
    #[arg(long, value_hint = ValueHint::DirPath, conflicts_with = "synthetic")]
    data: Option<PathBuf>,

    /// 使用 N 对合成图像代替磁盘数据
    #[arg(long, value_name = "N")]
    synthetic: Option<usize>,

    /// 图像统一缩放到的边长
    #[arg(long, default_value_t = 32)]
    image_size: u32,

    #[arg(long, default_value_t = 10)]
    epochs: usize,

    #[arg(long, default_value_t = 4)]
    batch_size: usize,

    /// 覆盖配置中的设备（cpu / cuda / cuda:N）
    #[arg(long)]
    device: Option<String>,

    /// 覆盖配置中的随机数种子
    #[arg(long)]
    seed: Option<u64>,

    /// 训练结束后保存生成器参数
    #[arg(long, value_hint = ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// 训练结束后把第一对样本的合成结果保存为图像
    #[arg(long, value_hint = ValueHint::FilePath)]
    sample: Option<PathBuf>,
}

fn load_dataset(args: &TrainArgs, config: &TrainerConfig) -> Result<PairedDataset> {
    let size = args.image_size;
    match (&args.data, args.synthetic) {
        (Some(root), _) => PairedImageFolder::new(root, (size, size), config.channels)
            .load()
            .with_context(|| format!("无法加载数据目录{}", root.display())),
        (None, Some(n)) => SyntheticPairs::new(n, config.channels, size as usize, size as usize)
            .seed(config.seed)
            .generate()
            .context("无法生成合成数据"),
        (None, None) => bail!("必须指定 --data 或 --synthetic"),
    }
}

fn train(args: &TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainerConfig::from_json_file(path)
            .with_context(|| format!("无法读取配置{}", path.display()))?,
        None => TrainerConfig::default(),
    };
    if let Some(device) = &args.device {
        config.device.clone_from(device);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let dataset = load_dataset(args, &config)?;
    let first_pair = (
        dataset.sources().sample_at(0)?,
        dataset.references().sample_at(0)?,
    );
    let loader = PairedDataLoader::new(dataset, args.batch_size)?
        .shuffle(true)
        .seed(config.seed);

    let mut trainer = FdGanTrainer::new(config)?;
    let report = trainer.train(&loader, args.epochs)?;
    if let Some(last) = report.last() {
        tracing::info!(
            steps = report.steps,
            dis_loss = last.dis_loss,
            gen_loss = last.gen_loss,
            "训练完成"
        );
    }

    if let Some(path) = &args.save {
        trainer.save_generators(path)?;
        tracing::info!(path = %path.display(), "已保存生成器参数");
    }
    if let Some(path) = &args.sample {
        let fake = trainer.generate(&first_pair.0, &first_pair.1)?;
        transforms::save_sample(&fake, 0, path)?;
        tracing::info!(path = %path.display(), "已保存合成样本");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    match &cli.command {
        Command::Train(args) => train(args),
    }
}
