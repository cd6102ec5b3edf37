use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use text_det_eval::metrics::{average_precision, best_operating_point};
use text_det_eval::{
    evaluate_character_detection, evaluate_word_detection, EvalConfig, Evaluation,
    PrecisionRecallCurve, Vocabulary,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "text-det-eval")]
#[command(about = "Precision-recall evaluation of word and character detectors", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate word detections
    Words(CommonArgs),
    /// Evaluate character detections
    Chars {
        #[command(flatten)]
        common: CommonArgs,

        /// Symbols in label order (default: 0-9, A-Z, a-z)
        #[arg(long)]
        alphabet: Option<String>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Directory of ground-truth label files
    #[arg(long)]
    gt_dir: PathBuf,

    /// Directory of detector output files
    #[arg(long)]
    dt_dir: PathBuf,

    /// JSON settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exclusive overlap threshold for a match
    #[arg(long)]
    overlap_thr: Option<f64>,

    /// Apply non-maximum suppression before matching
    #[arg(long)]
    nms: bool,

    /// Drop detections below this confidence
    #[arg(long)]
    min_confidence: Option<f64>,

    /// Match images on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write the curve as JSON to this path
    #[arg(long)]
    curve_out: Option<PathBuf>,
}

impl CommonArgs {
    fn config(&self) -> Result<EvalConfig> {
        let mut config = match &self.config {
            Some(path) => EvalConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EvalConfig::default(),
        };

        if let Some(overlap_thr) = self.overlap_thr {
            config.overlap_thr = overlap_thr;
        }
        if self.nms {
            config.apply_nms = true;
        }
        if self.min_confidence.is_some() {
            config.min_confidence = self.min_confidence;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn report<L, G, D>(evaluation: &Evaluation<L, G, D>, curve_out: Option<&PathBuf>) -> Result<()> {
    let curve: &PrecisionRecallCurve = &evaluation.curve;

    info!("{}", evaluation.stats.summary_string());
    println!("Images:             {}", evaluation.images.len());
    println!("Ground truth:       {}", evaluation.total_ground_truth());
    println!("Detections:         {}", evaluation.total_detections());
    println!("Matched:            {}", evaluation.total_matched());
    println!("Average precision:  {:.4}", average_precision(curve));
    println!("Final precision:    {:.4}", curve.final_precision());
    println!("Final recall:       {:.4}", curve.final_recall());
    if let Some((point, f1)) = best_operating_point(curve, 1.0) {
        println!(
            "Best F1:            {:.4} at confidence {:.4} (P={:.4}, R={:.4})",
            f1, point.threshold, point.precision, point.recall
        );
    }

    if let Some(path) = curve_out {
        let json = serde_json::to_string_pretty(curve)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "curve written");
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Words(args) => {
            let config = args.config()?;
            let evaluation = evaluate_word_detection(&args.gt_dir, &args.dt_dir, &config, None)?;
            report(&evaluation, args.curve_out.as_ref())
        }
        Command::Chars { common, alphabet } => {
            let config = common.config()?;
            let vocabulary = match alphabet {
                Some(symbols) => Vocabulary::new(symbols.chars())?,
                None => Vocabulary::alphanumeric(),
            };
            let evaluation =
                evaluate_character_detection(&common.gt_dir, &common.dt_dir, &vocabulary, &config)?;
            report(&evaluation, common.curve_out.as_ref())
        }
    }
}
