use clap::Parser;
use mot_yolo::config::DatasetConfig;
use mot_yolo::dataset::prepare_dataset;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(version, about)]
struct MotYoloCli {
    /// MOT15 split folder holding one directory per sequence
    input_directory: PathBuf,

    /// where the YOLO dataset is written
    output_directory: PathBuf,

    /// cut sequences into chunks of this many frames
    #[arg(long)]
    length: Option<usize>,

    /// dataset config json
    #[arg(long)]
    config: Option<String>,

    /// validation sequence name, repeatable; replaces the configured list
    #[arg(long = "val")]
    val_sequences: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = MotYoloCli::parse();

    let mut config = match &cli.config {
        Some(path) => DatasetConfig::from_json_file(path)?,
        None => DatasetConfig::default(),
    };
    if cli.length.is_some() {
        config.length = cli.length;
    }
    if !cli.val_sequences.is_empty() {
        config.val_sequences = cli.val_sequences;
    }

    let now = Instant::now();
    let summary = prepare_dataset(&cli.input_directory, &cli.output_directory, &config)?;
    log::info!(
        "wrote {} train and {} val frames to {} in {:.3} sec",
        summary.train.len(),
        summary.val.len(),
        cli.output_directory.display(),
        now.elapsed().as_secs_f64()
    );
    Ok(())
}
