use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use videoscribe_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
use videoscribe_core::pipeline::progress::ChunkProgress;
use videoscribe_core::pipeline::transcribe_video_use_case::{Job, TranscribeVideoUseCase};
use videoscribe_core::shared::constants::TRANSCRIPT_SUFFIX;
use videoscribe_core::shared::model_resolver;
use videoscribe_core::shared::model_size::ModelSize;
use videoscribe_core::video::infrastructure::ffmpeg_cli_extractor::FfmpegCliExtractor;
use videoscribe_core::video::infrastructure::wav_audio_reader::WavAudioReader;

/// Transcribe a video file's audio track to a text file.
#[derive(Parser)]
#[command(name = "videoscribe")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Output transcript file (defaults to <input>_transcript.txt).
    output: Option<PathBuf>,

    /// Whisper model size: tiny, base, small, medium, large.
    #[arg(long, default_value = "medium")]
    model: String,

    /// Path to the ffmpeg executable (defaults to system search path).
    #[arg(long)]
    ffmpeg: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let model_size = validate(&cli)?;

    log::info!("Resolving model: {}", model_size.filename());
    let model_path = model_resolver::resolve(
        model_size.filename(),
        &model_size.url(),
        Some(Box::new(download_progress)),
    )?;
    eprintln!();

    let recognizer = WhisperRecognizer::new(&model_path)?;
    let extractor = match cli.ffmpeg {
        Some(ref program) => FfmpegCliExtractor::with_program(program.clone()),
        None => FfmpegCliExtractor::new(),
    };

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| transcript_path(&cli.input));
    let job = Job {
        video_path: cli.input.clone(),
        model_size,
        output_path: output_path.clone(),
    };

    let progress: Box<dyn Fn(ChunkProgress) -> bool + Send> = Box::new(|p: ChunkProgress| {
        eprint!(
            "\rChunk {}/{} - remaining: {}",
            p.completed, p.total, p.remaining
        );
        true
    });

    let use_case = TranscribeVideoUseCase::new(
        Box::new(extractor),
        Box::new(WavAudioReader),
        Box::new(recognizer),
        Some(progress),
        None,
    );
    let summary = use_case.execute(&job)?;
    eprintln!();

    let secs = summary.total_elapsed.as_secs();
    log::info!(
        "Transcribed {} chunks in {} min {} sec",
        summary.chunks,
        secs / 60,
        secs % 60
    );
    log::info!("Transcript written to {}", output_path.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<ModelSize, Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    let model_size: ModelSize = cli.model.parse()?;
    Ok(model_size)
}

fn transcript_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}{TRANSCRIPT_SUFFIX}.txt"))
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading speech model... {pct}%");
    } else {
        eprint!("\rDownloading speech model... {downloaded} bytes");
    }
}
