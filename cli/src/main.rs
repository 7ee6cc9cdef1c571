//! pdfsense CLI - PDF outline extraction and persona-driven ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsense::render::{outline_to_text, to_json, write_json};
use pdfsense::{
    is_pdf, AnalysisOptions, ClassifierOptions, CollectionAnalyzer, Embedder, HashingEmbedder,
    JobDescriptor, JsonFormat, ParseOptions, Pdfsense, PdfParser, RankOptions, RelevanceRanker,
};

#[derive(Parser)]
#[command(name = "pdfsense")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections for a persona's job", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and H1-H3 outline from a PDF or a directory of PDFs
    Outline {
        /// Input PDF file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory (stdout for a single file if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutlineFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Number of font-size clusters
        #[arg(long, env = "PDFSENSE_N_CLUSTERS", default_value = "4")]
        n_clusters: usize,
    },

    /// Rank sections of a document collection for a persona and job
    Rank {
        /// Directory holding the PDFs named in the job descriptor
        #[arg(long, value_name = "DIR", default_value = "input")]
        input_dir: PathBuf,

        /// Job descriptor (defaults to <input-dir>/input_data.json)
        #[arg(long, value_name = "FILE")]
        job: Option<PathBuf>,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Results per pool
        #[arg(long, env = "PDFSENSE_TOP_K", default_value = "5")]
        top_k: usize,

        /// Number of font-size clusters
        #[arg(long, env = "PDFSENSE_N_CLUSTERS", default_value = "4")]
        n_clusters: usize,

        /// Paragraph size limit in characters
        #[arg(long, env = "PDFSENSE_PARA_LIMIT", default_value = "400")]
        para_limit: usize,

        /// Texts per embedding call
        #[arg(long, env = "PDFSENSE_BATCH_SIZE", default_value = "16")]
        batch_size: usize,

        /// Embedding backend
        #[arg(long, value_enum, default_value = "hash")]
        embedder: EmbedderKind,

        /// Model cache directory for the fastembed backend
        #[arg(long, env = "PDFSENSE_MODEL_CACHE", value_name = "DIR")]
        model_cache: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutlineFormat {
    /// `{"title", "outline"}` JSON
    Json,
    /// Indented heading list
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EmbedderKind {
    /// Offline feature-hashing embedder
    Hash,
    /// Multilingual MiniLM sentence embeddings (requires the `fastembed` feature)
    Fastembed,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            format,
            compact,
            n_clusters,
        }) => cmd_outline(&input, output.as_deref(), format, json_format(compact), n_clusters),
        Some(Commands::Rank {
            input_dir,
            job,
            output_dir,
            top_k,
            n_clusters,
            para_limit,
            batch_size,
            embedder,
            model_cache,
            compact,
        }) => {
            let job = job.unwrap_or_else(|| input_dir.join("input_data.json"));
            let options = AnalysisOptions::new()
                .with_parse_options(ParseOptions::new().lenient())
                .with_clusters(n_clusters)
                .with_para_limit(para_limit)
                .with_ranking(RankOptions::new().with_top_k(top_k).with_batch_size(batch_size));
            cmd_rank(
                &input_dir,
                &job,
                &output_dir,
                options,
                embedder,
                model_cache,
                json_format(compact),
            )
        }
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: pdfsense <COMMAND>".yellow());
            println!("       pdfsense --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn progress_bar(len: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    format: OutlineFormat,
    json: JsonFormat,
    n_clusters: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = Pdfsense::new()
        .lenient()
        .with_classifier(ClassifierOptions::new().with_clusters(n_clusters));

    let render = |outline: &pdfsense::DocumentOutline| -> pdfsense::Result<String> {
        match format {
            OutlineFormat::Json => to_json(outline, json),
            OutlineFormat::Text => Ok(outline_to_text(outline)),
        }
    };
    let extension = match format {
        OutlineFormat::Json => "json",
        OutlineFormat::Text => "txt",
    };

    if input.is_file() {
        let outline = builder.outline(input)?;
        let rendered = render(&outline)?;
        match output {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(output_name(input, extension));
                fs::write(&path, rendered)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => println!("{}", rendered),
        }
        return Ok(());
    }

    let mut inputs: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_pdf(path))
        .collect();
    inputs.sort();

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("output"));
    fs::create_dir_all(&output_dir)?;

    let pb = progress_bar(inputs.len() as u64)?;
    let mut failed = 0;
    for path in &inputs {
        pb.set_message(display_name(path));
        match builder.outline(path) {
            Ok(outline) => {
                fs::write(output_dir.join(output_name(path, extension)), render(&outline)?)?;
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Skipped".yellow(), path.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} outlines written to {}",
        "Done!".green().bold(),
        inputs.len() - failed,
        output_dir.display()
    );
    Ok(())
}

fn output_name(input: &Path, extension: &str) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    format!("{}.{}", stem, extension)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn build_embedder(
    kind: EmbedderKind,
    model_cache: Option<PathBuf>,
) -> Result<Box<dyn Embedder>, Box<dyn std::error::Error>> {
    match kind {
        EmbedderKind::Hash => {
            if model_cache.is_some() {
                log::debug!("model cache ignored by the hashing embedder");
            }
            Ok(Box::new(HashingEmbedder::default()))
        }
        #[cfg(feature = "fastembed")]
        EmbedderKind::Fastembed => Ok(Box::new(pdfsense::FastEmbedder::new(model_cache)?)),
        #[cfg(not(feature = "fastembed"))]
        EmbedderKind::Fastembed => {
            let _ = model_cache;
            Err("pdfsense was built without the `fastembed` feature".into())
        }
    }
}

fn cmd_rank(
    input_dir: &Path,
    job_path: &Path,
    output_dir: &Path,
    options: AnalysisOptions,
    embedder: EmbedderKind,
    model_cache: Option<PathBuf>,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let job = JobDescriptor::from_path(job_path)?;

    let embedder = build_embedder(embedder, model_cache)?;
    println!("{} {}", "Embedder:".cyan(), embedder.name());
    let ranker = RelevanceRanker::new(embedder, options.ranking.clone());
    let mut analyzer = CollectionAnalyzer::new(ranker, options);

    let pb = progress_bar(job.documents.len() as u64)?;
    let mut started = false;
    let report = analyzer.analyze_with_progress(&job, input_dir, |name| {
        if started {
            pb.inc(1);
        }
        started = true;
        pb.set_message(name.to_string());
    })?;
    pb.inc(1);
    pb.finish_with_message("Done!");

    let mut embedder = analyzer.into_ranker().into_embedder();
    embedder.shutdown();

    let path = output_dir.join(job.output_file_name());
    write_json(&report, &path, format)?;

    println!("\n{}", "Summary:".green().bold());
    println!(
        "  {} {} documents analyzed",
        "├─".dimmed(),
        report.metadata.input_documents.len()
    );
    if !report.metadata.skipped_documents.is_empty() {
        println!(
            "  {} {} skipped: {}",
            "├─".dimmed(),
            report.metadata.skipped_documents.len(),
            report.metadata.skipped_documents.join(", ").yellow()
        );
    }
    println!(
        "  {} {} sections, {} paragraphs ranked",
        "├─".dimmed(),
        report.extracted_sections.len(),
        report.subsection_analysis.len()
    );
    println!("  {} {}", "└─".dimmed(), path.display());

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so that pages with broken content streams still count
    let parser = PdfParser::open_with_options(input, ParseOptions::new().lenient())?;
    let doc = parser.parse()?;
    let outline = pdfsense::outline::outline_from_document(&doc, &ClassifierOptions::default());
    let paragraphs = pdfsense::ParagraphChunker::default().chunk_document(&doc);

    let blocks: usize = doc.pages.iter().map(|p| p.text_blocks().count()).sum();
    let words: usize = paragraphs.iter().map(|p| p.word_count()).sum();
    let [h1, h2, h3] = outline.level_counts();

    if json {
        let value = serde_json::json!({
            "file": input.display().to_string(),
            "pdf_version": doc.version,
            "pages": doc.page_count,
            "text_blocks": blocks,
            "paragraphs": paragraphs.len(),
            "words": words,
            "title": outline.title,
            "headings": {"H1": h1, "H2": h2, "H3": h3},
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.version);
    println!("{}: {}", "Pages".bold(), doc.page_count);
    if !outline.title.is_empty() {
        println!("{}: {}", "Title".bold(), outline.title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Text blocks".bold(), blocks);
    println!("{}: {}", "Paragraphs".bold(), paragraphs.len());
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {} / {} / {}", "Headings (H1/H2/H3)".bold(), h1, h2, h3);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfsense".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and persona-driven ranking");
    println!();
    println!("License: MIT");
}
