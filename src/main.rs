mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use photonomist_core::{scan, Grouping, NamePattern, OrganizeOptions, TidyOptions};

#[derive(Parser)]
#[command(name = "photonomist", version, about = "Tidy photos into date-named folders")]
struct Cli {
    /// Folder with the photos to organize (searched recursively)
    photos_path: String,

    /// Folder where the date folders are created
    export_path: String,

    /// One folder per year
    #[arg(long, conflicts_with = "month")]
    year: bool,

    /// One folder per month
    #[arg(long)]
    month: bool,

    /// Append "_place" to folder names
    #[arg(long)]
    place: bool,

    /// Append "_reason" to folder names
    #[arg(long)]
    reason: bool,

    /// Append "_people" to folder names
    #[arg(long)]
    people: bool,

    /// Skip photos in this folder and its subfolders (repeatable)
    #[arg(long, value_name = "DIR")]
    exclude: Vec<String>,

    /// Only discover and validate, move nothing
    #[arg(long)]
    dry_scan: bool,

    /// Print the final report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbosity level. Max: 2.
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn organize_options(&self) -> anyhow::Result<OrganizeOptions> {
        Ok(OrganizeOptions {
            photos_path: PathBuf::from(scan::clean_path(&self.photos_path)),
            export_path: PathBuf::from(scan::clean_path(&self.export_path)),
            exclude: self
                .exclude
                .iter()
                .map(|p| PathBuf::from(scan::clean_path(p)))
                .collect(),
            tidy: TidyOptions {
                grouping: Grouping::from_flags(self.year, self.month)?,
                name_pattern: NamePattern::new(self.place, self.reason, self.people),
            },
        })
    }
}

/// Discover and validate without moving anything.
fn dry_scan(options: &OrganizeOptions) -> anyhow::Result<()> {
    let mut roots = scan::input_path_validation(&options.photos_path)
        .with_context(|| format!("Invalid photos path {}", options.photos_path.display()))?;
    scan::export_path_validation(&options.export_path)
        .with_context(|| format!("Invalid export path {}", options.export_path.display()))?;
    scan::exclude_paths(&mut roots, &options.exclude);

    let count: usize = roots.values().map(Vec::len).sum();
    let size = scan::photos_size(&roots)?;
    eprintln!(
        "Found {} photo(s) in {} folder(s), {:.1} MiB",
        count,
        roots.len(),
        size as f64 / (1024.0 * 1024.0)
    );
    for (folder, photos) in &roots {
        println!("{}\t{}", photos.len(), folder.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::configure_logging(cli.verbose);
    let t_total = std::time::Instant::now();

    let options = cli.organize_options()?;
    if cli.dry_scan {
        return dry_scan(&options);
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")?,
    );
    let result = photonomist_core::organize(&options, &|_stage, current, total, message| {
        pb.set_length(total);
        pb.set_position(current + 1);
        pb.set_message(message.to_string());
    });
    pb.finish_and_clear();
    let report = result.with_context(|| {
        format!(
            "Failed to organize {} into {}",
            options.photos_path.display(),
            options.export_path.display()
        )
    })?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    eprintln!(
        "Done! {} photos, {} moved, {} already in place, {} not transferred ({:.2}s)",
        report.total,
        report.moved,
        report.in_place,
        report.not_transferred,
        t_total.elapsed().as_secs_f64()
    );
    if report.not_transferred > 0 {
        eprintln!(
            "Photos without a usable capture date are listed in {}",
            options.export_path.join(photonomist_core::LEDGER_FILENAME).display()
        );
    }

    Ok(())
}
