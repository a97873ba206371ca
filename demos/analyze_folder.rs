use photo_insights::{ExportFormat, PhotoAnalyzer, generate_insights};
use std::path::{Path, PathBuf};

/// Analyze a folder of photos, print a short summary and optionally export it.
///
/// Usage: `analyze_folder <folder> [csv|json|html] [output]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let folder = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let format = args.next().map(|f| f.parse::<ExportFormat>()).transpose()?;

    let analyzer = PhotoAnalyzer::builder().parallel(true).build()?;
    let corpus = analyzer.process_photo_directory(&folder, true)?;
    let insights = generate_insights(&corpus);

    println!("Photos:   {}", insights.total_photos);
    println!("Failures: {}", insights.total_failures);
    println!("Geotagged: {:.1}%", insights.gps_percentage);
    for entry in insights.camera_models.top(3) {
        println!("  {} ({} photos, {:.1}%)", entry.value, entry.count, entry.percentage);
    }
    if let Some(peak) = insights.by_hour.peak() {
        println!("Peak shooting hour: {}", peak.label);
    }

    if let Some(format) = format {
        let output = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(|| Path::new("photo_insights").with_extension(format.extension()));
        format.export_to_path(&corpus, &insights, &output)?;
        println!("Wrote {}", output.display());
    }
    Ok(())
}
