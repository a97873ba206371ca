use crate::export::error::ExportError;
use crate::insights::{
    Distribution, FrequencyTable, GeoExtent, InsightsSummary, TemporalHistogram,
};
use crate::structs::PhotoCorpus;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::io::Write;
use std::time::SystemTime;

const SAMPLE_ROWS: usize = 10;
const TABLE_ROWS: usize = 10;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
h1 { color: #2c3e50; text-align: center; margin-bottom: 30px; }
h2 { color: #34495e; border-bottom: 2px solid #3498db; padding-bottom: 10px; }
.generated { text-align: center; color: #7f8c8d; }
.metric-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }
.metric-card { background: #ecf0f1; padding: 20px; border-radius: 8px; text-align: center; }
.metric-value { font-size: 2em; font-weight: bold; color: #3498db; }
.metric-label { color: #7f8c8d; margin-top: 5px; }
.insight-box { background: #e8f6f3; padding: 15px; border-left: 4px solid #1abc9c; margin: 15px 0; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
th { background-color: #3498db; color: white; }
tr:nth-child(even) { background-color: #f2f2f2; }
";

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| escape_html(&v.to_string()))
}

fn metric_card<W: Write>(w: &mut W, value: impl Display, label: &str) -> std::io::Result<()> {
    writeln!(
        w,
        "<div class=\"metric-card\"><div class=\"metric-value\">{value}</div>\
         <div class=\"metric-label\">{label}</div></div>"
    )
}

fn frequency_table<W, K>(
    w: &mut W,
    heading: &str,
    column: &str,
    table: &FrequencyTable<K>,
) -> std::io::Result<()>
where
    W: Write,
    K: Display,
{
    writeln!(w, "<h3>{heading}</h3>")?;
    writeln!(
        w,
        "<table>\n<tr><th>{column}</th><th>Photos</th><th>Percentage</th></tr>"
    )?;
    if table.is_empty() {
        writeln!(w, "<tr><td colspan=\"3\">No data</td></tr>")?;
    }
    for entry in table.top(TABLE_ROWS) {
        writeln!(
            w,
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td></tr>",
            escape_html(&entry.value.to_string()),
            entry.count,
            entry.percentage
        )?;
    }
    writeln!(w, "</table>")
}

fn histogram_table<W: Write>(
    w: &mut W,
    heading: &str,
    histogram: &TemporalHistogram,
) -> std::io::Result<()> {
    writeln!(w, "<h3>{heading}</h3>")?;
    writeln!(w, "<table>\n<tr><th>Period</th><th>Photos</th></tr>")?;
    for bucket in &histogram.buckets {
        writeln!(
            w,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape_html(&bucket.label),
            bucket.count
        )?;
    }
    if histogram.undated > 0 {
        writeln!(w, "<tr><td>Undated</td><td>{}</td></tr>", histogram.undated)?;
    }
    writeln!(w, "</table>")
}

fn range<T: Display>(distribution: &Distribution, fmt: impl Fn(f64) -> T) -> String {
    match distribution.summary() {
        Some(s) => format!("{} - {}", fmt(s.min), fmt(s.max)),
        None => "N/A".to_string(),
    }
}

/// Writes a standalone HTML report: metric cards, equipment and settings tables,
/// shooting patterns, location summary and the first rows of the corpus.
pub fn write_html<W: Write>(
    corpus: &PhotoCorpus,
    insights: &InsightsSummary,
    mut w: W,
) -> Result<(), ExportError> {
    let generated = DateTime::<Utc>::from(SystemTime::now());

    writeln!(w, "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(w, "<title>Photography Portfolio Analysis Report</title>")?;
    writeln!(w, "<style>\n{STYLE}</style>\n</head>\n<body>\n<div class=\"container\">")?;
    writeln!(w, "<h1>Photography Portfolio Analysis</h1>")?;
    writeln!(
        w,
        "<p class=\"generated\">Generated on {}</p>",
        generated.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    writeln!(w, "<div class=\"metric-grid\">")?;
    metric_card(&mut w, insights.total_photos, "Total Photos")?;
    metric_card(&mut w, insights.camera_models.distinct(), "Cameras Used")?;
    metric_card(&mut w, insights.lenses.distinct(), "Lenses Used")?;
    metric_card(&mut w, insights.geotagged_photos, "GPS Tagged")?;
    metric_card(&mut w, insights.total_failures, "Failed Files")?;
    writeln!(w, "</div>")?;

    writeln!(w, "<h2>Equipment Usage</h2>")?;
    writeln!(
        w,
        "<div class=\"insight-box\"><strong>Most Used Camera:</strong> {}<br>\
         <strong>Most Used Lens:</strong> {}<br><strong>Average ISO:</strong> {}</div>",
        or_na(insights.camera_models.most_common().map(|e| &e.value)),
        or_na(insights.lenses.most_common().map(|e| &e.value)),
        or_na(insights.iso_distribution.summary().map(|s| format!("{:.0}", s.mean))),
    )?;
    frequency_table(&mut w, "Camera Distribution", "Camera", &insights.camera_models)?;
    frequency_table(&mut w, "Lens Distribution", "Lens", &insights.lenses)?;

    writeln!(w, "<h2>Technical Settings</h2>")?;
    let date_range = insights.date_range.map(|r| {
        format!(
            "{} to {}",
            r.first.format("%Y-%m-%d"),
            r.last.format("%Y-%m-%d")
        )
    });
    writeln!(
        w,
        "<div class=\"insight-box\"><strong>ISO Range:</strong> {}<br>\
         <strong>Most Common ISO:</strong> {}<br><strong>Date Range:</strong> {}</div>",
        range(&insights.iso_distribution, |v| format!("{v:.0}")),
        or_na(insights.isos.most_common().map(|e| e.value)),
        or_na(date_range),
    )?;
    frequency_table(&mut w, "Apertures", "Aperture", &insights.apertures)?;
    frequency_table(&mut w, "Shutter Speeds", "Shutter speed", &insights.shutter_speeds)?;
    frequency_table(&mut w, "Focal Lengths", "Focal length", &insights.focal_lengths)?;

    writeln!(w, "<h2>Shooting Patterns</h2>")?;
    match (insights.by_hour.peak(), insights.by_month_of_year.peak()) {
        (Some(hour), Some(month)) => writeln!(
            w,
            "<div class=\"insight-box\"><strong>Peak Shooting Hour:</strong> {}<br>\
             <strong>Most Active Month:</strong> {}</div>",
            escape_html(&hour.label),
            escape_html(&month.label)
        )?,
        _ => writeln!(
            w,
            "<div class=\"insight-box\">No capture times available for pattern analysis</div>"
        )?,
    }
    histogram_table(&mut w, "By Weekday", &insights.by_weekday)?;
    histogram_table(&mut w, "By Season", &insights.by_season)?;
    histogram_table(&mut w, "By Year", &insights.by_year)?;

    writeln!(w, "<h2>Locations</h2>")?;
    match &insights.geo_extent {
        GeoExtent::NoGeotaggedPhotos => {
            writeln!(w, "<div class=\"insight-box\">No geotagged photos</div>")?
        }
        GeoExtent::BoundingBox(bbox) => writeln!(
            w,
            "<div class=\"insight-box\"><strong>Latitude:</strong> {:.4} to {:.4}<br>\
             <strong>Longitude:</strong> {:.4} to {:.4}<br>\
             <strong>Centre:</strong> {:.4}, {:.4}</div>",
            bbox.min_latitude,
            bbox.max_latitude,
            bbox.min_longitude,
            bbox.max_longitude,
            bbox.center.latitude,
            bbox.center.longitude
        )?,
    }
    frequency_table(&mut w, "Busiest Areas", "Area", &insights.location_clusters)?;

    writeln!(w, "<h2>Raw Data Summary</h2>")?;
    writeln!(w, "<p>First {SAMPLE_ROWS} photos from your collection:</p>")?;
    writeln!(
        w,
        "<table>\n<tr><th>Filename</th><th>Camera</th><th>Lens</th><th>ISO</th>\
         <th>Aperture</th><th>Date</th></tr>"
    )?;
    for photo in corpus.photos.iter().take(SAMPLE_ROWS) {
        let filename = photo
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        writeln!(
            w,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            or_na(filename),
            or_na(photo.camera_model.as_ref()),
            or_na(photo.lens_model.as_ref()),
            or_na(photo.iso),
            or_na(photo.aperture),
            or_na(photo.captured_at.map(|t| t.format("%Y-%m-%d")))
        )?;
    }
    writeln!(w, "</table>")?;

    if !corpus.failures.is_empty() || !corpus.directory_failures.is_empty() {
        writeln!(w, "<h2>Skipped</h2>")?;
        writeln!(w, "<table>\n<tr><th>Path</th><th>Reason</th><th>Detail</th></tr>")?;
        for failure in corpus.failures.iter().chain(&corpus.directory_failures) {
            writeln!(
                w,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&failure.path.display().to_string()),
                failure.reason,
                escape_html(&failure.detail)
            )?;
        }
        writeln!(w, "</table>")?;
    }

    writeln!(w, "</div>\n</body>\n</html>")?;
    Ok(())
}
