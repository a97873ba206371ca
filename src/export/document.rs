use crate::export::error::ExportError;
use crate::insights::InsightsSummary;
use crate::structs::{FailureRecord, PhotoCorpus, PhotoRecord};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Document<'a> {
    photos: &'a [PhotoRecord],
    failures: &'a [FailureRecord],
    directory_failures: &'a [FailureRecord],
    insights: &'a InsightsSummary,
}

/// Writes the corpus and its insights as one pretty-printed JSON object with
/// `photos`, `failures`, `directory_failures` and `insights` keys.
pub fn write_json<W: Write>(
    corpus: &PhotoCorpus,
    insights: &InsightsSummary,
    mut writer: W,
) -> Result<(), ExportError> {
    let document = Document {
        photos: &corpus.photos,
        failures: &corpus.failures,
        directory_failures: &corpus.directory_failures,
        insights,
    };
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::generate_insights;
    use crate::structs::FailureReason;
    use crate::test_support::record;
    use serde_json::Value;

    #[test]
    fn test_document_shape() {
        let mut photo = record("a.jpg");
        photo.iso = Some(200);
        let corpus = PhotoCorpus::new(
            vec![photo, record("b.jpg")],
            vec![FailureRecord::new("c.jpg", FailureReason::UnsupportedFormat, "zero-byte file")],
            vec![FailureRecord::new("locked", FailureReason::DirectoryUnreadable, "denied")],
        );
        let insights = generate_insights(&corpus);

        let mut out = Vec::new();
        write_json(&corpus, &insights, &mut out).unwrap();
        let doc: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(doc["photos"].as_array().unwrap().len(), 2);
        assert_eq!(doc["photos"][0]["iso"], 200);
        assert_eq!(doc["photos"][1]["iso"], Value::Null);
        assert_eq!(doc["failures"][0]["reason"], "unsupported_format");
        assert_eq!(doc["failures"][0]["detail"], "zero-byte file");
        assert_eq!(doc["directory_failures"][0]["reason"], "directory_unreadable");
        assert_eq!(doc["insights"]["total_photos"], 2);
        assert_eq!(doc["insights"]["isos"]["coverage"], 1);
        assert_eq!(doc["insights"]["geo_extent"]["status"], "no_geotagged_photos");

        let back: InsightsSummary = serde_json::from_value(doc["insights"].clone()).unwrap();
        assert_eq!(back, insights);
    }
}
