use super::*;

fn entry(confidence: f64) -> HistoryEntry {
    HistoryEntry {
        id: 7,
        created_at: "2024-05-01T10:00:00".to_owned(),
        image_path: "7.jpg".to_owned(),
        prediction: "Tomato_Leaf_Mold".to_owned(),
        confidence,
    }
}

#[test]
fn badge_is_high_only_above_eighty() {
    assert_eq!(confidence_tone(&entry(80.1)), "high");
    assert_eq!(confidence_tone(&entry(80.0)), "low");
    assert_eq!(confidence_tone(&entry(12.0)), "low");
}

#[test]
fn row_text_matches_report_format() {
    let row = entry(91.0);
    assert_eq!(row.confidence_text(), "91.0%");
    assert_eq!(row.date_label(), "May 1, 2024");
}
