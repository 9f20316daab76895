// Unit tests for the deduplicated marker timeline

use podium::{MarkerLabel, MarkerTimeline};

#[test]
fn test_same_label_within_window_is_suppressed() {
    let mut timeline = MarkerTimeline::new();

    assert!(timeline.push(10.0, MarkerLabel::FillerWord));
    assert!(!timeline.push(10.9, MarkerLabel::FillerWord));

    assert_eq!(timeline.len(), 1);
}

#[test]
fn test_same_label_outside_window_is_kept() {
    let mut timeline = MarkerTimeline::new();

    assert!(timeline.push(10.0, MarkerLabel::FillerWord));
    assert!(timeline.push(12.0, MarkerLabel::FillerWord));

    assert_eq!(timeline.len(), 2);
}

#[test]
fn test_different_labels_within_window_are_kept() {
    let mut timeline = MarkerTimeline::new();

    assert!(timeline.push(10.0, MarkerLabel::PaceTooFast));
    assert!(timeline.push(10.5, MarkerLabel::FillerWord));
    assert!(timeline.push(11.0, MarkerLabel::Silence));

    assert_eq!(timeline.len(), 3);
}

#[test]
fn test_timestamps_are_clamped_to_minimum() {
    let mut timeline = MarkerTimeline::new();

    timeline.push(0.0, MarkerLabel::QuestionRaised);
    timeline.push(-3.0, MarkerLabel::Silence);

    for marker in timeline.markers() {
        assert!(marker.offset_secs >= 0.1);
    }
}

#[test]
fn test_no_adjacent_same_label_markers_within_window() {
    // Property from the timeline contract: whatever the push sequence, no
    // two adjacent markers share a label within 1.5s of each other.
    let mut timeline = MarkerTimeline::new();
    let labels = [
        MarkerLabel::FillerWord,
        MarkerLabel::FillerWord,
        MarkerLabel::PaceTooFast,
        MarkerLabel::FillerWord,
        MarkerLabel::PaceTooFast,
        MarkerLabel::PaceTooFast,
    ];

    let mut t = 0.0;
    for label in labels {
        timeline.push(t, label);
        t += 0.4;
    }

    let markers = timeline.markers();
    for pair in markers.windows(2) {
        if pair[0].label == pair[1].label {
            assert!(
                pair[1].offset_secs - pair[0].offset_secs > 1.5,
                "adjacent same-label markers too close: {:?}",
                pair
            );
        }
    }
}

#[test]
fn test_dedup_only_checks_the_tail() {
    let mut timeline = MarkerTimeline::new();

    timeline.push(10.0, MarkerLabel::FillerWord);
    timeline.push(10.5, MarkerLabel::PaceTooFast);
    // Same label as the first marker and within its window, but the tail is
    // the pace marker, so this is kept
    assert!(timeline.push(11.0, MarkerLabel::FillerWord));

    assert_eq!(timeline.len(), 3);
}
