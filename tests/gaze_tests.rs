// Unit tests for the vertical gaze-ratio estimator
//
// Eye geometry: eyelid top at y=0, eyelid bottom at y=10, so the ratio is
// simply pupil_y / 10 and the 0.57 threshold is easy to place exactly.

use podium::video::gaze::synthetic_landmarks;
use podium::video::{FaceLandmarks, FrameGazeEstimator, GazeSample};

fn eyes(pupil_y: f64) -> podium::video::FaceLandmarks {
    synthetic_landmarks(
        ([0.0, 0.0], [0.0, 10.0], [0.0, pupil_y]),
        ([50.0, 0.0], [50.0, 10.0], [50.0, pupil_y]),
    )
}

#[test]
fn test_pupil_low_in_eye_classifies_as_script() {
    let estimator = FrameGazeEstimator::new();
    let estimate = estimator.estimate(&eyes(6.0)).unwrap();

    assert_eq!(estimate.sample, GazeSample::Script);
    assert!((estimate.left_ratio - 0.6).abs() < 1e-9);
}

#[test]
fn test_pupil_centered_classifies_as_audience() {
    let estimator = FrameGazeEstimator::new();
    let estimate = estimator.estimate(&eyes(5.0)).unwrap();

    assert_eq!(estimate.sample, GazeSample::Audience);
}

#[test]
fn test_threshold_is_strictly_greater_than() {
    let estimator = FrameGazeEstimator::new();

    // Height-100 geometry so the ratio is pupil_y/100: IEEE division gives
    // the same f64 for 57.0/100.0 as the 0.57 threshold itself, making the
    // boundary exact. At the threshold is still audience; above flips.
    let boundary = synthetic_landmarks(
        ([0.0, 0.0], [0.0, 100.0], [0.0, 57.0]),
        ([50.0, 0.0], [50.0, 100.0], [50.0, 57.0]),
    );
    let at_threshold = estimator.estimate(&boundary).unwrap();
    assert_eq!(at_threshold.left_ratio, 0.57);
    assert_eq!(at_threshold.sample, GazeSample::Audience);

    let just_above = synthetic_landmarks(
        ([0.0, 0.0], [0.0, 100.0], [0.0, 58.0]),
        ([50.0, 0.0], [50.0, 100.0], [50.0, 58.0]),
    );
    assert_eq!(
        estimator.estimate(&just_above).unwrap().sample,
        GazeSample::Script
    );
}

#[test]
fn test_closed_eye_defaults_to_frontal_ratio() {
    // Eyelid separation of 2px is below the 3px stability minimum
    let landmarks = synthetic_landmarks(
        ([0.0, 0.0], [0.0, 2.0], [0.0, 9.0]),
        ([50.0, 0.0], [50.0, 2.0], [50.0, 9.0]),
    );

    let estimator = FrameGazeEstimator::new();
    let estimate = estimator.estimate(&landmarks).unwrap();

    assert_eq!(estimate.left_ratio, 0.5);
    assert_eq!(estimate.right_ratio, 0.5);
    assert_eq!(estimate.sample, GazeSample::Audience);
}

#[test]
fn test_mixed_eyes_average_above_threshold() {
    // One eye at 0.5 (closed), the other deep down at 0.9: average 0.7
    let landmarks = synthetic_landmarks(
        ([0.0, 0.0], [0.0, 2.0], [0.0, 5.0]),
        ([50.0, 0.0], [50.0, 10.0], [50.0, 9.0]),
    );

    let estimator = FrameGazeEstimator::new();
    let estimate = estimator.estimate(&landmarks).unwrap();

    assert_eq!(estimate.sample, GazeSample::Script);
}

#[test]
fn test_out_of_range_landmarks_are_a_recoverable_error() {
    // Far too few points for the iris indices
    let landmarks = FaceLandmarks::new(vec![[0.0, 0.0]; 10]);

    let estimator = FrameGazeEstimator::new();
    assert!(estimator.estimate(&landmarks).is_err());
}
