use anyhow::{bail, Result};

// MediaPipe FaceMesh indices (refined landmarks; iris points require the
// refine_landmarks variant of the mesh)
const LEFT_EYE_TOP: usize = 159;
const LEFT_EYE_BOTTOM: usize = 145;
const LEFT_IRIS: usize = 468;
const RIGHT_EYE_TOP: usize = 386;
const RIGHT_EYE_BOTTOM: usize = 374;
const RIGHT_IRIS: usize = 473;

/// Averaged ratio above which the speaker counts as looking down at a script
const LOOKING_DOWN_THRESHOLD: f64 = 0.57;

/// Eyelid separation (px) below which tracking is unstable (blink/closed eye)
const MIN_EYE_HEIGHT: f64 = 3.0;

/// Ratio reported when the eye is closed or tracking is unstable (frontal)
const FRONTAL_RATIO: f64 = 0.5;

/// A detected facial-landmark set, 2D points projected to pixel space.
#[derive(Debug, Clone)]
pub struct FaceLandmarks {
    points: Vec<[f64; 2]>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    fn point(&self, index: usize) -> Result<[f64; 2]> {
        match self.points.get(index) {
            Some(p) => Ok(*p),
            None => bail!(
                "landmark index {} out of range ({} points)",
                index,
                self.points.len()
            ),
        }
    }
}

/// Per-frame gaze classification.
///
/// `Undetermined` frames (no face) count toward neither gaze bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GazeSample {
    /// Looking at the audience (camera)
    Audience,
    /// Looking down at a script
    Script,
    /// No face detected
    Undetermined,
}

/// Diagnostic output of one frame's gaze estimate.
///
/// The ratios and pupil positions exist so a UI layer can draw an overlay;
/// scoring only consumes `sample`.
#[derive(Debug, Clone)]
pub struct GazeEstimate {
    pub sample: GazeSample,
    pub left_ratio: f64,
    pub right_ratio: f64,
    pub left_pupil: [f64; 2],
    pub right_pupil: [f64; 2],
}

/// Vertical gaze-ratio estimator.
///
/// For each eye the ratio is distance(eyelid-top, pupil) over
/// distance(eyelid-top, eyelid-bottom). Thresholding a ratio instead of an
/// absolute angle keeps the classifier robust to camera distance and head
/// size without calibration.
#[derive(Debug, Default)]
pub struct FrameGazeEstimator;

impl FrameGazeEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Classify one frame's landmarks.
    ///
    /// An out-of-range landmark index is a recoverable error: the caller
    /// skips the frame and continues on the next one.
    pub fn estimate(&self, landmarks: &FaceLandmarks) -> Result<GazeEstimate> {
        let left_pupil = landmarks.point(LEFT_IRIS)?;
        let right_pupil = landmarks.point(RIGHT_IRIS)?;

        let left_ratio = eye_ratio(
            landmarks.point(LEFT_EYE_TOP)?,
            landmarks.point(LEFT_EYE_BOTTOM)?,
            left_pupil,
        );
        let right_ratio = eye_ratio(
            landmarks.point(RIGHT_EYE_TOP)?,
            landmarks.point(RIGHT_EYE_BOTTOM)?,
            right_pupil,
        );

        let avg_ratio = (left_ratio + right_ratio) / 2.0;
        let sample = if avg_ratio > LOOKING_DOWN_THRESHOLD {
            GazeSample::Script
        } else {
            GazeSample::Audience
        };

        Ok(GazeEstimate {
            sample,
            left_ratio,
            right_ratio,
            left_pupil,
            right_pupil,
        })
    }
}

/// Normalized vertical position of the pupil between the eyelid landmarks.
fn eye_ratio(top: [f64; 2], bottom: [f64; 2], pupil: [f64; 2]) -> f64 {
    let eye_height = distance(top, bottom);
    if eye_height < MIN_EYE_HEIGHT {
        return FRONTAL_RATIO;
    }
    distance(top, pupil) / eye_height
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}

/// Build a landmark set large enough for the gaze indices, with every point
/// at the origin except the ones given. Test helper for synthetic faces.
pub fn synthetic_landmarks(
    left: ([f64; 2], [f64; 2], [f64; 2]),
    right: ([f64; 2], [f64; 2], [f64; 2]),
) -> FaceLandmarks {
    let mut points = vec![[0.0, 0.0]; RIGHT_IRIS + 1];
    points[LEFT_EYE_TOP] = left.0;
    points[LEFT_EYE_BOTTOM] = left.1;
    points[LEFT_IRIS] = left.2;
    points[RIGHT_EYE_TOP] = right.0;
    points[RIGHT_EYE_BOTTOM] = right.1;
    points[RIGHT_IRIS] = right.2;
    FaceLandmarks::new(points)
}
