//! Landmark decoding for the JS boundary
//!
//! MediaPipe hands us a flat Float32Array. With visibility it is 33 × 4
//! values (x, y, z, visibility); without, 33 × 3 and every landmark is
//! taken as fully visible. An empty array means no person was detected.

use crate::pose::{Frame, Landmark, LANDMARK_COUNT};
use super::error::BridgeError;

const WITH_VISIBILITY: usize = LANDMARK_COUNT * 4;
const WITHOUT_VISIBILITY: usize = LANDMARK_COUNT * 3;

pub fn parse_frame(data: &[f32]) -> Result<Option<Frame>, BridgeError> {
    let stride = match data.len() {
        0 => return Ok(None),
        WITH_VISIBILITY => 4,
        WITHOUT_VISIBILITY => 3,
        n => {
            log::warn!("rejected landmark array of length {}", n);
            return Err(BridgeError::InvalidLandmarkLength(n));
        }
    };

    let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
    let mut rejected = 0;
    for (landmark, chunk) in landmarks.iter_mut().zip(data.chunks_exact(stride)) {
        let visibility = if stride == 4 { chunk[3] } else { 1.0 };
        let finite = chunk.iter().all(|v| v.is_finite());
        if !finite {
            rejected += 1;
        }
        *landmark = Landmark {
            x: chunk[0],
            y: chunk[1],
            z: chunk[2],
            // non-finite values never reach the geometry as visible points
            visibility: if finite { visibility } else { 0.0 },
        };
    }
    if rejected > 0 {
        log::warn!("{} landmark(s) with non-finite values marked hidden", rejected);
    }
    Ok(Some(Frame::new(landmarks)))
}
