//! The image pipeline (C5): decode bytes, walk a `Plan` left-to-right
//! against the decoded bitmap, encode the result as PNG.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use crate::operation::{FlipDirection, Operation, Plan};
use crate::response::Response;

/// The result of running a `Plan` through the pipeline.
pub enum PipelineOutcome {
    /// Every stage succeeded; `operations` should be incremented by
    /// `stages_completed` and the response sent as-is.
    Success { response: Response, stages_completed: u64 },
    /// Decoding the body failed before any stage ran.
    DecodeFailed(Response),
    /// A stage failed partway through; `stages_completed` counts the
    /// stages that succeeded before the failing one.
    StageFailed { response: Response, stages_completed: u64 },
}

/// Runs the full decode → transform → encode cycle for one request body.
#[must_use]
pub fn run(body: &[u8], plan: &Plan) -> PipelineOutcome {
    let Ok(decoded) = image::load_from_memory(body) else {
        return PipelineOutcome::DecodeFailed(Response::text_error(422, "Invalid image received\n".to_string()));
    };

    let mut bitmap = decoded;
    let mut stages_completed = 0u64;

    for op in &plan.0 {
        match apply(&bitmap, op) {
            Some(next) => {
                bitmap = next;
                stages_completed += 1;
            },
            None => {
                let message = format!("Operation did not complete: {op}\n");
                return PipelineOutcome::StageFailed {
                    response: Response::text_error(501, message),
                    stages_completed,
                };
            },
        }
    }

    let mut encoded = Cursor::new(Vec::new());
    match bitmap.write_to(&mut encoded, ImageFormat::Png) {
        Ok(()) => PipelineOutcome::Success {
            response: Response::new(200, "image/png", encoded.into_inner()),
            stages_completed,
        },
        Err(_) => {
            let op = plan.0.last().copied();
            let message = match op {
                Some(op) => format!("Operation did not complete: {op}\n"),
                None => "Operation did not complete: encode\n".to_string(),
            };
            PipelineOutcome::StageFailed { response: Response::text_error(501, message), stages_completed }
        },
    }
}

/// Applies one `Operation` to the current bitmap, returning `None` on
/// stage failure (rotate/scale producing a degenerate result, or flip's
/// in-place call failing).
fn apply(bitmap: &DynamicImage, op: &Operation) -> Option<DynamicImage> {
    match *op {
        Operation::Rotate { angle } => {
            let radians = (angle as f32).to_radians();
            let rgba = bitmap.to_rgba8();
            let (w, h) = (rgba.width(), rgba.height());

            if w == 0 || h == 0 {
                return None;
            }

            let rotated = rotate_about_center(&rgba, radians, Interpolation::Bilinear, image::Rgba([0, 0, 0, 0]));

            if rotated.width() == 0 || rotated.height() == 0 {
                return None;
            }

            Some(DynamicImage::ImageRgba8(rotated))
        },
        Operation::Flip { direction } => {
            let flipped = match direction {
                FlipDirection::Horizontal => bitmap.fliph(),
                FlipDirection::Vertical => bitmap.flipv(),
            };
            Some(flipped)
        },
        Operation::Scale { width, height } => {
            if width == 0 || height == 0 {
                return None;
            }
            Some(bitmap.resize_exact(width, height, image::imageops::FilterType::Triangle))
        },
    }
}
