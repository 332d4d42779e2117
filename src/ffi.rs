//! C Foreign Function Interface (FFI) for Stagegrid.
//!
//! This module exposes the grid calculator to native hosts (Swift,
//! Kotlin/JNI, C++). All functions are `extern "C"` with stable ABI.
//!
//! # Safety
//!
//! Pointer arguments must be null or valid for the documented length.
//!
//! # Example (C)
//!
//! ```c
//! #include "stagegrid.h"
//!
//! StageGridRect frames[12];
//! size_t written = 0;
//! StageGridResult r = stagegrid_calculate_frames(4, 390.0, 844.0, 8.0, frames, 12, &written);
//! if (r != 0) { /* 2 = too many participants: cap or paginate */ }
//! ```

// FFI modules intentionally use unsafe and no_mangle
#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]
#![allow(clippy::missing_safety_doc)]

use crate::error::LayoutError;
use crate::layout::{calculate_frames, Rect, MAX_PARTICIPANTS};
use std::os::raw::{c_char, c_int};

// =============================================================================
// Result and Data Types
// =============================================================================

/// Result codes for FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageGridResult {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer passed.
    NullPointer = 1,
    /// Participant count above the template table.
    UnsupportedCount = 2,
    /// Negative or non-finite argument.
    InvalidInput = 3,
    /// Output buffer cannot hold every frame.
    BufferTooSmall = 4,
}

impl From<&LayoutError> for StageGridResult {
    fn from(err: &LayoutError) -> Self {
        match err {
            LayoutError::UnsupportedCount { .. } => Self::UnsupportedCount,
            LayoutError::InvalidInput { .. } | LayoutError::InvalidTemplate { .. } => Self::InvalidInput,
        }
    }
}

/// C-compatible rectangle.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageGridRect {
    /// X coordinate of the top-left corner.
    pub x: f64,
    /// Y coordinate of the top-left corner.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl From<Rect> for StageGridRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

// =============================================================================
// Layout Functions
// =============================================================================

/// Compute participant frames into `out`.
///
/// `out` must point to `capacity` writable rects (it may be null when
/// `capacity` is 0). The number of frames is always stored in `written`
/// on success or `BufferTooSmall`, so callers can size a retry.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn stagegrid_calculate_frames(
    participant_count: c_int,
    width: f64,
    height: f64,
    padding: f64,
    out: *mut StageGridRect,
    capacity: usize,
    written: *mut usize,
) -> StageGridResult {
    if written.is_null() {
        return StageGridResult::NullPointer;
    }
    *written = 0;

    let frames = match calculate_frames(i64::from(participant_count), width, height, padding) {
        Ok(frames) => frames,
        Err(e) => {
            tracing::debug!(participant_count, error = %e, "ffi frame calculation failed");
            return StageGridResult::from(&e);
        }
    };

    *written = frames.len();
    if frames.is_empty() {
        return StageGridResult::Ok;
    }
    if frames.len() > capacity {
        return StageGridResult::BufferTooSmall;
    }
    if out.is_null() {
        return StageGridResult::NullPointer;
    }

    let slots = std::slice::from_raw_parts_mut(out, frames.len());
    for (slot, frame) in slots.iter_mut().zip(frames) {
        *slot = frame.into();
    }
    StageGridResult::Ok
}

/// Largest participant count the built-in template table supports.
#[unsafe(no_mangle)]
pub extern "C" fn stagegrid_max_participants() -> usize {
    MAX_PARTICIPANTS
}

// =============================================================================
// Version Information
// =============================================================================

/// Get the Stagegrid version string.
#[unsafe(no_mangle)]
pub extern "C" fn stagegrid_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr().cast::<c_char>()
}
