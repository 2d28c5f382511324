//! Conveniences for writing complete documents.
//!
//! [`CourseOptions`] and [`ActivityOptions`] describe a whole document up
//! front; the [`writer`] module sequences it over a byte sink. Options are
//! checked before any bytes are emitted, so a rejected document leaves the
//! sink untouched.

use alloc::string::String;

use thiserror::Error;

use crate::sans::profile;

#[cfg(feature = "std")]
pub mod writer;

#[cfg(feature = "std")]
pub use writer::Writer;

/// An error validating document options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A numeric option holds a non-finite value.
    #[error("Option '{0}' must be finite.")]
    NotFinite(&'static str),
    /// A symbolic option names a value outside its table.
    #[error("Unknown value '{value}' for option '{option}'.")]
    UnknownName {
        option: &'static str,
        value: String,
    },
}

/// Options describing a course document. All fields are required.
#[derive(Debug, Clone)]
pub struct CourseOptions {
    /// Course name (truncated to 15 bytes on the wire).
    pub name: String,
    /// Unix timestamp of the course start.
    pub start_time: u64,
    /// Expected traversal time, in seconds.
    pub duration: u64,
    /// Number of course points the producer will write.
    pub course_point_count: u32,
    /// Number of track points the producer will write.
    pub track_point_count: u32,
    /// Unix timestamp the document was created.
    pub time_created: u64,
    /// Total course distance, in meters.
    pub total_distance: f64,
    /// Starting longitude, in degrees.
    pub start_x: f64,
    /// Starting latitude, in degrees.
    pub start_y: f64,
    /// Ending longitude, in degrees.
    pub end_x: f64,
    /// Ending latitude, in degrees.
    pub end_y: f64,
}

impl CourseOptions {
    /// Check option values before any bytes are emitted.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let numbers = [
            ("total_distance", self.total_distance),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("end_x", self.end_x),
            ("end_y", self.end_y),
        ];

        for (name, value) in numbers {
            if !value.is_finite() {
                return Err(OptionsError::NotFinite(name));
            }
        }

        Ok(())
    }
}

/// Options describing an activity document.
///
/// A single lap and session summarize the whole activity. The summary
/// fields are optional; omitted ones are written as absent.
#[derive(Debug, Clone, Default)]
pub struct ActivityOptions {
    /// Unix timestamp of the activity start.
    pub start_time: u64,
    /// Elapsed time, in seconds.
    pub duration: u64,
    /// Number of track points the producer will write.
    pub track_point_count: u32,
    /// Unix timestamp the document was created.
    pub time_created: u64,
    /// Total distance covered, in meters.
    pub total_distance: f64,
    /// Sport name, resolved through the sport table.
    pub sport: String,
    /// Sub-sport name, resolved through the sub-sport table.
    pub sub_sport: String,
    /// Unix timestamp of the activity end; defaults to the start plus the
    /// duration.
    pub end_time: Option<u64>,
    /// Starting longitude, in degrees.
    pub start_x: Option<f64>,
    /// Starting latitude, in degrees.
    pub start_y: Option<f64>,
    /// Ending longitude, in degrees.
    pub end_x: Option<f64>,
    /// Ending latitude, in degrees.
    pub end_y: Option<f64>,
    /// North-east bound longitude; defaults to the ending longitude.
    pub nec_x: Option<f64>,
    /// North-east bound latitude; defaults to the ending latitude.
    pub nec_y: Option<f64>,
    /// South-west bound longitude; defaults to the starting longitude.
    pub swc_x: Option<f64>,
    /// South-west bound latitude; defaults to the starting latitude.
    pub swc_y: Option<f64>,
    /// Total climb, in meters.
    pub total_ascent: Option<u16>,
    /// Total descent, in meters.
    pub total_descent: Option<u16>,
    /// Average speed, in millimeters per second.
    pub avg_speed: Option<u16>,
    /// Maximum speed, in millimeters per second.
    pub max_speed: Option<u16>,
    /// Energy expended, in kilocalories.
    pub total_calories: Option<u16>,
}

impl ActivityOptions {
    /// Check option values before any bytes are emitted.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let numbers = [
            ("total_distance", Some(self.total_distance)),
            ("start_x", self.start_x),
            ("start_y", self.start_y),
            ("end_x", self.end_x),
            ("end_y", self.end_y),
            ("nec_x", self.nec_x),
            ("nec_y", self.nec_y),
            ("swc_x", self.swc_x),
            ("swc_y", self.swc_y),
        ];

        for (name, value) in numbers {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(OptionsError::NotFinite(name));
            }
        }

        if profile::lookup(profile::SPORT, &self.sport).is_none() {
            return Err(OptionsError::UnknownName {
                option: "sport",
                value: self.sport.clone(),
            });
        }

        if profile::lookup(profile::SUB_SPORT, &self.sub_sport).is_none() {
            return Err(OptionsError::UnknownName {
                option: "sub_sport",
                value: self.sub_sport.clone(),
            });
        }

        Ok(())
    }

    pub(crate) fn resolved_end_time(&self) -> u64 {
        self.end_time.unwrap_or(self.start_time + self.duration)
    }
}
