//! Sink-based document writer.
//!
//! _Requires Cargo feature `std`._

use core::fmt;

use alloc::vec::Vec;

use std::io::Write;

use thiserror::Error;

use crate::avec::{ActivityOptions, CourseOptions, OptionsError};
use crate::sans::check::Crc;
use crate::sans::record::{self, EncodeError, Values};
use crate::sans::schema::MessageKind;

extern crate std;

/// Manufacturer number written in file identification (Garmin).
const MANUFACTURER: u16 = 1;
/// Product number written in file identification (Garmin Connect).
const PRODUCT: u16 = 65534;
/// File type marker for course documents.
const FILE_TYPE_COURSE: u8 = 6;
/// File type marker for activity documents.
const FILE_TYPE_ACTIVITY: u8 = 4;

/// Errors occurring while writing a document.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Rejected document options.
    #[error(transparent)]
    Options(#[from] OptionsError),
    /// An operation was invoked outside its legal state.
    #[error("Can't {operation} from the {state} state.")]
    State { operation: &'static str, state: State },
    /// An error assembling a record.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Protocol states of a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No document in progress.
    Idle,
    /// Inside a document, outside any point scope.
    Writing,
    /// Inside a course point scope.
    CoursePoints,
    /// Inside a track point scope.
    TrackPoints,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Writing => "writing",
            Self::CoursePoints => "course point",
            Self::TrackPoints => "track point",
        })
    }
}

/// A document writer over a byte sink.
///
/// One writer drives one output stream at a time: record bytes are appended
/// to the sink in call order, feeding the running check, and local numbers
/// are handed out to message kinds as they first appear. A writer is owned
/// exclusively by the call sequence using it.
///
/// A failed document always closes — the check trailer is still appended
/// and the writer returns to idle — but the stream contents are suspect and
/// should be discarded.
#[derive(Debug)]
pub struct Writer<W: Write> {
    sink: W,
    state: State,
    crc: Crc,
    locals: Vec<MessageKind>,
}

impl<W: Write> Writer<W> {
    /// Create a writer over a sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            state: State::Idle,
            crc: Crc::new(),
            locals: Vec::new(),
        }
    }

    /// The writer's current protocol state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Consume the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write a complete course document.
    ///
    /// Writes the document header, file identification, course, lap, and
    /// timer start records, then hands the writer to the producer (which
    /// may open [`Writer::course_points`] and [`Writer::track_points`]
    /// scopes), and closes with a timer stop record and the check trailer.
    /// The closing records and the reset to idle happen on every exit path,
    /// including producer failure; the first error encountered is returned.
    pub fn course<F>(&mut self, options: &CourseOptions, produce: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        if self.state != State::Idle {
            return Err(Error::State {
                operation: "start a course",
                state: self.state,
            });
        }
        options.validate()?;

        self.begin();
        let result = self.open_course(options).and_then(|()| produce(self));
        let closed = self.close_course(options);

        self.state = State::Idle;
        result.and(closed)
    }

    /// Write a complete activity document.
    ///
    /// Writes the document header, file identification, and timer start
    /// records, hands the writer to the producer (track points go in a
    /// [`Writer::track_points`] scope), then closes with a timer stop
    /// record, the lap and session summaries, the activity record, and the
    /// check trailer. Closing follows every exit path, as with
    /// [`Writer::course`].
    pub fn activity<F>(&mut self, options: &ActivityOptions, produce: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        if self.state != State::Idle {
            return Err(Error::State {
                operation: "start an activity",
                state: self.state,
            });
        }
        options.validate()?;

        self.begin();
        let result = self.open_activity(options).and_then(|()| produce(self));
        let closed = self.close_activity(options);

        self.state = State::Idle;
        result.and(closed)
    }

    /// Open a scope for writing course points.
    pub fn course_points<F>(&mut self, produce: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        if self.state != State::Writing {
            return Err(Error::State {
                operation: "open a course point scope",
                state: self.state,
            });
        }

        self.state = State::CoursePoints;
        let result = produce(self);
        self.state = State::Writing;

        result
    }

    /// Open a scope for writing track points.
    pub fn track_points<F>(&mut self, produce: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        if self.state != State::Writing {
            return Err(Error::State {
                operation: "open a track point scope",
                state: self.state,
            });
        }

        self.state = State::TrackPoints;
        let result = produce(self);
        self.state = State::Writing;

        result
    }

    /// Write one course point. Legal only inside a
    /// [`Writer::course_points`] scope.
    pub fn course_point(&mut self, values: &Values) -> Result<(), Error> {
        if self.state != State::CoursePoints {
            return Err(Error::State {
                operation: "write a course point",
                state: self.state,
            });
        }

        self.write_message(MessageKind::CoursePoint, values)
    }

    /// Write one track point. Legal only inside a
    /// [`Writer::track_points`] scope.
    pub fn track_point(&mut self, values: &Values) -> Result<(), Error> {
        if self.state != State::TrackPoints {
            return Err(Error::State {
                operation: "write a track point",
                state: self.state,
            });
        }

        self.write_message(MessageKind::Record, values)
    }

    fn begin(&mut self) {
        self.state = State::Writing;
        self.crc = Crc::new();
        self.locals.clear();
    }

    fn open_course(&mut self, options: &CourseOptions) -> Result<(), Error> {
        let data_size = declared_size(&[
            (MessageKind::FileId, 1),
            (MessageKind::Course, 1),
            (MessageKind::Lap, 1),
            (MessageKind::Event, 2),
            (MessageKind::CoursePoint, options.course_point_count),
            (MessageKind::Record, options.track_point_count),
        ]);
        self.sink.write_all(&record::file_header(data_size))?;

        self.write_message(
            MessageKind::FileId,
            &file_id_values(options.time_created, FILE_TYPE_COURSE),
        )?;

        self.write_message(
            MessageKind::Course,
            &Values::new().with("name", options.name.as_str()),
        )?;

        let lap = Values::new()
            .with("timestamp", options.start_time)
            .with("start_time", options.start_time)
            .with("start_x", options.start_x)
            .with("start_y", options.start_y)
            .with("end_x", options.end_x)
            .with("end_y", options.end_y)
            .with("total_distance", options.total_distance);
        self.write_message(MessageKind::Lap, &lap)?;

        self.write_message(
            MessageKind::Event,
            &timer_event(options.start_time, "start"),
        )
    }

    fn close_course(&mut self, options: &CourseOptions) -> Result<(), Error> {
        self.write_message(
            MessageKind::Event,
            &timer_event(options.start_time + options.duration, "stop_disable_all"),
        )?;

        self.write_trailer()
    }

    fn open_activity(&mut self, options: &ActivityOptions) -> Result<(), Error> {
        let data_size = declared_size(&[
            (MessageKind::FileId, 1),
            (MessageKind::Event, 2),
            (MessageKind::Record, options.track_point_count),
            (MessageKind::Lap, 1),
            (MessageKind::Session, 1),
            (MessageKind::Activity, 1),
        ]);
        self.sink.write_all(&record::file_header(data_size))?;

        self.write_message(
            MessageKind::FileId,
            &file_id_values(options.time_created, FILE_TYPE_ACTIVITY),
        )?;

        self.write_message(
            MessageKind::Event,
            &timer_event(options.start_time, "start"),
        )
    }

    fn close_activity(&mut self, options: &ActivityOptions) -> Result<(), Error> {
        let end_time = options.resolved_end_time();

        self.write_message(
            MessageKind::Event,
            &timer_event(end_time, "stop_disable_all"),
        )?;

        let mut lap = Values::new()
            .with("timestamp", end_time)
            .with("start_time", options.start_time)
            .with("total_distance", options.total_distance);
        let positions = [
            ("start_x", options.start_x),
            ("start_y", options.start_y),
            ("end_x", options.end_x),
            ("end_y", options.end_y),
        ];
        for (name, value) in positions {
            if let Some(value) = value {
                lap.set(name, value);
            }
        }
        self.write_message(MessageKind::Lap, &lap)?;

        let mut session = Values::new()
            .with("message_index", 0u16)
            .with("timestamp", end_time)
            .with("start_time", options.start_time)
            .with("total_elapsed_time", options.duration)
            .with("total_timer_time", options.duration)
            .with("total_distance", options.total_distance)
            .with("num_laps", 1u16)
            .with("first_lap_index", 0u16)
            .with("event", "session")
            .with("event_type", "stop")
            .with("trigger", "activity_end")
            .with("sport", options.sport.as_str())
            .with("sub_sport", options.sub_sport.as_str());
        let positions = [
            ("start_position_long", options.start_x),
            ("start_position_lat", options.start_y),
            ("nec_long", options.nec_x.or(options.end_x)),
            ("nec_lat", options.nec_y.or(options.end_y)),
            ("swc_long", options.swc_x.or(options.start_x)),
            ("swc_lat", options.swc_y.or(options.start_y)),
        ];
        for (name, value) in positions {
            if let Some(value) = value {
                session.set(name, value);
            }
        }
        let summaries = [
            ("total_ascent", options.total_ascent),
            ("total_descent", options.total_descent),
            ("avg_speed", options.avg_speed),
            ("max_speed", options.max_speed),
            ("total_calories", options.total_calories),
        ];
        for (name, value) in summaries {
            if let Some(value) = value {
                session.set(name, value);
            }
        }
        self.write_message(MessageKind::Session, &session)?;

        // Only a handful of sports have a matching activity classification.
        let activity_type = match options.sport.as_str() {
            "running" | "cycling" | "transition" | "fitness_equipment" | "swimming" => {
                options.sport.as_str()
            }
            _ => "generic",
        };
        let activity = Values::new()
            .with("timestamp", end_time)
            .with("total_timer_time", options.duration)
            .with("num_sessions", 1u16)
            .with("type", activity_type)
            .with("event", "activity")
            .with("event_type", "stop");
        self.write_message(MessageKind::Activity, &activity)?;

        self.write_trailer()
    }

    /// Write one message, emitting its definition record the first time the
    /// kind appears in this stream.
    fn write_message(&mut self, kind: MessageKind, values: &Values) -> Result<(), Error> {
        let local_number = match self.locals.iter().position(|k| *k == kind) {
            Some(local_number) => local_number as u8,
            None => {
                let local_number = self.locals.len() as u8;
                self.locals.push(kind);
                self.write_record(&record::definition_message(kind, local_number))?;
                local_number
            }
        };

        self.write_record(&record::data_message(kind, local_number, values)?)
    }

    fn write_record(&mut self, r: &[u8]) -> Result<(), Error> {
        self.sink.write_all(r)?;
        self.crc.update(r);
        Ok(())
    }

    fn write_trailer(&mut self) -> Result<(), Error> {
        self.sink.write_all(&record::crc_trailer(self.crc.value()))?;
        Ok(())
    }
}

/// The record-section size declared in the document header: one definition
/// record per message kind in use, plus a data record per instance.
fn declared_size(counts: &[(MessageKind, u32)]) -> u32 {
    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| {
            (record::definition_message_size(*kind)
                + record::data_message_size(*kind) * *count as usize) as u32
        })
        .sum()
}

fn file_id_values(time_created: u64, file_type: u8) -> Values {
    Values::new()
        .with("serial_number", 0u32)
        .with("time_created", time_created)
        .with("manufacturer", MANUFACTURER)
        .with("product", PRODUCT)
        .with("type", file_type)
}

fn timer_event(timestamp: u64, event_type: &'static str) -> Values {
    Values::new()
        .with("timestamp", timestamp)
        .with("event", "timer")
        .with("event_type", event_type)
        .with("event_group", 0u8)
}
