//! Message schemas: global numbers and ordered field lists.
//!
//! A schema fixes, once, the order and typing of every field a message
//! kind can carry. Definition and data records for a kind are both driven
//! off the same schema, so their layouts always agree. Schemas are static
//! configuration data, never mutated at runtime.

use super::profile;
use super::profile::ValueTable;
use super::types::FieldType;

/// A message kind supported by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    FileId,
    Course,
    Lap,
    CoursePoint,
    Record,
    Event,
    Session,
    Activity,
}

impl MessageKind {
    /// The wire schema for this message kind.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Self::FileId => &FILE_ID,
            Self::Course => &COURSE,
            Self::Lap => &LAP,
            Self::CoursePoint => &COURSE_POINT,
            Self::Record => &RECORD,
            Self::Event => &EVENT,
            Self::Session => &SESSION,
            Self::Activity => &ACTIVITY,
        }
    }
}

/// The wire schema of a message kind.
#[derive(Debug)]
pub struct Schema {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Global message number.
    pub global: u16,
    /// Field definitions, in wire order.
    pub fields: &'static [FieldDef],
}

/// A single field of a schema.
#[derive(Debug)]
pub struct FieldDef {
    /// Name values are keyed by.
    pub name: &'static str,
    /// Field definition number.
    pub id: u8,
    /// Field type.
    pub kind: FieldType,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Symbolic table values are resolved through, if any.
    pub table: Option<&'static ValueTable>,
}

const fn field(name: &'static str, id: u8, kind: FieldType) -> FieldDef {
    FieldDef {
        name,
        id,
        kind,
        required: false,
        table: None,
    }
}

impl FieldDef {
    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn symbolic(mut self, table: &'static ValueTable) -> Self {
        self.table = Some(table);
        self
    }
}

static FILE_ID: Schema = Schema {
    name: "file_id",
    global: 0,
    fields: &[
        field("serial_number", 3, FieldType::Uint32z).required(),
        field("time_created", 4, FieldType::Timestamp).required(),
        field("manufacturer", 1, FieldType::Uint16),
        field("product", 2, FieldType::Uint16),
        field("type", 0, FieldType::Enum).required(),
    ],
};

static COURSE: Schema = Schema {
    name: "course",
    global: 31,
    fields: &[field("name", 5, FieldType::String(16)).required()],
};

static LAP: Schema = Schema {
    name: "lap",
    global: 19,
    fields: &[
        field("timestamp", 253, FieldType::Timestamp).required(),
        field("start_time", 2, FieldType::Timestamp).required(),
        field("start_y", 3, FieldType::Semicircles),
        field("start_x", 4, FieldType::Semicircles),
        field("end_y", 5, FieldType::Semicircles),
        field("end_x", 6, FieldType::Semicircles),
        field("total_distance", 9, FieldType::Centimeters),
    ],
};

static COURSE_POINT: Schema = Schema {
    name: "course_point",
    global: 32,
    fields: &[
        field("timestamp", 1, FieldType::Timestamp).required(),
        field("y", 2, FieldType::Semicircles).required(),
        field("x", 3, FieldType::Semicircles).required(),
        field("distance", 4, FieldType::Centimeters),
        field("name", 6, FieldType::String(16)),
        field("message_index", 254, FieldType::Uint16),
        field("type", 5, FieldType::Enum).symbolic(profile::COURSE_POINT_TYPE).required(),
    ],
};

static RECORD: Schema = Schema {
    name: "record",
    global: 20,
    fields: &[
        field("timestamp", 253, FieldType::Timestamp).required(),
        field("y", 0, FieldType::Semicircles),
        field("x", 1, FieldType::Semicircles),
        field("distance", 5, FieldType::Centimeters),
        field("elevation", 2, FieldType::Altitude),
        field("heart_rate", 3, FieldType::Uint8),
        field("cadence", 4, FieldType::Uint8),
        field("power", 7, FieldType::Uint16),
    ],
};

static EVENT: Schema = Schema {
    name: "event",
    global: 21,
    fields: &[
        field("timestamp", 253, FieldType::Timestamp).required(),
        field("event", 0, FieldType::Enum).symbolic(profile::EVENT).required(),
        field("event_type", 1, FieldType::Enum).symbolic(profile::EVENT_TYPE).required(),
        field("event_group", 4, FieldType::Uint8),
    ],
};

static SESSION: Schema = Schema {
    name: "session",
    global: 18,
    fields: &[
        field("timestamp", 253, FieldType::Timestamp).required(),
        field("start_time", 2, FieldType::Timestamp).required(),
        field("start_position_lat", 3, FieldType::Semicircles),
        field("start_position_long", 4, FieldType::Semicircles),
        field("total_elapsed_time", 7, FieldType::Duration).required(),
        field("total_timer_time", 8, FieldType::Duration),
        field("total_distance", 9, FieldType::Centimeters).required(),
        field("total_cycles", 10, FieldType::Uint32),
        field("nec_lat", 29, FieldType::Semicircles),
        field("nec_long", 30, FieldType::Semicircles),
        field("swc_lat", 31, FieldType::Semicircles),
        field("swc_long", 32, FieldType::Semicircles),
        field("end_position_lat", 38, FieldType::Semicircles),
        field("end_position_long", 39, FieldType::Semicircles),
        field("avg_stroke_count", 41, FieldType::Uint32),
        field("total_work", 48, FieldType::Uint32),
        field("total_moving_time", 59, FieldType::Duration),
        field("sport_profile_name", 110, FieldType::String(16)),
        field("avg_lap_time", 69, FieldType::Duration),
        field("enhanced_avg_speed", 124, FieldType::Uint32),
        field("enhanced_max_speed", 125, FieldType::Uint32),
        field("enhanced_avg_altitude", 126, FieldType::Altitude32),
        field("enhanced_min_altitude", 127, FieldType::Altitude32),
        field("enhanced_max_altitude", 128, FieldType::Altitude32),
        field("message_index", 254, FieldType::Uint16),
        field("total_calories", 11, FieldType::Uint16),
        field("total_fat_calories", 13, FieldType::Uint16),
        field("avg_speed", 14, FieldType::Uint16),
        field("max_speed", 15, FieldType::Uint16),
        field("avg_power", 20, FieldType::Uint16),
        field("max_power", 21, FieldType::Uint16),
        field("total_ascent", 22, FieldType::Uint16),
        field("total_descent", 23, FieldType::Uint16),
        field("first_lap_index", 25, FieldType::Uint16),
        field("num_laps", 26, FieldType::Uint16),
        field("num_lengths", 33, FieldType::Uint16),
        field("normalized_power", 34, FieldType::Uint16),
        field("training_stress_score", 35, FieldType::Uint16),
        field("intensity_factor", 36, FieldType::Uint16),
        field("left_right_balance", 37, FieldType::Uint16),
        field("avg_stroke_distance", 42, FieldType::Uint16),
        field("pool_length", 44, FieldType::Uint16),
        field("threshold_power", 45, FieldType::Uint16),
        field("num_active_lengths", 47, FieldType::Uint16),
        field("avg_altitude", 49, FieldType::Altitude),
        field("max_altitude", 50, FieldType::Altitude),
        field("avg_grade", 52, FieldType::Sint16),
        field("avg_pos_grade", 53, FieldType::Sint16),
        field("avg_neg_grade", 54, FieldType::Sint16),
        field("max_pos_grade", 55, FieldType::Sint16),
        field("max_neg_grade", 56, FieldType::Sint16),
        field("avg_pos_vertical_speed", 60, FieldType::Sint16),
        field("avg_neg_vertical_speed", 61, FieldType::Sint16),
        field("max_pos_vertical_speed", 62, FieldType::Sint16),
        field("max_neg_vertical_speed", 63, FieldType::Sint16),
        field("best_lap_index", 70, FieldType::Uint16),
        field("min_altitude", 71, FieldType::Altitude),
        field("player_score", 82, FieldType::Uint16),
        field("opponent_score", 83, FieldType::Uint16),
        field("max_ball_speed", 87, FieldType::Uint16),
        field("avg_ball_speed", 88, FieldType::Uint16),
        field("avg_vertical_oscillation", 89, FieldType::Uint16),
        field("avg_stance_time_percent", 90, FieldType::Uint16),
        field("avg_stance_time", 91, FieldType::Uint16),
        field("avg_vam", 139, FieldType::Uint16),
        field("event", 0, FieldType::Enum).symbolic(profile::EVENT).required(),
        field("event_type", 1, FieldType::Enum).symbolic(profile::EVENT_TYPE).required(),
        field("sport", 5, FieldType::Enum).symbolic(profile::SPORT).required(),
        field("sub_sport", 6, FieldType::Enum).symbolic(profile::SUB_SPORT).required(),
        field("avg_heart_rate", 16, FieldType::Uint8),
        field("max_heart_rate", 17, FieldType::Uint8),
        field("avg_cadence", 18, FieldType::Uint8),
        field("max_cadence", 19, FieldType::Uint8),
        field("total_training_effect", 24, FieldType::Uint8),
        field("event_group", 27, FieldType::Uint8),
        field("trigger", 28, FieldType::Enum).symbolic(profile::SESSION_TRIGGER),
        field("gps_accuracy", 51, FieldType::Uint8),
        field("avg_temperature", 57, FieldType::Sint8),
        field("max_temperature", 58, FieldType::Sint8),
        field("min_heart_rate", 64, FieldType::Uint8),
        field("opponent_name", 84, FieldType::String(1)),
        field("avg_fractional_cadence", 92, FieldType::Uint8),
        field("max_fractional_cadence", 93, FieldType::Uint8),
        field("total_fractional_cycles", 94, FieldType::Uint8),
        field("sport_index", 111, FieldType::Uint8),
        field("total_anaerobic_training_effect", 137, FieldType::Uint8),
        field("min_temperature", 150, FieldType::Sint8),
    ],
};

static ACTIVITY: Schema = Schema {
    name: "activity",
    global: 34,
    fields: &[
        field("timestamp", 253, FieldType::Timestamp).required(),
        field("total_timer_time", 0, FieldType::Duration).required(),
        field("num_sessions", 1, FieldType::Uint16).required(),
        field("type", 2, FieldType::Enum).symbolic(profile::ACTIVITY_TYPE).required(),
        field("event", 3, FieldType::Enum).symbolic(profile::EVENT).required(),
        field("event_type", 4, FieldType::Enum).symbolic(profile::EVENT_TYPE).required(),
        field("event_group", 6, FieldType::Uint8),
    ],
};
