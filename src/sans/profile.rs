//! Closed name-to-number tables for symbolic fields.
//!
//! Fields like event kinds and sports take a name from one of these tables
//! and store its number on the wire. The tables are fixed configuration
//! data; a name outside a field's table is rejected during encoding.

/// A closed table mapping symbolic names to their wire values.
pub type ValueTable = [(&'static str, u8)];

/// Look up a symbolic name in a table.
pub fn lookup(table: &ValueTable, name: &str) -> Option<u8> {
    table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Course point markers.
pub const COURSE_POINT_TYPE: &ValueTable = &[
    ("generic", 0),
    ("summit", 1),
    ("valley", 2),
    ("water", 3),
    ("food", 4),
    ("danger", 5),
    ("left", 6),
    ("right", 7),
    ("straight", 8),
    ("first_aid", 9),
    ("fourth_category", 10),
    ("third_category", 11),
    ("second_category", 12),
    ("first_category", 13),
    ("hors_category", 14),
    ("sprint", 15),
    ("left_fork", 16),
    ("right_fork", 17),
    ("middle_fork", 18),
    ("slight_left", 19),
    ("sharp_left", 20),
    ("slight_right", 21),
    ("sharp_right", 22),
    ("u_turn", 23),
    ("segment_start", 24),
    ("segment_end", 25),
    ("invalid", 255),
];

/// Event sources.
pub const EVENT: &ValueTable = &[
    ("timer", 0),
    ("workout", 3),
    ("workout_step", 4),
    ("power_down", 5),
    ("power_up", 6),
    ("off_course", 7),
    ("session", 8),
    ("lap", 9),
    ("course_point", 10),
    ("battery", 11),
    ("virtual_partner_pace", 12),
    ("hr_high_alert", 13),
    ("hr_low_alert", 14),
    ("speed_high_alert", 15),
    ("speed_low_alert", 16),
    ("cad_high_alert", 17),
    ("cad_low_alert", 18),
    ("power_high_alert", 19),
    ("power_low_alert", 20),
    ("recovery_hr", 21),
    ("battery_low", 22),
    ("time_duration_alert", 23),
    ("distance_duration_alert", 24),
    ("calorie_duration_alert", 25),
    ("activity", 26),
    ("fitness_equipment", 27),
    ("length", 28),
    ("user_marker", 32),
    ("sport_point", 33),
    ("calibration", 36),
    ("front_gear_change", 42),
    ("rear_gear_change", 43),
    ("rider_position_change", 44),
    ("elev_high_alert", 45),
    ("elev_low_alert", 46),
    ("comm_timeout", 47),
];

/// Event phases.
pub const EVENT_TYPE: &ValueTable = &[
    ("start", 0),
    ("stop", 1),
    ("consecutive_depreciated", 2),
    ("marker", 3),
    ("stop_all", 4),
    ("begin_depreciated", 5),
    ("end_depreciated", 6),
    ("end_all_depreciated", 7),
    ("stop_disable", 8),
    ("stop_disable_all", 9),
];

/// Sports.
pub const SPORT: &ValueTable = &[
    ("generic", 0),
    ("running", 1),
    ("cycling", 2),
    ("transition", 3),
    ("fitness_equipment", 4),
    ("swimming", 5),
    ("basketball", 6),
    ("soccer", 7),
    ("tennis", 8),
    ("american_football", 9),
    ("training", 10),
    ("walking", 11),
    ("cross_country_skiing", 12),
    ("alpine_skiing", 13),
    ("snowboarding", 14),
    ("rowing", 15),
    ("mountaineering", 16),
    ("hiking", 17),
    ("multisport", 18),
    ("paddling", 19),
    ("flying", 20),
    ("e_biking", 21),
    ("motorcycling", 22),
    ("boating", 23),
    ("driving", 24),
    ("golf", 25),
    ("hang_gliding", 26),
    ("horseback_riding", 27),
    ("hunting", 28),
    ("fishing", 29),
    ("inline_skating", 30),
    ("rock_climbing", 31),
    ("sailing", 32),
    ("ice_skating", 33),
    ("sky_diving", 34),
    ("snowshoeing", 35),
    ("snowmobiling", 36),
    ("stand_up_paddleboarding", 37),
    ("surfing", 38),
    ("wakeboarding", 39),
    ("water_skiing", 40),
    ("kayaking", 41),
    ("rafting", 42),
    ("windsurfing", 43),
    ("kitesurfing", 44),
    ("tactical", 45),
    ("jumpmaster", 46),
    ("boxing", 47),
    ("floor_climbing", 48),
    ("all", 254),
];

/// Sub-sports.
pub const SUB_SPORT: &ValueTable = &[
    ("generic", 0),
    ("treadmill", 1),
    ("street", 2),
    ("trail", 3),
    ("track", 4),
    ("spin", 5),
    ("indoor_cycling", 6),
    ("road", 7),
    ("mountain", 8),
    ("downhill", 9),
    ("recumbent", 10),
    ("cyclocross", 11),
    ("hand_cycling", 12),
    ("track_cycling", 13),
    ("indoor_rowing", 14),
    ("elliptical", 15),
    ("stair_climbing", 16),
    ("lap_swimming", 17),
    ("open_water", 18),
    ("flexibility_training", 19),
    ("strength_training", 20),
    ("warm_up", 21),
    ("match", 22),
    ("exercise", 23),
    ("challenge", 24),
    ("indoor_skiing", 25),
    ("cardio_training", 26),
    ("indoor_walking", 27),
    ("e_bike_fitness", 28),
    ("bmx", 29),
    ("casual_walking", 30),
    ("speed_walking", 31),
    ("bike_to_run_transition", 32),
    ("run_to_bike_transition", 33),
    ("swim_to_bike_transition", 34),
    ("atv", 35),
    ("motocross", 36),
    ("backcountry", 37),
    ("resort", 38),
    ("rc_drone", 39),
    ("wingsuit", 40),
    ("whitewater", 41),
    ("skate_skiing", 42),
    ("yoga", 43),
    ("pilates", 44),
    ("indoor_running", 45),
    ("gravel_cycling", 46),
    ("e_bike_mountain", 47),
    ("commuting", 48),
    ("mixed_surface", 49),
    ("navigate", 50),
    ("track_me", 51),
    ("map", 52),
    ("all", 254),
];

/// Activity classifications.
pub const ACTIVITY_TYPE: &ValueTable = &[
    ("generic", 0),
    ("running", 1),
    ("cycling", 2),
    ("transition", 3),
    ("fitness_equipment", 4),
    ("swimming", 5),
    ("walking", 6),
    ("sedentary", 8),
    ("all", 254),
];

/// Session end triggers.
pub const SESSION_TRIGGER: &ValueTable = &[
    ("activity_end", 0),
    ("manual", 1),
    ("auto_multi_sport", 2),
    ("fitness_equipment", 3),
];

/// Swim strokes.
pub const SWIM_STROKE: &ValueTable = &[
    ("freestyle", 0),
    ("backstroke", 1),
    ("breaststroke", 2),
    ("butterfly", 3),
    ("drills", 4),
    ("mixed", 5),
    ("im", 6),
];

/// Display units.
pub const DISPLAY_MEASURE: &ValueTable = &[
    ("metric", 0),
    ("statute", 1),
    ("nautical", 2),
];
