#![cfg(feature = "std")]

use rouleur::avec::writer::{Error, State, Writer};
use rouleur::avec::{ActivityOptions, CourseOptions};
use rouleur::sans::check::compute_crc;
use rouleur::sans::record::{Values, data_message_size, definition_message_size};
use rouleur::sans::schema::MessageKind;
use rouleur::sans::types::{EPOCH_OFFSET, SEMICIRCLES_PER_DEGREE};

const TRACK_POINTS: [(f64, f64, f64); 5] = [
    (-122.64424, 45.5279, 0.0),
    (-122.64355, 45.5279, 53.81),
    (-122.64343, 45.52791, 63.234),
    (-122.64342, 45.52858, 137.822),
    (-122.64251, 45.52858, 208.788),
];

const COURSE_POINTS: [(f64, f64, &str, &str, f64); 2] = [
    (-122.64343, 45.52791, "left", "NE 22nd Ave", 63.234),
    (-122.64342, 45.52858, "right", "NE Oregon St", 137.822),
];

fn timestamp_bytes(unix: u64) -> [u8; 4] {
    ((unix - EPOCH_OFFSET) as u32).to_be_bytes()
}

fn position_bytes(degrees: f64) -> [u8; 4] {
    ((degrees * SEMICIRCLES_PER_DEGREE) as i32).to_be_bytes()
}

fn distance_bytes(meters: f64) -> [u8; 4] {
    ((meters * 100.0) as u32).to_be_bytes()
}

fn text_bytes(text: &str, width: usize) -> Vec<u8> {
    let mut r = vec![0x00; width];
    for (slot, b) in r.iter_mut().zip(text.bytes().take(width - 1)) {
        *slot = b;
    }
    r
}

fn course_options() -> CourseOptions {
    let end_time = 1514808000; // 2018-01-01T12:00:00Z

    CourseOptions {
        name: "test course".into(),
        start_time: end_time - 3600,
        duration: 3600,
        course_point_count: COURSE_POINTS.len() as u32,
        track_point_count: TRACK_POINTS.len() as u32,
        time_created: end_time,
        total_distance: TRACK_POINTS[4].2,
        start_x: TRACK_POINTS[0].0,
        start_y: TRACK_POINTS[0].1,
        end_x: TRACK_POINTS[4].0,
        end_y: TRACK_POINTS[4].1,
    }
}

fn activity_options() -> ActivityOptions {
    ActivityOptions {
        start_time: 1514804400,
        duration: 3600,
        track_point_count: 2,
        time_created: 1514808000,
        total_distance: 208.788,
        sport: "cycling".into(),
        sub_sport: "road".into(),
        start_x: Some(TRACK_POINTS[0].0),
        start_y: Some(TRACK_POINTS[0].1),
        end_x: Some(TRACK_POINTS[4].0),
        end_y: Some(TRACK_POINTS[4].1),
        total_ascent: Some(12),
        total_descent: Some(12),
        avg_speed: Some(5800),
        max_speed: Some(9100),
        total_calories: Some(450),
        ..Default::default()
    }
}

#[test]
fn writes_a_complete_course_document() {
    let options = course_options();
    let start_time = options.start_time;
    let total_distance = options.total_distance;
    let at = |distance: f64| (start_time as f64 + 3600.0 * (distance / total_distance)) as u64;

    let mut writer = Writer::new(Vec::new());
    writer
        .course(&options, |w| {
            w.course_points(|w| {
                for (x, y, kind, name, distance) in COURSE_POINTS {
                    let values = Values::new()
                        .with("timestamp", at(distance))
                        .with("x", x)
                        .with("y", y)
                        .with("type", kind)
                        .with("name", name)
                        .with("distance", distance);
                    w.course_point(&values)?;
                }
                Ok(())
            })?;

            w.track_points(|w| {
                for (x, y, distance) in TRACK_POINTS {
                    let values = Values::new()
                        .with("timestamp", at(distance))
                        .with("x", x)
                        .with("y", y)
                        .with("distance", distance);
                    w.track_point(&values)?;
                }
                Ok(())
            })
        })
        .unwrap();

    let stream = writer.into_inner();

    let declared = u32::from_le_bytes(stream[4..8].try_into().unwrap());
    assert_eq!(declared as usize, stream.len() - 16);

    let mut expected: Vec<u8> = Vec::new();

    // Document header
    expected.extend([14, 0x10, 0x98, 0x00]);
    expected.extend(declared.to_le_bytes());
    expected.extend(b".FIT");
    expected.extend([0x00, 0x00]);

    // File identification, local number 0
    #[rustfmt::skip]
    expected.extend([
        0x40, 0, 1, 0, 0, 5,
        3, 4, 140, 4, 4, 134, 1, 2, 132, 2, 2, 132, 0, 1, 0,
    ]);
    expected.push(0x00);
    expected.extend([0, 0, 0, 0]); // Serial number
    expected.extend(timestamp_bytes(options.time_created));
    expected.extend([0, 1]); // Manufacturer (Garmin)
    expected.extend([0xFF, 0xFE]); // Product (Garmin Connect)
    expected.push(6); // Type (course file)

    // Course, local number 1
    expected.extend([0x41, 0, 1, 0, 31, 1, 5, 16, 7]);
    expected.push(0x01);
    expected.extend(text_bytes("test course", 16));

    // Lap, local number 2
    #[rustfmt::skip]
    expected.extend([
        0x42, 0, 1, 0, 19, 7,
        253, 4, 134, 2, 4, 134, 3, 4, 133, 4, 4, 133, 5, 4, 133, 6, 4, 133, 9, 4, 134,
    ]);
    expected.push(0x02);
    expected.extend(timestamp_bytes(start_time));
    expected.extend(timestamp_bytes(start_time));
    expected.extend(position_bytes(options.start_y));
    expected.extend(position_bytes(options.start_x));
    expected.extend(position_bytes(options.end_y));
    expected.extend(position_bytes(options.end_x));
    expected.extend(distance_bytes(total_distance));

    // Timer start event, local number 3
    #[rustfmt::skip]
    expected.extend([
        0x43, 0, 1, 0, 21, 4,
        253, 4, 134, 0, 1, 0, 1, 1, 0, 4, 1, 2,
    ]);
    expected.push(0x03);
    expected.extend(timestamp_bytes(start_time));
    expected.extend([0, 0, 0]); // Timer, start, group 0

    // Course points, local number 4
    #[rustfmt::skip]
    expected.extend([
        0x44, 0, 1, 0, 32, 7,
        1, 4, 134, 2, 4, 133, 3, 4, 133, 4, 4, 134, 6, 16, 7, 254, 2, 132, 5, 1, 0,
    ]);
    for (x, y, kind, name, distance) in COURSE_POINTS {
        expected.push(0x04);
        expected.extend(timestamp_bytes(at(distance)));
        expected.extend(position_bytes(y));
        expected.extend(position_bytes(x));
        expected.extend(distance_bytes(distance));
        expected.extend(text_bytes(name, 16));
        expected.extend([0xFF, 0xFF]); // Absent message index
        expected.push(if kind == "left" { 6 } else { 7 });
    }

    // Track points, local number 5
    #[rustfmt::skip]
    expected.extend([
        0x45, 0, 1, 0, 20, 8,
        253, 4, 134, 0, 4, 133, 1, 4, 133, 5, 4, 134, 2, 2, 132, 3, 1, 2, 4, 1, 2, 7, 2, 132,
    ]);
    for (x, y, distance) in TRACK_POINTS {
        expected.push(0x05);
        expected.extend(timestamp_bytes(at(distance)));
        expected.extend(position_bytes(y));
        expected.extend(position_bytes(x));
        expected.extend(distance_bytes(distance));
        expected.extend([0xFF, 0xFF]); // Absent elevation
        expected.extend([0xFF, 0xFF]); // Absent heart rate and cadence
        expected.extend([0xFF, 0xFF]); // Absent power
    }

    // Timer stop event reuses local number 3
    expected.push(0x03);
    expected.extend(timestamp_bytes(start_time + options.duration));
    expected.extend([0, 9, 0]); // Timer, stop all and disable, group 0

    let crc = compute_crc(0, &expected[14..]);
    expected.extend(crc.to_le_bytes());

    assert_eq!(stream, expected);
}

#[test]
fn writes_an_empty_course_document() {
    let mut options = course_options();
    options.course_point_count = 0;
    options.track_point_count = 0;

    let mut writer = Writer::new(Vec::new());
    writer.course(&options, |_| Ok(())).unwrap();
    let stream = writer.into_inner();

    // File identification, course, lap, and two events, one definition each.
    let expected_len = 14 + (21 + 14) + (9 + 17) + (27 + 29) + (18 + 8 + 8) + 2;
    assert_eq!(stream.len(), expected_len);

    let declared = u32::from_le_bytes(stream[4..8].try_into().unwrap());
    assert_eq!(declared as usize, stream.len() - 16);

    let crc = compute_crc(0, &stream[14..stream.len() - 2]);
    assert_eq!(stream[stream.len() - 2..], crc.to_le_bytes()[..]);
}

#[test]
fn writes_a_complete_activity_document() {
    let options = activity_options();
    let start_time = options.start_time;

    let mut writer = Writer::new(Vec::new());
    writer
        .activity(&options, |w| {
            w.track_points(|w| {
                for (x, y, distance) in [TRACK_POINTS[0], TRACK_POINTS[4]] {
                    let values = Values::new()
                        .with("timestamp", start_time)
                        .with("x", x)
                        .with("y", y)
                        .with("distance", distance)
                        .with("heart_rate", 128u8);
                    w.track_point(&values)?;
                }
                Ok(())
            })
        })
        .unwrap();

    let stream = writer.into_inner();

    let declared = u32::from_le_bytes(stream[4..8].try_into().unwrap());
    assert_eq!(declared as usize, stream.len() - 16);

    let session_definition = definition_message_size(MessageKind::Session);
    let session_data = data_message_size(MessageKind::Session);
    let activity_definition = definition_message_size(MessageKind::Activity);
    let activity_data = data_message_size(MessageKind::Activity);

    let expected_len = 14
        + (21 + 14) // File identification
        + (18 + 8 + 8) // Events
        + (30 + 23 * 2) // Track points
        + (27 + 29) // Lap
        + (session_definition + session_data)
        + (activity_definition + activity_data)
        + 2;
    assert_eq!(stream.len(), expected_len);

    // The file type marker says activity.
    assert_eq!(stream[14 + 21 + 14 - 1], 4);

    // The first track point carries the supplied heart rate, 19 bytes in:
    // header, timestamp, position, distance, and elevation come first.
    let first_record = 14 + (21 + 14) + (18 + 8) + 30;
    assert_eq!(stream[first_record + 19], 128);

    // The session names the sport and sub-sport.
    let session_fields = MessageKind::Session.schema().fields;
    let sport_offset: usize = 1 + session_fields
        .iter()
        .take_while(|f| f.name != "sport")
        .map(|f| f.kind.byte_count() as usize)
        .sum::<usize>();
    let session_data_start =
        14 + (21 + 14) + (18 + 8) + (30 + 23 * 2) + 8 + (27 + 29) + session_definition;
    assert_eq!(stream[session_data_start + sport_offset], 2); // Cycling
    assert_eq!(stream[session_data_start + sport_offset + 1], 7); // Road

    let crc = compute_crc(0, &stream[14..stream.len() - 2]);
    assert_eq!(stream[stream.len() - 2..], crc.to_le_bytes()[..]);
}

#[test]
fn rejects_points_outside_their_scope() {
    let values = Values::new();

    let mut writer = Writer::new(Vec::new());
    assert!(matches!(writer.course_point(&values), Err(Error::State { .. })));
    assert!(matches!(writer.track_point(&values), Err(Error::State { .. })));

    let mut options = course_options();
    options.course_point_count = 0;
    options.track_point_count = 0;

    writer
        .course(&options, |w| {
            assert!(matches!(w.course_point(&values), Err(Error::State { .. })));
            assert!(matches!(w.track_point(&values), Err(Error::State { .. })));

            w.course_points(|w| {
                assert!(matches!(w.track_point(&values), Err(Error::State { .. })));
                assert!(matches!(w.track_points(|_| Ok(())), Err(Error::State { .. })));
                assert!(matches!(w.course_points(|_| Ok(())), Err(Error::State { .. })));
                Ok(())
            })
        })
        .unwrap();
}

#[test]
fn rejects_a_nested_document() {
    let mut options = course_options();
    options.course_point_count = 0;
    options.track_point_count = 0;

    let mut writer = Writer::new(Vec::new());
    writer
        .course(&options.clone(), |w| {
            assert!(matches!(
                w.course(&options, |_| Ok(())),
                Err(Error::State { .. })
            ));
            assert!(matches!(
                w.activity(&activity_options(), |_| Ok(())),
                Err(Error::State { .. })
            ));
            Ok(())
        })
        .unwrap();
}

#[test]
fn rejects_non_finite_options_before_writing() {
    let mut options = course_options();
    options.start_x = f64::NAN;

    let mut writer = Writer::new(Vec::new());
    assert!(matches!(
        writer.course(&options, |_| Ok(())),
        Err(Error::Options(_))
    ));
    assert_eq!(writer.state(), State::Idle);
    assert!(writer.into_inner().is_empty());
}

#[test]
fn rejects_unknown_sport_names_before_writing() {
    let mut options = activity_options();
    options.sport = "crocheting".into();

    let mut writer = Writer::new(Vec::new());
    assert!(matches!(
        writer.activity(&options, |_| Ok(())),
        Err(Error::Options(_))
    ));
    assert!(writer.into_inner().is_empty());
}

#[test]
fn closes_the_document_when_the_producer_fails() {
    let mut options = course_options();
    options.course_point_count = 0;
    options.track_point_count = 0;

    let mut writer = Writer::new(Vec::new());
    let result = writer.course(&options, |_| {
        Err(std::io::Error::other("producer failed").into())
    });

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(writer.state(), State::Idle);

    // The stop event and trailer were still written, and the trailer checks
    // the record section.
    let stream = writer.into_inner();
    let expected_len = 14 + (21 + 14) + (9 + 17) + (27 + 29) + (18 + 8 + 8) + 2;
    assert_eq!(stream.len(), expected_len);

    let crc = compute_crc(0, &stream[14..stream.len() - 2]);
    assert_eq!(stream[stream.len() - 2..], crc.to_le_bytes()[..]);
}

#[test]
fn recovers_for_a_fresh_document_after_a_failure() {
    let mut options = course_options();
    options.course_point_count = 0;
    options.track_point_count = 0;

    let mut writer = Writer::new(Vec::new());
    let result = writer.course(&options, |_| {
        Err(std::io::Error::other("producer failed").into())
    });
    assert!(result.is_err());

    writer.course(&options, |_| Ok(())).unwrap();
    assert_eq!(writer.state(), State::Idle);
}
