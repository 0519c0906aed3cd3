//! Tests for record normalization

use super::*;
use crate::decode::TableDecoder;
use crate::feed::load_feed;
use crate::types::FieldValue;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

fn pressure_batch(body: &str) -> RawRecordBatch {
    TableDecoder::default().decode(body).unwrap()
}

fn meta(offset: i8) -> SensorMetadata {
    SensorMetadata {
        position: "StationA".to_string(),
        model: "SensorX".to_string(),
        utc_offset_hours: offset,
    }
}

#[test]
fn test_normalize_reconstructs_utc_timestamp() {
    // Worked example: 2024-08-01 14:30:00.5 local at UTC+2 lands at
    // 2024-08-01 12:30:00.500000 UTC.
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722515400,2024-08-01 14:30:00,5,1013,21.5\n",
    );

    let records = Normalizer::new(&feed).normalize(&batch, &meta(2)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].timestamp,
        Utc.with_ymd_and_hms(2024, 8, 1, 12, 30, 0).unwrap() + chrono::Duration::milliseconds(500)
    );
}

#[test]
fn test_normalize_negative_offset_adds_hours() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1722515400,2024-08-01 14:30:00,0,1013,21.5\n",
    );

    let records = Normalizer::new(&feed).normalize(&batch, &meta(-3)).unwrap();
    assert_eq!(
        records[0].timestamp,
        Utc.with_ymd_and_hms(2024, 8, 1, 17, 30, 0).unwrap()
    );
}

#[test]
fn test_normalize_broadcasts_tags_and_types_fields() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1,2024-08-01 14:30:00,0,1013,21.5\n\
         2,2024-08-01 14:30:01,0,1014,21.6\n",
    );

    let records = Normalizer::new(&feed).normalize(&batch, &meta(2)).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.tags.get("sensor_position").unwrap(), "StationA");
        assert_eq!(record.tags.get("sensor_model").unwrap(), "SensorX");
        assert_eq!(
            record.fields.get("utc_offset"),
            Some(&FieldValue::Integer(2))
        );
    }
    assert_eq!(
        records[0].fields.get("pressure_mbar"),
        Some(&FieldValue::Integer(1013))
    );
    assert_eq!(
        records[1].fields.get("temp_c"),
        Some(&FieldValue::Float(21.6))
    );
}

#[test]
fn test_normalize_unmapped_column_is_schema_mismatch() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC,Mystery\n\
         1,2024-08-01 14:30:00,0,1013,21.5,42\n",
    );

    let err = Normalizer::new(&feed)
        .normalize(&batch, &meta(0))
        .unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { .. }));
    assert!(err.to_string().contains("Mystery"));
}

#[test]
fn test_normalize_missing_timestamp_column_is_schema_mismatch() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch("POSIXt,Pressure.mbar,TempC\n1,1013,21.5\n");

    let err = Normalizer::new(&feed)
        .normalize(&batch, &meta(0))
        .unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { .. }));
}

#[test]
fn test_normalize_empty_batch_is_noop() {
    let feed = load_feed("pressure").unwrap();
    let records = Normalizer::new(&feed)
        .normalize(&RawRecordBatch::default(), &meta(0))
        .unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_normalize_header_only_batch_is_noop() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch("POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n");
    let records = Normalizer::new(&feed).normalize(&batch, &meta(0)).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_normalize_drops_rows_with_only_empty_cells() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1,2024-08-01 14:30:00,0,,\n\
         2,2024-08-01 14:30:01,0,1014,21.6\n",
    );

    let records = Normalizer::new(&feed).normalize(&batch, &meta(0)).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].fields.get("pressure_mbar"),
        Some(&FieldValue::Integer(1014))
    );
}

#[test]
fn test_normalize_bad_timestamp_is_parse_error() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1,yesterday,0,1013,21.5\n",
    );

    let err = Normalizer::new(&feed)
        .normalize(&batch, &meta(0))
        .unwrap_err();
    assert!(matches!(err, Error::TimestampParse { .. }));
    assert!(err.is_file_skip());
}

#[test]
fn test_normalize_bad_numeric_is_field_parse_error() {
    let feed = load_feed("pressure").unwrap();
    let batch = pressure_batch(
        "POSIXt,DateTime,frac.seconds,Pressure.mbar,TempC\n\
         1,2024-08-01 14:30:00,0,high,21.5\n",
    );

    let err = Normalizer::new(&feed)
        .normalize(&batch, &meta(0))
        .unwrap_err();
    assert!(matches!(err, Error::FieldParse { .. }));
}

#[test]
fn test_normalize_drops_rows_missing_required_field() {
    // The weather feed requires the barometric pressure field; a row with
    // that cell empty is dropped even though other fields parsed.
    let feed = load_feed("weather-station").unwrap();
    let body = "Date (Europe/Oslo)\tTemperature (°C)\tWind chill (°C)\tDew point (°C)\t\
                Humidity (%)\tAverage wind speed (m/s)\tBarometric pressure (hPa)\t\
                UV index\tAltitude (m)\tLatitude\tLongitude\n\
                2025-08-01 12:00\t18.2\t18.0\t12.1\t67\t3.4\t\t4\t28\t59.91\t10.73\n\
                2025-08-01 12:05\t18.3\t18.1\t12.2\t66\t3.5\t1009.4\t4\t28\t59.91\t10.73\n";
    let batch = feed.decoder().decode(body).unwrap();
    let meta = feed.resolve_static_metadata().unwrap().unwrap();

    let records = Normalizer::new(&feed).normalize(&batch, &meta).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].timestamp,
        Utc.with_ymd_and_hms(2025, 8, 1, 11, 5, 0).unwrap()
    );
}

#[test]
fn test_normalize_single_column_timestamp_feed() {
    let feed = load_feed("weather-station").unwrap();
    let body = "Date (Europe/Oslo)\tTemperature (°C)\tWind chill (°C)\tDew point (°C)\t\
                Humidity (%)\tAverage wind speed (m/s)\tBarometric pressure (hPa)\t\
                UV index\tAltitude (m)\tLatitude\tLongitude\n\
                2025-08-01 12:00\t18.2\t18.0\t12.1\t67\t3.4\t1009.2\t4\t28\t59.91\t10.73\n";
    let batch = feed.decoder().decode(body).unwrap();
    let meta = feed.resolve_static_metadata().unwrap().unwrap();

    let records = Normalizer::new(&feed).normalize(&batch, &meta).unwrap();
    assert_eq!(records.len(), 1);
    // UTC+1 local noon is 11:00 UTC.
    assert_eq!(
        records[0].timestamp,
        Utc.with_ymd_and_hms(2025, 8, 1, 11, 0, 0).unwrap()
    );
    assert_eq!(
        records[0].fields.get("atm_pressure_hpa"),
        Some(&FieldValue::Float(1009.2))
    );
}
