//! Raw stop batches and their typed field mapping
//!
//! A batch is a column-declared table: `fields` names the columns and every
//! entry in `records` is a positional row aligned to those declarations. The
//! column layout is resolved once per batch into a [`FieldMapping`], which then
//! turns rows into [`Stop`]s one at a time so a bad row never sinks the batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Stop;
use crate::errors::RecordError;
use crate::value_objects::GeoPoint;

/// Column identifiers used by the stop datasets
pub mod columns {
    /// Stop identifier
    pub const CODE: &str = "id_amat";
    /// Preferred description column
    pub const NAME: &str = "nome";
    /// Description column used when `nome` is not declared
    pub const LOCATION: &str = "ubicazione";
    /// Comma-separated serving lines
    pub const LINES: &str = "linee";
    /// WGS84 longitude
    pub const LONGITUDE: &str = "LONG_X_4326";
    /// WGS84 latitude
    pub const LATITUDE: &str = "LAT_Y_4326";
}

/// Description used when a batch declares neither description column
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// A single column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    /// Column identifier
    pub id: String,
    /// Declared value type, informational only
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl FieldDeclaration {
    /// Declare a column without a type
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }
}

/// A raw batch of stop records as published
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StopBatch {
    /// Column declarations, in positional order
    pub fields: Vec<FieldDeclaration>,
    /// Rows aligned to `fields`
    #[serde(default)]
    pub records: Vec<Vec<Value>>,
}

/// Result of mapping a whole batch
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Stops built from valid records, in record order
    pub stops: Vec<Stop>,
    /// One entry per skipped record
    pub rejected: Vec<RecordError>,
    /// False when descriptions fell back to [`UNKNOWN_DESCRIPTION`]
    pub has_description_field: bool,
}

impl StopBatch {
    /// Resolve the column layout and map every record
    #[must_use]
    pub fn into_outcome(self) -> BatchOutcome {
        let mapping = FieldMapping::resolve(&self.fields);
        let mut outcome = BatchOutcome {
            has_description_field: mapping.has_description_field(),
            ..BatchOutcome::default()
        };

        for (index, record) in self.records.iter().enumerate() {
            match mapping.map_record(index, record) {
                Ok(stop) => outcome.stops.push(stop),
                Err(err) => outcome.rejected.push(err),
            }
        }

        outcome
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DescriptionSource {
    Column(usize, &'static str),
    Fallback,
}

/// Column positions resolved from a batch's field declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    code: Option<usize>,
    description: DescriptionSource,
    lines: Option<usize>,
    longitude: Option<usize>,
    latitude: Option<usize>,
}

impl FieldMapping {
    /// Build the mapping from declarations; undeclared columns stay unresolved
    #[must_use]
    pub fn resolve(fields: &[FieldDeclaration]) -> Self {
        let position = |name: &str| fields.iter().position(|field| field.id == name);

        let description = position(columns::NAME)
            .map(|idx| DescriptionSource::Column(idx, columns::NAME))
            .or_else(|| {
                position(columns::LOCATION)
                    .map(|idx| DescriptionSource::Column(idx, columns::LOCATION))
            })
            .unwrap_or(DescriptionSource::Fallback);

        Self {
            code: position(columns::CODE),
            description,
            lines: position(columns::LINES),
            longitude: position(columns::LONGITUDE),
            latitude: position(columns::LATITUDE),
        }
    }

    /// Whether descriptions come from a real column
    #[must_use]
    pub const fn has_description_field(&self) -> bool {
        matches!(self.description, DescriptionSource::Column(..))
    }

    /// Map one positional record into a stop
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] when a required column is not
    /// declared or the record holds no value for it, and
    /// [`RecordError::InvalidField`] when a value has the wrong shape or the
    /// coordinates are out of range.
    pub fn map_record(&self, index: usize, record: &[Value]) -> Result<Stop, RecordError> {
        let code = text(value(record, index, self.code, columns::CODE)?, index, columns::CODE)?;

        let description = match self.description {
            DescriptionSource::Column(col, name) => {
                text(value(record, index, Some(col), name)?, index, name)?
            },
            DescriptionSource::Fallback => UNKNOWN_DESCRIPTION.to_string(),
        };

        let lines = text(value(record, index, self.lines, columns::LINES)?, index, columns::LINES)?;

        let longitude = coordinate(
            value(record, index, self.longitude, columns::LONGITUDE)?,
            index,
            columns::LONGITUDE,
        )?;
        let latitude = coordinate(
            value(record, index, self.latitude, columns::LATITUDE)?,
            index,
            columns::LATITUDE,
        )?;

        let position = GeoPoint::new(latitude, longitude).map_err(|err| {
            let field = if (-90.0..=90.0).contains(&latitude) {
                columns::LONGITUDE
            } else {
                columns::LATITUDE
            };
            RecordError::InvalidField {
                record: index,
                field,
                reason: err.to_string(),
            }
        })?;

        Ok(Stop::new(code, description, Stop::split_lines(&lines), position))
    }
}

fn value<'a>(
    record: &'a [Value],
    index: usize,
    column: Option<usize>,
    field: &'static str,
) -> Result<&'a Value, RecordError> {
    column
        .and_then(|col| record.get(col))
        .filter(|value| !value.is_null())
        .ok_or(RecordError::MissingField {
            record: index,
            field,
        })
}

fn text(value: &Value, index: usize, field: &'static str) -> Result<String, RecordError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(RecordError::InvalidField {
            record: index,
            field,
            reason: format!("expected text, got {other}"),
        }),
    }
}

fn coordinate(value: &Value, index: usize, field: &'static str) -> Result<f64, RecordError> {
    let invalid = |reason: String| RecordError::InvalidField {
        record: index,
        field,
        reason,
    };

    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| invalid(format!("{n} is not representable as f64"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|err| invalid(format!("'{s}': {err}"))),
        other => Err(invalid(format!("expected a number, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn surface_fields() -> Vec<FieldDeclaration> {
        ["id_amat", "ubicazione", "linee", "LONG_X_4326", "LAT_Y_4326"]
            .into_iter()
            .map(FieldDeclaration::new)
            .collect()
    }

    #[test]
    fn batch_deserializes_from_dataset_shape() {
        let batch: StopBatch = serde_json::from_value(json!({
            "fields": [
                {"id": "id_amat", "type": "int"},
                {"id": "nome", "type": "text"},
                {"id": "linee"},
                {"id": "LONG_X_4326", "type": "numeric"},
                {"id": "LAT_Y_4326", "type": "numeric"}
            ],
            "records": [[1, "DUOMO", "M1,M3", 9.1900, 45.4642]]
        }))
        .unwrap();

        assert_eq!(batch.fields[0].kind.as_deref(), Some("int"));
        assert_eq!(batch.fields[2].kind, None);

        let outcome = batch.into_outcome();
        assert!(outcome.rejected.is_empty());
        assert!(outcome.has_description_field);
        let stop = &outcome.stops[0];
        assert_eq!(stop.code.as_str(), "1");
        assert_eq!(stop.description, "DUOMO");
        assert_eq!(stop.available_lines, vec!["M1", "M3"]);
        assert!((stop.position.latitude() - 45.4642).abs() < 1e-9);
        assert!((stop.position.longitude() - 9.19).abs() < 1e-9);
    }

    #[test]
    fn nome_preferred_over_ubicazione() {
        let fields = vec![
            FieldDeclaration::new("id_amat"),
            FieldDeclaration::new("ubicazione"),
            FieldDeclaration::new("nome"),
            FieldDeclaration::new("linee"),
            FieldDeclaration::new("LONG_X_4326"),
            FieldDeclaration::new("LAT_Y_4326"),
        ];
        let mapping = FieldMapping::resolve(&fields);
        let stop = mapping
            .map_record(
                0,
                &[json!("A"), json!("Via Roma"), json!("Roma"), json!("1"), json!(9.19), json!(45.46)],
            )
            .unwrap();
        assert_eq!(stop.description, "Roma");
    }

    #[test]
    fn ubicazione_used_without_nome() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let stop = mapping
            .map_record(
                0,
                &[json!("10"), json!("V.le Monza"), json!("56"), json!("9.21"), json!("45.49")],
            )
            .unwrap();
        assert_eq!(stop.description, "V.le Monza");
        assert!((stop.position.latitude() - 45.49).abs() < 1e-9);
    }

    #[test]
    fn unknown_description_without_either_column() {
        let fields: Vec<_> = ["id_amat", "linee", "LONG_X_4326", "LAT_Y_4326"]
            .into_iter()
            .map(FieldDeclaration::new)
            .collect();
        let mapping = FieldMapping::resolve(&fields);
        assert!(!mapping.has_description_field());

        let stop = mapping
            .map_record(0, &[json!("X"), json!("3"), json!(9.19), json!(45.46)])
            .unwrap();
        assert_eq!(stop.description, UNKNOWN_DESCRIPTION);
    }

    #[test]
    fn null_value_is_missing_field() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let err = mapping
            .map_record(4, &[json!("10"), json!("Loc"), Value::Null, json!(9.2), json!(45.4)])
            .unwrap_err();
        assert_eq!(
            err,
            RecordError::MissingField {
                record: 4,
                field: columns::LINES
            }
        );
    }

    #[test]
    fn short_record_is_missing_field() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let err = mapping
            .map_record(1, &[json!("10"), json!("Loc"), json!("1")])
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::MissingField {
                field: columns::LONGITUDE,
                ..
            }
        ));
    }

    #[test]
    fn undeclared_column_fails_each_record_not_batch() {
        let batch = StopBatch {
            fields: ["id_amat", "nome", "LONG_X_4326", "LAT_Y_4326"]
                .into_iter()
                .map(FieldDeclaration::new)
                .collect(),
            records: vec![
                vec![json!("A"), json!("One"), json!(9.19), json!(45.46)],
                vec![json!("B"), json!("Two"), json!(9.19), json!(45.46)],
            ],
        };
        let outcome = batch.into_outcome();
        assert!(outcome.stops.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(outcome.rejected[1].record(), 1);
    }

    #[test]
    fn non_numeric_coordinate_is_invalid_field() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let err = mapping
            .map_record(0, &[json!("10"), json!("Loc"), json!("1"), json!("east"), json!(45.4)])
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidField {
                field: columns::LONGITUDE,
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_latitude_is_invalid_field() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let err = mapping
            .map_record(0, &[json!("10"), json!("Loc"), json!("1"), json!(9.19), json!(145.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidField {
                field: columns::LATITUDE,
                ..
            }
        ));
    }

    #[test]
    fn bad_record_does_not_stop_later_records() {
        let batch = StopBatch {
            fields: surface_fields(),
            records: vec![
                vec![json!("1"), json!("A"), json!("1"), json!(9.19), json!(45.46)],
                vec![json!("2"), Value::Null, json!("1"), json!(9.19), json!(45.46)],
                vec![json!("3"), json!("C"), json!("2,3"), json!(9.20), json!(45.47)],
            ],
        };
        let outcome = batch.into_outcome();
        let codes: Vec<_> = outcome.stops.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "3"]);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].record(), 1);
    }

    #[test]
    fn numeric_code_rendered_as_text() {
        let mapping = FieldMapping::resolve(&surface_fields());
        let stop = mapping
            .map_record(0, &[json!(11390), json!("Loc"), json!("1"), json!(9.19), json!(45.46)])
            .unwrap();
        assert_eq!(stop.code.as_str(), "11390");
    }
}
