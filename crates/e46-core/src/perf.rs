//! Performance card formatting
//!
//! Each engine renders as six label/value pairs with fixed units. Decimals
//! print in their shortest form, so `10.0` seconds shows as `10 s`.

use crate::engine::{EngineSpec, SpecDataset, SpecError};

/// Number of cards shown for every engine
pub const PERF_FIELD_COUNT: usize = 6;

/// One label/value card on the performance panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecField {
    pub label: &'static str,
    pub value: String,
}

impl SpecField {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Format the six performance cards for an engine
pub fn perf_fields(spec: &EngineSpec) -> [SpecField; PERF_FIELD_COUNT] {
    [
        SpecField::new("Engine code", spec.code.join(", ")),
        SpecField::new("Power", format!("{} hp", spec.power)),
        SpecField::new("Torque", format!("{} Nm", spec.torque)),
        SpecField::new("0–100 km/h", format!("{} s", spec.zero100)),
        SpecField::new("Economy", format!("{} L/100km", spec.economy)),
        SpecField::new("Character", spec.note.clone()),
    ]
}

/// Look up an engine and format its cards
pub fn perf_fields_for(
    dataset: &SpecDataset,
    key: &str,
) -> Result<[SpecField; PERF_FIELD_COUNT], SpecError> {
    dataset.get(key).map(perf_fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(fields: &'a [SpecField], label: &str) -> &'a str {
        fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_330i_fields() {
        let dataset = SpecDataset::builtin().unwrap();
        let fields = perf_fields_for(&dataset, "330i").unwrap();

        assert_eq!(value(&fields, "Engine code"), "M54B30");
        assert_eq!(value(&fields, "Power"), "225 hp");
        assert_eq!(value(&fields, "Torque"), "300 Nm");
        assert_eq!(value(&fields, "0–100 km/h"), "6.5 s");
        assert_eq!(value(&fields, "Economy"), "8.6 L/100km");
        assert_eq!(value(&fields, "Character"), "Strong all‑rounder");
    }

    #[test]
    fn test_whole_seconds_drop_fraction() {
        let dataset = SpecDataset::builtin().unwrap();
        let fields = perf_fields_for(&dataset, "318i").unwrap();
        assert_eq!(value(&fields, "0–100 km/h"), "10 s");
        assert_eq!(value(&fields, "Engine code"), "M43, N42, N46");
    }

    #[test]
    fn test_every_engine_matches_record() {
        let dataset = SpecDataset::builtin().unwrap();
        for (key, spec) in dataset.iter() {
            let fields = perf_fields_for(&dataset, key).unwrap();
            assert_eq!(fields.len(), PERF_FIELD_COUNT);
            assert_eq!(fields[0].value, spec.code.join(", "));
            assert_eq!(fields[1].value, format!("{} hp", spec.power));
            assert_eq!(fields[2].value, format!("{} Nm", spec.torque));
            assert_eq!(fields[3].value, format!("{} s", spec.zero100));
            assert_eq!(fields[4].value, format!("{} L/100km", spec.economy));
            assert_eq!(fields[5].value, spec.note);
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let dataset = SpecDataset::builtin().unwrap();
        let first = perf_fields_for(&dataset, "320d").unwrap();
        let second = perf_fields_for(&dataset, "320d").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_key() {
        let dataset = SpecDataset::builtin().unwrap();
        assert!(matches!(
            perf_fields_for(&dataset, "nope"),
            Err(SpecError::UnknownEngine(_))
        ));
    }
}
