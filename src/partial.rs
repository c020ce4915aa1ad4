use crate::field::DateTimeFieldType;

/// A partial date or time: some field values without an instant, like "February 29" or
/// "year 1500, month 2".
///
/// Fields keep the order they were added in. Materializing a partial into an instant sets
/// them in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partial {
    fields: Vec<(DateTimeFieldType, i32)>,
}

impl Partial {
    pub fn new() -> Self {
        Partial::default()
    }

    /// Add a field, or replace its value if it is already present.
    pub fn with(mut self, field_type: DateTimeFieldType, value: i32) -> Self {
        match self.fields.iter_mut().find(|(t, _)| *t == field_type) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((field_type, value)),
        }
        self
    }

    pub fn size(&self) -> usize {
        self.fields.len()
    }

    pub fn field_type(&self, index: usize) -> DateTimeFieldType {
        self.fields[index].0
    }

    pub fn value(&self, index: usize) -> i32 {
        self.fields[index].1
    }

    pub fn values(&self) -> Vec<i32> {
        self.fields.iter().map(|(_, v)| *v).collect()
    }

    pub fn field_types(&self) -> impl Iterator<Item = DateTimeFieldType> + '_ {
        self.fields.iter().map(|(t, _)| *t)
    }

    pub fn get(&self, field_type: DateTimeFieldType) -> Option<i32> {
        self.fields
            .iter()
            .find(|(t, _)| *t == field_type)
            .map(|(_, v)| *v)
    }

    pub fn is_supported(&self, field_type: DateTimeFieldType) -> bool {
        self.get(field_type).is_some()
    }

    /// True if each field's range is the unit of the field before it, such as year, month of
    /// year, day of month. Only contiguous partials can be moved through an instant and back
    /// without losing information.
    pub fn is_contiguous(&self) -> bool {
        let mut previous = None;
        for field_type in self.field_types() {
            if let Some(prev) = previous {
                if field_type.range_duration_type() != Some(prev) {
                    return false;
                }
            }
            previous = Some(field_type.duration_type());
        }
        true
    }
}
