//! Per-field type configuration.

use tableschema_model::FieldDescriptor;

/// Type-specific settings that change how a field reads raw cells.
///
/// Boolean fields use the true/false lists; integer and number fields use the
/// separator and bare-number settings. Other types ignore these options.
#[derive(Debug, Clone, PartialEq)]
pub struct CastOptions {
    /// Raw values that cast to `true`. Checked before `false_values`.
    pub true_values: Vec<String>,
    /// Raw values that cast to `false`.
    pub false_values: Vec<String>,
    /// Decimal separator, replaced by `.` before parsing.
    pub decimal_char: String,
    /// Thousands separator, removed before parsing.
    pub group_char: Option<String>,
    /// When false, leading and trailing non-numeric text (currency, percent)
    /// is stripped before parsing.
    pub bare_number: bool,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            true_values: ["true", "True", "TRUE", "1"].map(String::from).to_vec(),
            false_values: ["false", "False", "FALSE", "0"].map(String::from).to_vec(),
            decimal_char: ".".to_string(),
            group_char: None,
            bare_number: true,
        }
    }
}

impl CastOptions {
    /// Reads options from a field descriptor, keeping defaults for absent keys.
    pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
        let defaults = Self::default();
        Self {
            true_values: descriptor
                .true_values
                .clone()
                .unwrap_or(defaults.true_values),
            false_values: descriptor
                .false_values
                .clone()
                .unwrap_or(defaults.false_values),
            decimal_char: descriptor
                .decimal_char
                .clone()
                .unwrap_or(defaults.decimal_char),
            group_char: descriptor.group_char.clone().or(defaults.group_char),
            bare_number: descriptor.bare_number.unwrap_or(defaults.bare_number),
        }
    }

    pub fn with_true_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.true_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_false_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.false_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_decimal_char(mut self, decimal_char: impl Into<String>) -> Self {
        self.decimal_char = decimal_char.into();
        self
    }

    pub fn with_group_char(mut self, group_char: impl Into<String>) -> Self {
        self.group_char = Some(group_char.into());
        self
    }

    pub fn with_bare_number(mut self, bare_number: bool) -> Self {
        self.bare_number = bare_number;
        self
    }

    /// Writes non-default settings back into a descriptor.
    pub(crate) fn apply_to(&self, descriptor: &mut FieldDescriptor) {
        let defaults = Self::default();
        descriptor.true_values =
            (self.true_values != defaults.true_values).then(|| self.true_values.clone());
        descriptor.false_values =
            (self.false_values != defaults.false_values).then(|| self.false_values.clone());
        descriptor.decimal_char =
            (self.decimal_char != defaults.decimal_char).then(|| self.decimal_char.clone());
        descriptor.group_char = self.group_char.clone();
        descriptor.bare_number = (self.bare_number != defaults.bare_number).then_some(self.bare_number);
    }
}
