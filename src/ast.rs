/// A single table column as it appears in the generated SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub typ: String,
    /// Space separated constraint clauses, empty when the column has none.
    pub constraint: String,
    pub is_identifier: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, typ: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            constraint: String::new(),
            is_identifier: false,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }

    pub fn identifier(mut self) -> Self {
        self.is_identifier = true;
        self
    }

    pub fn has_constraint(&self) -> bool {
        !self.constraint.is_empty()
    }
}

/// The `<singular>/<plural>` pair naming a table and its record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityName {
    pub singular: String,
    pub plural: String,
}

impl EntityName {
    /// The table name is the plural half, used verbatim.
    pub fn table(&self) -> &str {
        &self.plural
    }

    pub fn singular_label(&self) -> String {
        upper_camel_case(&self.singular)
    }

    pub fn plural_label(&self) -> String {
        upper_camel_case(&self.plural)
    }
}

/// `zipcode_import` -> `ZipcodeImport`. Only the first letter of each
/// segment is touched.
pub fn upper_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for segment in s.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
