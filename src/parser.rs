use crate::ast::{Column, EntityName};
use tracing::debug;

/// Every way the command line input can be malformed. All of these are
/// "bad argument" failures: the caller fixes the invocation and retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("bad argument: invalid <column>: '{input}', {reason}")]
    InvalidColumn { input: String, reason: String },
    #[error("bad argument: invalid <name>: '{input}', {reason}")]
    InvalidName { input: String, reason: String },
    #[error("bad argument: {0}")]
    Missing(&'static str),
    #[error("bad argument: multiple identifier columns: '{first}' and '{second}'")]
    MultipleIdentifiers { first: String, second: String },
    #[error("bad argument: invalid --only value: '{0}', expected 'schema' or 'queries'")]
    InvalidOnly(String),
}

impl ParseError {
    fn column(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColumn {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Smart column tags, the `@word` suffixes of `[name]@tag(@tag)*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Id,
    Null,
    Unique,
    Text,
    Int,
    Float,
    Double,
    Datetime,
    Blob,
}

impl Tag {
    const TABLE: [(&'static str, Tag); 9] = [
        ("id", Tag::Id),
        ("null", Tag::Null),
        ("unique", Tag::Unique),
        ("text", Tag::Text),
        ("int", Tag::Int),
        ("float", Tag::Float),
        ("double", Tag::Double),
        ("datetime", Tag::Datetime),
        ("blob", Tag::Blob),
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(keyword, _)| *keyword == s)
            .map(|(_, tag)| *tag)
    }

    /// SQL type keyword for type tags, `None` for modifiers.
    pub fn sql_type(self) -> Option<&'static str> {
        match self {
            Tag::Text => Some("TEXT"),
            Tag::Int => Some("INTEGER"),
            Tag::Float => Some("FLOAT"),
            Tag::Double => Some("DOUBLE"),
            Tag::Datetime => Some("DATETIME"),
            Tag::Blob => Some("BLOB"),
            Tag::Id | Tag::Null | Tag::Unique => None,
        }
    }
}

/// Parse one `<column>` argument in either plain (`name:type[:constraint]`)
/// or smart (`[name]@tag...`) form.
pub fn parse_column(raw: &str, id_column: &str) -> Result<Column, ParseError> {
    let column = match (raw.contains(':'), raw.contains('@')) {
        (true, false) => parse_plain_column(raw, id_column)?,
        (false, true) => parse_smart_column(raw)?,
        (true, true) => {
            return Err(ParseError::column(
                raw,
                "ambiguous column syntax, use either ':' or '@' but not both",
            ));
        }
        (false, false) => {
            return Err(ParseError::column(
                raw,
                "expected '<name>:<type>[:<constraint>]' or '<name>@<tag>...'",
            ));
        }
    };
    debug!(
        name = %column.name,
        typ = %column.typ,
        constraint = %column.constraint,
        is_identifier = column.is_identifier,
        "parsed column"
    );
    Ok(column)
}

fn parse_plain_column(raw: &str, id_column: &str) -> Result<Column, ParseError> {
    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(ParseError::column(
            raw,
            "expected '<name>:<type>' or '<name>:<type>:<constraint>'",
        ));
    }
    let (name, typ) = (parts[0], parts[1]);
    if name.is_empty() {
        return Err(ParseError::column(raw, "missing column name"));
    }
    if typ.is_empty() {
        return Err(ParseError::column(raw, "missing column type"));
    }

    let mut column = Column::new(name, typ);
    if let Some(constraint) = parts.get(2) {
        column.constraint = constraint.to_string();
    }
    column.is_identifier = name.to_lowercase() == id_column.to_lowercase();
    Ok(column)
}

fn parse_smart_column(raw: &str) -> Result<Column, ParseError> {
    if raw == "@id" {
        return Ok(Column::new("id", "INTEGER")
            .with_constraint("PRIMARY KEY")
            .identifier());
    }

    let Some((name, tags)) = raw.split_once('@') else {
        return Err(ParseError::column(raw, "missing '@' tag"));
    };
    if name.is_empty() {
        return Err(ParseError::column(raw, "missing column name"));
    }

    let mut typ: Option<&'static str> = None;
    let mut is_identifier = false;
    let mut nullable = false;
    let mut unique = false;

    for word in tags.split('@') {
        let tag = Tag::from_str(word)
            .ok_or_else(|| ParseError::column(raw, format!("unknown tag '@{}'", word)))?;
        match tag {
            Tag::Id => is_identifier = true,
            Tag::Null => nullable = true,
            Tag::Unique => unique = true,
            _ => typ = tag.sql_type(),
        }
    }

    if is_identifier && (unique || nullable) {
        return Err(ParseError::column(
            raw,
            "an '@id' column cannot be tagged '@unique' or '@null'",
        ));
    }

    if is_identifier {
        let typ = typ.unwrap_or("INTEGER");
        // INTEGER PRIMARY KEY aliases the SQLite rowid and is never NULL.
        let constraint = if typ == "INTEGER" {
            "PRIMARY KEY"
        } else {
            "NOT NULL PRIMARY KEY"
        };
        return Ok(Column::new(name, typ)
            .with_constraint(constraint)
            .identifier());
    }

    let Some(typ) = typ else {
        return Err(ParseError::column(raw, "missing column type"));
    };
    let mut clauses = Vec::new();
    if !nullable {
        clauses.push("NOT NULL");
    }
    if unique {
        clauses.push("UNIQUE");
    }
    Ok(Column::new(name, typ).with_constraint(clauses.join(" ").trim()))
}

/// Parse the `<singular>/<plural>` entity argument.
pub fn parse_entity_name(raw: &str) -> Result<EntityName, ParseError> {
    match raw.split('/').collect::<Vec<_>>().as_slice() {
        [singular, plural] if !singular.is_empty() && !plural.is_empty() => Ok(EntityName {
            singular: singular.to_string(),
            plural: plural.to_string(),
        }),
        _ => Err(ParseError::InvalidName {
            input: raw.to_string(),
            reason: "expected '<singular>/<plural>'".to_string(),
        }),
    }
}
