use crate::ast::{Column, EntityName};
use crate::parser::{ParseError, parse_column, parse_entity_name};
use tracing::debug;

/// Which blocks of SQL to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSelector {
    #[default]
    All,
    Schema,
    Queries,
}

impl OutputSelector {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "" => Some(Self::All),
            "schema" => Some(Self::Schema),
            "queries" => Some(Self::Queries),
            _ => None,
        }
    }

    pub fn includes_schema(self) -> bool {
        matches!(self, Self::All | Self::Schema)
    }

    pub fn includes_queries(self) -> bool {
        matches!(self, Self::All | Self::Queries)
    }
}

/// Generation switches, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub no_exists_clause: bool,
    /// Plain columns whose name matches this (ignoring case) identify a row.
    pub id_column: String,
    /// Empty means no `ORDER BY` in the list query.
    pub order_by: String,
    pub no_returning_clause: bool,
    pub output: OutputSelector,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            no_exists_clause: false,
            id_column: "id".to_string(),
            order_by: String::new(),
            no_returning_clause: false,
            output: OutputSelector::All,
        }
    }
}

/// A fully resolved generation request: table naming, parsed columns and
/// options. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldArgs {
    pub table: String,
    pub singular_entity: String,
    pub plural_entity: String,
    pub columns: Vec<Column>,
    /// Index into `columns` of the identifier column, if any.
    pub id_column: Option<usize>,
    pub options: ScaffoldOptions,
}

impl ScaffoldArgs {
    /// Build from positional arguments: `<singular>/<plural>` followed by
    /// one or more column definitions. Fails on the first bad argument.
    pub fn from_args<S: AsRef<str>>(
        args: &[S],
        options: ScaffoldOptions,
    ) -> Result<Self, ParseError> {
        let Some((name, columns)) = args.split_first() else {
            return Err(ParseError::Missing("missing <name> and <column>"));
        };
        let entity = parse_entity_name(name.as_ref())?;
        if columns.is_empty() {
            return Err(ParseError::Missing("missing <column>"));
        }
        let columns = columns
            .iter()
            .map(|raw| parse_column(raw.as_ref(), &options.id_column))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entity, columns, options)
    }

    pub fn new(
        entity: EntityName,
        columns: Vec<Column>,
        options: ScaffoldOptions,
    ) -> Result<Self, ParseError> {
        let mut id_column: Option<usize> = None;
        for (i, column) in columns.iter().enumerate() {
            if !column.is_identifier {
                continue;
            }
            if let Some(first) = id_column {
                return Err(ParseError::MultipleIdentifiers {
                    first: columns[first].name.clone(),
                    second: column.name.clone(),
                });
            }
            id_column = Some(i);
        }

        match id_column {
            Some(i) => debug!(table = %entity.table(), column = %columns[i].name, "identifier column"),
            None => debug!(table = %entity.table(), "no identifier column"),
        }

        Ok(Self {
            table: entity.table().to_string(),
            singular_entity: entity.singular_label(),
            plural_entity: entity.plural_label(),
            columns,
            id_column,
            options,
        })
    }

    pub fn identifier_column(&self) -> Option<&Column> {
        self.id_column.map(|i| &self.columns[i])
    }

    /// Columns in input order, minus the identifier column.
    pub fn non_identifier_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.id_column)
            .map(|(_, c)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let args = ScaffoldArgs::from_args(
            &["author/authors", "id:INTEGER:PRIMARY KEY", "name:text:NOT NULL", "bio:text"],
            ScaffoldOptions::default(),
        )
        .unwrap();
        assert_eq!(args.table, "authors");
        assert_eq!(args.singular_entity, "Author");
        assert_eq!(args.plural_entity, "Authors");
        assert_eq!(args.columns.len(), 3);
        assert_eq!(args.identifier_column().map(|c| c.name.as_str()), Some("id"));
        let rest: Vec<&str> = args
            .non_identifier_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(rest, vec!["name", "bio"]);
    }

    #[test]
    fn test_identifier_in_middle_keeps_order() {
        let args = ScaffoldArgs::from_args(
            &["tag/tags", "label@text", "@id", "color@text@null"],
            ScaffoldOptions::default(),
        )
        .unwrap();
        assert_eq!(args.id_column, Some(1));
        let rest: Vec<&str> = args
            .non_identifier_columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(rest, vec!["label", "color"]);
    }

    #[test]
    fn test_custom_id_column() {
        let options = ScaffoldOptions {
            id_column: "uuid".to_string(),
            ..Default::default()
        };
        let args =
            ScaffoldArgs::from_args(&["user/users", "id:int", "UUID:text"], options).unwrap();
        assert_eq!(args.identifier_column().map(|c| c.name.as_str()), Some("UUID"));
    }

    #[test]
    fn test_no_identifier() {
        let args = ScaffoldArgs::from_args(
            &["log/logs", "message@text"],
            ScaffoldOptions::default(),
        )
        .unwrap();
        assert!(args.identifier_column().is_none());
        assert_eq!(args.non_identifier_columns().len(), 1);
    }

    #[test]
    fn test_missing_arguments() {
        let empty: [&str; 0] = [];
        assert_eq!(
            ScaffoldArgs::from_args(&empty, ScaffoldOptions::default()),
            Err(ParseError::Missing("missing <name> and <column>"))
        );
        assert_eq!(
            ScaffoldArgs::from_args(&["author/authors"], ScaffoldOptions::default()),
            Err(ParseError::Missing("missing <column>"))
        );
    }

    #[test]
    fn test_multiple_identifiers_rejected() {
        let err = ScaffoldArgs::from_args(
            &["author/authors", "@id", "other@text@id"],
            ScaffoldOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::MultipleIdentifiers {
                first: "id".to_string(),
                second: "other".to_string(),
            }
        );
    }

    #[test]
    fn test_first_bad_column_aborts() {
        let err = ScaffoldArgs::from_args(
            &["author/authors", "@id", "a:b:c:d", "x@nope"],
            ScaffoldOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidColumn { ref input, .. } if input == "a:b:c:d"));
    }

    #[test]
    fn test_output_selector() {
        assert_eq!(OutputSelector::from_str("schema"), Some(OutputSelector::Schema));
        assert_eq!(OutputSelector::from_str("queries"), Some(OutputSelector::Queries));
        assert_eq!(OutputSelector::from_str(""), Some(OutputSelector::All));
        assert_eq!(OutputSelector::from_str("both"), None);
        assert!(OutputSelector::All.includes_schema());
        assert!(OutputSelector::All.includes_queries());
        assert!(!OutputSelector::Schema.includes_queries());
        assert!(!OutputSelector::Queries.includes_schema());
    }
}
