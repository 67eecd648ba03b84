//! Renders a resolved scaffold request as schema DDL and sqlc query templates.

use crate::ir::ScaffoldArgs;
use crate::measure::ColumnMetrics;
use tracing::debug;

const SCHEMA_BANNER: &str = "\
#############################################
# Add the following to your SQL schema file #
#############################################
";

const QUERIES_BANNER: &str = "\
##############################################
# Add the following to your SQL queries file #
##############################################
";

#[derive(Debug, Default)]
pub struct SqlRenderer;

impl SqlRenderer {
    pub fn render(&self, args: &ScaffoldArgs) -> String {
        let output = args.options.output;
        let banners = output.includes_schema() && output.includes_queries();
        let mut blocks = Vec::new();

        if output.includes_schema() {
            let mut block = String::new();
            if banners {
                block.push_str(SCHEMA_BANNER);
                block.push('\n');
            }
            block.push_str(&self.schema(args));
            blocks.push(block);
        }

        if output.includes_queries() {
            let mut block = String::new();
            if banners {
                block.push_str(QUERIES_BANNER);
                block.push('\n');
            }
            block.push_str(&self.queries(args).join("\n\n"));
            blocks.push(block);
        }

        let mut sql = blocks.join("\n\n");
        sql.push('\n');
        sql
    }

    pub fn schema(&self, args: &ScaffoldArgs) -> String {
        let metrics = ColumnMetrics::measure(&args.columns);
        let mut sql = String::from("CREATE TABLE ");
        if !args.options.no_exists_clause {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&args.table);
        sql.push_str(" (\n");

        let last = args.columns.len().saturating_sub(1);
        for (i, col) in args.columns.iter().enumerate() {
            sql.push_str("  ");
            sql.push_str(&col.name);
            sql.push(' ');
            push_spaces(&mut sql, metrics.name_padding(&col.name));
            sql.push_str(&col.typ);
            if col.has_constraint() {
                push_spaces(&mut sql, metrics.type_padding(&col.typ));
                sql.push(' ');
                sql.push_str(&col.constraint);
            }
            if i < last {
                sql.push(',');
            }
            sql.push('\n');
        }
        sql.push_str(");");

        debug!(table = %args.table, columns = args.columns.len(), "rendered schema");
        sql
    }

    /// The query templates in output order. Identifier based queries are
    /// skipped when the table has no identifier column.
    pub fn queries(&self, args: &ScaffoldArgs) -> Vec<String> {
        let mut queries = Vec::new();
        let has_id = args.identifier_column().is_some();

        if has_id {
            queries.extend(self.get_query(args));
        }
        queries.push(self.list_query(args));
        queries.push(self.create_query(args));
        if has_id {
            queries.extend(self.delete_query(args));
            queries.extend(self.update_query(args));
        }

        debug!(table = %args.table, queries = queries.len(), "rendered queries");
        queries
    }

    fn get_query(&self, args: &ScaffoldArgs) -> Option<String> {
        let id = args.identifier_column()?;
        Some(format!(
            "-- name: Get{} :one\nSELECT * FROM {}\nWHERE {} = ? LIMIT 1;",
            args.singular_entity, args.table, id.name
        ))
    }

    fn list_query(&self, args: &ScaffoldArgs) -> String {
        let mut sql = format!(
            "-- name: List{} :many\nSELECT * FROM {}",
            args.plural_entity, args.table
        );
        if !args.options.order_by.is_empty() {
            sql.push_str("\nORDER BY ");
            sql.push_str(&args.options.order_by);
        }
        sql.push(';');
        sql
    }

    fn create_query(&self, args: &ScaffoldArgs) -> String {
        let columns = args.non_identifier_columns();
        let mut sql = format!(
            "-- name: Create{} :one\nINSERT INTO {}",
            args.singular_entity, args.table
        );
        if columns.is_empty() {
            sql.push_str(" DEFAULT VALUES\n");
        } else {
            let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
            let params = vec!["?"; columns.len()];
            sql.push_str(&format!(
                " (\n  {}\n) VALUES (\n  {}\n)\n",
                names.join(", "),
                params.join(", ")
            ));
        }
        sql.push_str("RETURNING *;");
        sql
    }

    fn delete_query(&self, args: &ScaffoldArgs) -> Option<String> {
        let id = args.identifier_column()?;
        Some(format!(
            "-- name: Delete{} :exec\nDELETE FROM {}\nWHERE {} = ?;",
            args.singular_entity, args.table, id.name
        ))
    }

    fn update_query(&self, args: &ScaffoldArgs) -> Option<String> {
        let id = args.identifier_column()?;
        let columns = args.non_identifier_columns();
        if columns.is_empty() {
            return None;
        }

        let mode = if args.options.no_returning_clause {
            ":exec"
        } else {
            ":one"
        };
        let assignments: Vec<String> = columns
            .iter()
            .map(|c| format!("  {} = ?", c.name))
            .collect();

        let mut sql = format!(
            "-- name: Update{} {}\nUPDATE {}\nSET\n{}\nWHERE {} = ?",
            args.singular_entity,
            mode,
            args.table,
            assignments.join(",\n"),
            id.name
        );
        if args.options.no_returning_clause {
            sql.push(';');
        } else {
            sql.push_str("\nRETURNING *;");
        }
        Some(sql)
    }
}

fn push_spaces(out: &mut String, n: usize) {
    out.extend(std::iter::repeat_n(' ', n));
}
