pub mod ast;
pub mod cli;
pub mod ir;
pub mod measure;
pub mod parser;
pub mod render;

use wasm_bindgen::prelude::*;

use ir::{OutputSelector, ScaffoldArgs, ScaffoldOptions};
use parser::ParseError;
use render::SqlRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Generate schema and query SQL for `<singular>/<plural>` and its columns.
pub fn scaffold<S: AsRef<str>>(
    name: &str,
    columns: &[S],
    options: ScaffoldOptions,
) -> Result<String, ParseError> {
    let mut args: Vec<&str> = vec![name];
    args.extend(columns.iter().map(|c| c.as_ref()));
    let args = ScaffoldArgs::from_args(args.as_slice(), options)?;
    Ok(SqlRenderer.render(&args))
}

/// Generate SQL from a browser. `columns` holds one definition per line.
#[wasm_bindgen(js_name = "sqlcupScaffold")]
pub fn scaffold_js(
    name: &str,
    columns: &str,
    id_column: Option<String>,
    order_by: Option<String>,
    only: Option<String>,
    no_exists_clause: bool,
    no_returning_clause: bool,
) -> Result<String, String> {
    let output = match only.as_deref() {
        Some(s) => OutputSelector::from_str(s)
            .ok_or_else(|| ParseError::InvalidOnly(s.to_string()).to_string())?,
        None => OutputSelector::All,
    };
    let options = ScaffoldOptions {
        no_exists_clause,
        id_column: id_column.unwrap_or_else(|| "id".to_string()),
        order_by: order_by.unwrap_or_default(),
        no_returning_clause,
        output,
    };
    let columns: Vec<&str> = columns
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    scaffold(name, &columns, options).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold() {
        let sql = scaffold("author/authors", &["@id", "name@text"], ScaffoldOptions::default())
            .unwrap();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS authors ("));
        assert!(sql.contains("-- name: UpdateAuthor :one"));
    }

    #[test]
    fn test_scaffold_js_splits_lines() {
        let sql = scaffold_js(
            "author/authors",
            "@id\n  name:text:NOT NULL\n\n",
            None,
            Some("name".to_string()),
            Some("queries".to_string()),
            false,
            true,
        )
        .unwrap();
        assert!(sql.contains("ORDER BY name;"));
        assert!(sql.contains("-- name: UpdateAuthor :exec"));
        assert!(!sql.contains("CREATE TABLE"));
    }

    #[test]
    fn test_scaffold_js_reports_errors() {
        let err = scaffold_js("author", "@id", None, None, None, false, false).unwrap_err();
        assert!(err.starts_with("bad argument: invalid <name>: 'author'"));
    }
}
