use crate::ir::{OutputSelector, ScaffoldArgs, ScaffoldOptions};
use crate::parser::ParseError;
use crate::render::SqlRenderer;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

const DESCRIPTION: &str = "\
sqlcup prints SQL statements to stdout. The <name> argument given to sqlcup
must be of the form <singular>/<plural> where <singular> is the name of the
record type and <plural> is the name of the database table.
sqlcup capitalizes those names where required.

Each <column> argument given to sqlcup defines a database column and must
be either a <plain-column> or a <smart-column>:

A <plain-column> must be of the form <name>:<type>[:<constraint>]. <name>,
<type> and the optional <constraint> are used to generate a CREATE TABLE
statement. In addition, <name> also appears in the SQL queries. sqlcup never
capitalizes those names.

A <smart-column> is a shortcut for common column types. It must be of the
form [<name>]@<tag>[@<tag>...]. Recognized tags are:
  @id        primary key (INTEGER unless another type tag is given)
  @text @int @float @double @datetime @blob
             column type
  @unique    add a UNIQUE constraint
  @null      allow NULL (columns are NOT NULL by default)
The bare <smart-column> @id expands to id:INTEGER:PRIMARY KEY.

If any part of a <column> contains a space, it may be necessary to add
quotes or escape those spaces, depending on the user's shell.";

const EXAMPLES: &str = "\
Examples:
  sqlcup author/authors \"id:INTEGER:PRIMARY KEY\" \"name:text:NOT NULL\" bio:text
  sqlcup --order-by name user/users \"id:INTEGER:PRIMARY KEY\" name:text
  sqlcup --only queries zipcode_import/zipcode_imports @id code@text@unique";

#[derive(Parser, Debug)]
#[command(name = "sqlcup")]
#[command(version)]
#[command(about = "sqlcup - generate SQL statements for sqlc (https://sqlc.dev)")]
#[command(long_about = DESCRIPTION, after_help = EXAMPLES)]
pub struct Cli {
    /// Omit IF NOT EXISTS in CREATE TABLE statements
    #[arg(long)]
    pub no_exists_clause: bool,

    /// Name of the column that identifies a row
    #[arg(long, value_name = "NAME", default_value = "id")]
    pub id_column: String,

    /// Include ORDER BY in 'SELECT *' statement
    #[arg(long, value_name = "EXPR")]
    pub order_by: Option<String>,

    /// Omit 'RETURNING *' in UPDATE statement
    #[arg(long)]
    pub no_returning_clause: bool,

    /// Limit output to 'schema' or 'queries'
    #[arg(long, value_name = "schema|queries")]
    pub only: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// <singular>/<plural> followed by one or more <column> definitions
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// Failure classes the process exits with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    BadArgument(#[from] ParseError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub const EXIT_INTERNAL: i32 = 1;
    pub const EXIT_BAD_ARGUMENT: i32 = 2;

    pub fn exit_code(&self) -> i32 {
        match self {
            Error::BadArgument(_) => Self::EXIT_BAD_ARGUMENT,
            Error::Internal(_) => Self::EXIT_INTERNAL,
        }
    }

    pub fn is_bad_argument(&self) -> bool {
        matches!(self, Error::BadArgument(_))
    }
}

impl Cli {
    pub fn options(&self) -> Result<ScaffoldOptions, ParseError> {
        let output = match &self.only {
            Some(only) => OutputSelector::from_str(only)
                .ok_or_else(|| ParseError::InvalidOnly(only.clone()))?,
            None => OutputSelector::All,
        };
        Ok(ScaffoldOptions {
            no_exists_clause: self.no_exists_clause,
            id_column: self.id_column.clone(),
            order_by: self.order_by.clone().unwrap_or_default(),
            no_returning_clause: self.no_returning_clause,
            output,
        })
    }

    /// Resolve the arguments and render the SQL text.
    pub fn run(&self) -> Result<String, Error> {
        let args = ScaffoldArgs::from_args(self.args.as_slice(), self.options()?)?;
        Ok(SqlRenderer.render(&args))
    }

    /// Write generated SQL to `--output`, or stdout when unset.
    pub fn write(&self, sql: &str) -> Result<(), Error> {
        match &self.output {
            Some(path) => std::fs::write(path, sql).map_err(|e| {
                Error::Internal(format!("failed to write {}: {}", path.display(), e))
            }),
            None => {
                use std::io::Write;
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(sql.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| Error::Internal(format!("failed to write stdout: {}", e)))
            }
        }
    }

    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sqlcup", "author/authors", "@id"]).unwrap();
        assert_eq!(cli.options().unwrap(), ScaffoldOptions::default());
        assert_eq!(cli.args, vec!["author/authors", "@id"]);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "sqlcup",
            "--no-exists-clause",
            "--id-column",
            "uuid",
            "--order-by",
            "name",
            "--no-returning-clause",
            "--only",
            "queries",
            "user/users",
            "uuid:text",
        ])
        .unwrap();
        let options = cli.options().unwrap();
        assert!(options.no_exists_clause);
        assert!(options.no_returning_clause);
        assert_eq!(options.id_column, "uuid");
        assert_eq!(options.order_by, "name");
        assert_eq!(options.output, OutputSelector::Queries);
    }

    #[test]
    fn test_invalid_only_is_bad_argument() {
        let cli =
            Cli::try_parse_from(["sqlcup", "--only", "tables", "author/authors", "@id"]).unwrap();
        let err = cli.run().unwrap_err();
        assert!(err.is_bad_argument());
        assert_eq!(err.exit_code(), Error::EXIT_BAD_ARGUMENT);
        assert_eq!(
            err.to_string(),
            "bad argument: invalid --only value: 'tables', expected 'schema' or 'queries'"
        );
    }

    #[test]
    fn test_exit_codes_differ() {
        let internal = Error::Internal("boom".to_string());
        assert!(!internal.is_bad_argument());
        assert_ne!(internal.exit_code(), Error::EXIT_BAD_ARGUMENT);
        assert_ne!(internal.exit_code(), 0);
    }

    #[test]
    fn test_usage_mentions_syntax() {
        let usage = Cli::usage();
        assert!(usage.contains("<singular>/<plural>"));
        assert!(usage.contains("--no-returning-clause"));
        assert!(usage.contains("sqlcup author/authors"));
    }

    #[test]
    fn test_write_to_file() {
        let path = std::env::temp_dir().join(format!("sqlcup-test-{}.sql", std::process::id()));
        let cli = Cli::try_parse_from([
            "sqlcup",
            "-o",
            path.to_str().unwrap(),
            "author/authors",
            "@id",
        ])
        .unwrap();
        let sql = cli.run().unwrap();
        cli.write(&sql).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), sql);
        std::fs::remove_file(&path).unwrap();
    }
}
