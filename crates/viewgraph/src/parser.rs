//! SQL parsing for view definitions.
//!
//! Wraps the `sqlparser` crate behind a small, single-statement interface.
//! Trino SQL is ANSI-flavoured and parses under the generic dialect; using a
//! real parser rather than regex is what makes CTEs, string literals,
//! comments, and quoted identifiers behave correctly downstream.

use std::collections::HashSet;

use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

use crate::error::{Error, Result};
use crate::extractor::DependencyExtractor;
use crate::types::TableReference;

/// Parser for Trino view definitions.
///
/// The contract is one statement per call: empty input and multi-statement
/// input both fail explicitly, as does any syntax error.
#[derive(Debug, Default)]
pub struct SqlParser {
    dialect: GenericDialect,
}

impl SqlParser {
    /// Create a parser with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dialect: GenericDialect {},
        }
    }

    /// Parse a single SQL statement into an AST.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the input is empty, contains more than one
    /// statement, or is not valid SQL.
    pub fn parse(&self, sql: &str) -> Result<Statement> {
        let parsed =
            Parser::parse_sql(&self.dialect, sql).map_err(|e| Error::Parse(e.to_string()))?;

        let mut statements = parsed.into_iter();
        match (statements.next(), statements.next()) {
            (Some(statement), None) => Ok(statement),
            (None, _) => Err(Error::Parse("empty SQL statement".to_string())),
            (Some(_), Some(_)) => Err(Error::Parse(format!(
                "expected a single statement, found {}",
                2 + statements.count()
            ))),
        }
    }

    /// Extract all external table and view dependencies from a SQL statement.
    ///
    /// Example:
    ///
    /// ```
    /// use viewgraph::SqlParser;
    ///
    /// let parser = SqlParser::new();
    /// let deps = parser.extract_dependencies(
    ///     "WITH temp AS (SELECT * FROM schema1.table1 \
    ///      WHERE description LIKE '%schema2.fake_table%') \
    ///      SELECT * FROM temp JOIN schema3.table2 ON temp.id = table2.id",
    /// )?;
    ///
    /// let mut names: Vec<&str> = deps.iter().map(|d| d.fully_qualified_name()).collect();
    /// names.sort_unstable();
    /// assert_eq!(names, ["schema1.table1", "schema3.table2"]);
    /// # Ok::<(), viewgraph::Error>(())
    /// ```
    ///
    /// `temp` is a CTE, not a dependency, and `schema2.fake_table` lives in a
    /// string literal so it never reaches the AST as a table reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the SQL does not parse as one statement.
    pub fn extract_dependencies(&self, sql: &str) -> Result<HashSet<TableReference>> {
        let statement = self.parse(sql)?;
        Ok(DependencyExtractor::extract(&statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_single_statement() {
        let parser = SqlParser::new();
        assert!(parser.parse("SELECT * FROM orders").is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        let parser = SqlParser::new();
        let err = parser.parse("").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_multiple_statements() {
        let parser = SqlParser::new();
        let err = parser
            .parse("SELECT * FROM a; SELECT * FROM b")
            .unwrap_err();
        assert!(err.to_string().contains("single statement"));
    }

    #[test]
    fn rejects_invalid_sql() {
        let parser = SqlParser::new();
        assert!(matches!(
            parser.parse("SELECT FROM WHERE"),
            Err(Error::Parse(_))
        ));
    }
}
