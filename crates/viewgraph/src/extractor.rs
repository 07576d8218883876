//! Dependency extraction from parsed SQL.
//!
//! Walks a statement's AST and collects the external tables and views it
//! reads from. Names bound locally by the statement never count as
//! dependencies:
//!
//! - CTE names are registered per WITH clause before its bodies are walked,
//!   so a CTE body may reference an outer (or sibling) CTE without emitting a
//!   dependency on it.
//! - `UNNEST` and `VALUES` produce rows, not table reads; only subqueries
//!   inside them are traversed.
//! - String literals and comments are invisible here: they do not survive
//!   parsing as table references, which is the whole point of walking an AST
//!   instead of scanning text.
//!
//! CTE masking is case-insensitive on both sides. The parser has lower-cased
//! unquoted identifiers already, and bound names are compared through a
//! lower-cased simple-name check.

use std::collections::HashSet;

use sqlparser::ast::{
    Expr, FunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr, Ident, JoinConstraint,
    JoinOperator, ObjectName, Query, Select, SelectItem, SetExpr, Statement, TableFactor,
    TableWithJoins,
};
use tracing::debug;

use crate::types::TableReference;

/// Collects external table references from a statement AST.
pub struct DependencyExtractor {
    /// Lower-cased CTE names bound anywhere in the statement so far.
    cte_names: HashSet<String>,
    dependencies: HashSet<TableReference>,
}

impl DependencyExtractor {
    /// Extract the set of external dependencies from a parsed statement.
    #[must_use]
    pub fn extract(statement: &Statement) -> HashSet<TableReference> {
        let mut extractor = Self {
            cte_names: HashSet::new(),
            dependencies: HashSet::new(),
        };
        extractor.walk_statement(statement);
        extractor.dependencies
    }

    fn walk_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Query(query) => self.walk_query(query),
            // View definitions normally arrive as bare queries, but accept
            // a full CREATE VIEW and read through to its body.
            Statement::CreateView { query, .. } => self.walk_query(query),
            _ => {}
        }
    }

    fn walk_query(&mut self, query: &Query) {
        if let Some(with) = &query.with {
            // Bind every CTE name at this level before walking any body, so
            // sibling references resolve to the CTE rather than a table.
            for cte in &with.cte_tables {
                self.cte_names.insert(cte.alias.name.value.to_lowercase());
            }
            for cte in &with.cte_tables {
                self.walk_query(&cte.query);
            }
        }
        self.walk_set_expr(&query.body);
    }

    fn walk_set_expr(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => self.walk_select(select),
            SetExpr::Query(query) => self.walk_query(query),
            SetExpr::SetOperation { left, right, .. } => {
                self.walk_set_expr(left);
                self.walk_set_expr(right);
            }
            SetExpr::Values(values) => {
                // VALUES rows never reference tables directly, but their
                // expressions may contain scalar subqueries.
                for row in &values.rows {
                    for expr in row {
                        self.walk_expr(expr);
                    }
                }
            }
            SetExpr::Table(table) => {
                // `TABLE t` form; the parser exposes plain strings here.
                let mut parts = Vec::new();
                if let Some(schema) = &table.schema_name {
                    parts.push(schema.to_lowercase());
                }
                if let Some(name) = &table.table_name {
                    parts.push(name.to_lowercase());
                }
                if !parts.is_empty() {
                    self.add_reference_parts(parts);
                }
            }
            _ => {}
        }
    }

    fn walk_select(&mut self, select: &Select) {
        for table_with_joins in &select.from {
            self.walk_table_with_joins(table_with_joins);
        }
        for item in &select.projection {
            match item {
                SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
                    self.walk_expr(expr);
                }
                SelectItem::QualifiedWildcard(..) | SelectItem::Wildcard(..) => {}
            }
        }
        if let Some(selection) = &select.selection {
            self.walk_expr(selection);
        }
        if let GroupByExpr::Expressions(exprs) = &select.group_by {
            for expr in exprs {
                self.walk_expr(expr);
            }
        }
        if let Some(having) = &select.having {
            self.walk_expr(having);
        }
    }

    fn walk_table_with_joins(&mut self, table_with_joins: &TableWithJoins) {
        self.walk_table_factor(&table_with_joins.relation);
        for join in &table_with_joins.joins {
            self.walk_table_factor(&join.relation);
            if let Some(JoinConstraint::On(expr)) = join_constraint(&join.join_operator) {
                self.walk_expr(expr);
            }
        }
    }

    fn walk_table_factor(&mut self, factor: &TableFactor) {
        match factor {
            TableFactor::Table { name, args, .. } => {
                // Some dialects parse UNNEST(...) as a table function rather
                // than the dedicated factor; it produces rows, not a table
                // read, so only its arguments are traversed.
                if let Some(args) = args {
                    if is_unnest(name) {
                        for arg in args {
                            let arg_expr = match arg {
                                FunctionArg::Named { arg, .. } => arg,
                                FunctionArg::Unnamed(arg) => arg,
                            };
                            if let FunctionArgExpr::Expr(expr) = arg_expr {
                                self.walk_expr(expr);
                            }
                        }
                        return;
                    }
                }
                self.add_reference(name);
            }
            TableFactor::Derived { subquery, .. } => self.walk_query(subquery),
            TableFactor::UNNEST { array_exprs, .. } => {
                for expr in array_exprs {
                    self.walk_expr(expr);
                }
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.walk_table_with_joins(table_with_joins),
            _ => {}
        }
    }

    fn walk_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::BinaryOp { left, right, .. } => {
                self.walk_expr(left);
                self.walk_expr(right);
            }
            Expr::UnaryOp { expr, .. } | Expr::Cast { expr, .. } => self.walk_expr(expr),
            Expr::Nested(inner) => self.walk_expr(inner),
            Expr::IsNull(inner)
            | Expr::IsNotNull(inner)
            | Expr::IsTrue(inner)
            | Expr::IsNotTrue(inner)
            | Expr::IsFalse(inner)
            | Expr::IsNotFalse(inner)
            | Expr::IsUnknown(inner)
            | Expr::IsNotUnknown(inner) => self.walk_expr(inner),
            Expr::IsDistinctFrom(left, right) | Expr::IsNotDistinctFrom(left, right) => {
                self.walk_expr(left);
                self.walk_expr(right);
            }
            Expr::InList { expr, list, .. } => {
                self.walk_expr(expr);
                for item in list {
                    self.walk_expr(item);
                }
            }
            Expr::InSubquery { expr, subquery, .. } => {
                self.walk_expr(expr);
                self.walk_query(subquery);
            }
            Expr::InUnnest {
                expr, array_expr, ..
            } => {
                self.walk_expr(expr);
                self.walk_expr(array_expr);
            }
            Expr::Between {
                expr, low, high, ..
            } => {
                self.walk_expr(expr);
                self.walk_expr(low);
                self.walk_expr(high);
            }
            Expr::Like { expr, pattern, .. }
            | Expr::ILike { expr, pattern, .. }
            | Expr::SimilarTo { expr, pattern, .. } => {
                self.walk_expr(expr);
                self.walk_expr(pattern);
            }
            Expr::AnyOp { left, right, .. } | Expr::AllOp { left, right, .. } => {
                self.walk_expr(left);
                self.walk_expr(right);
            }
            Expr::Exists { subquery, .. } | Expr::Subquery(subquery) => self.walk_query(subquery),
            Expr::Case {
                operand,
                conditions,
                results,
                else_result,
                ..
            } => {
                if let Some(operand) = operand {
                    self.walk_expr(operand);
                }
                for condition in conditions {
                    self.walk_expr(condition);
                }
                for result in results {
                    self.walk_expr(result);
                }
                if let Some(else_result) = else_result {
                    self.walk_expr(else_result);
                }
            }
            Expr::Function(function) => match &function.args {
                FunctionArguments::Subquery(subquery) => self.walk_query(subquery),
                FunctionArguments::List(arg_list) => {
                    for arg in &arg_list.args {
                        let arg_expr = match arg {
                            FunctionArg::Named { arg, .. } => arg,
                            FunctionArg::Unnamed(arg) => arg,
                        };
                        if let FunctionArgExpr::Expr(expr) = arg_expr {
                            self.walk_expr(expr);
                        }
                    }
                }
                FunctionArguments::None => {}
            },
            Expr::Tuple(items) => {
                for item in items {
                    self.walk_expr(item);
                }
            }
            _ => {}
        }
    }

    fn add_reference(&mut self, name: &ObjectName) {
        let parts: Vec<String> = name.0.iter().map(normalize_ident).collect();
        self.add_reference_parts(parts);
    }

    fn add_reference_parts(&mut self, parts: Vec<String>) {
        let Some(simple_name) = parts.last() else {
            return;
        };
        if self.cte_names.contains(&simple_name.to_lowercase()) {
            return;
        }
        match TableReference::from_parts(&parts) {
            Some(reference) => {
                self.dependencies.insert(reference);
            }
            None => debug!(name = %parts.join("."), "skipping over-qualified table reference"),
        }
    }
}

/// Normalize an identifier the way the warehouse resolves it: unquoted names
/// fold to lower case, quoted names keep their spelling.
fn normalize_ident(ident: &Ident) -> String {
    if ident.quote_style.is_none() {
        ident.value.to_lowercase()
    } else {
        ident.value.clone()
    }
}

fn is_unnest(name: &ObjectName) -> bool {
    matches!(name.0.as_slice(), [ident] if ident.value.eq_ignore_ascii_case("unnest"))
}

fn join_constraint(operator: &JoinOperator) -> Option<&JoinConstraint> {
    match operator {
        JoinOperator::Inner(constraint)
        | JoinOperator::LeftOuter(constraint)
        | JoinOperator::RightOuter(constraint)
        | JoinOperator::FullOuter(constraint)
        | JoinOperator::LeftSemi(constraint)
        | JoinOperator::RightSemi(constraint)
        | JoinOperator::LeftAnti(constraint)
        | JoinOperator::RightAnti(constraint) => Some(constraint),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::SqlParser;

    fn extract_sorted(sql: &str) -> Vec<String> {
        let parser = SqlParser::new();
        let mut names: Vec<String> = parser
            .extract_dependencies(sql)
            .expect("SQL should parse")
            .into_iter()
            .map(|r| r.fully_qualified_name().to_string())
            .collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn simple_from_clause() {
        assert_eq!(extract_sorted("SELECT * FROM orders"), ["orders"]);
    }

    #[test]
    fn qualified_names_keep_their_parts() {
        assert_eq!(
            extract_sorted("SELECT * FROM hive.sales.orders"),
            ["hive.sales.orders"]
        );
        assert_eq!(extract_sorted("SELECT * FROM sales.orders"), ["sales.orders"]);
    }

    #[test]
    fn unquoted_identifiers_fold_to_lower_case() {
        assert_eq!(extract_sorted("SELECT * FROM Orders"), ["orders"]);
        assert_eq!(
            extract_sorted("SELECT * FROM \"Orders\""),
            ["Orders"],
            "quoted identifiers keep their case"
        );
    }

    #[test]
    fn joins_contribute_both_sides() {
        assert_eq!(
            extract_sorted("SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c ON b.id = c.id"),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn cte_names_are_masked() {
        assert_eq!(
            extract_sorted(
                "WITH users AS (SELECT * FROM customers WHERE active) SELECT * FROM users"
            ),
            ["customers"]
        );
    }

    #[test]
    fn cte_masking_is_case_insensitive() {
        assert_eq!(
            extract_sorted("WITH Users AS (SELECT * FROM customers) SELECT * FROM users"),
            ["customers"]
        );
    }

    #[test]
    fn sibling_ctes_reference_each_other() {
        assert_eq!(
            extract_sorted(
                "WITH a AS (SELECT * FROM base), b AS (SELECT * FROM a) SELECT * FROM b"
            ),
            ["base"]
        );
    }

    #[test]
    fn nested_with_clauses_accumulate_bindings() {
        let sql = "WITH outer_cte AS (SELECT * FROM t1) \
                   SELECT * FROM (WITH inner_cte AS (SELECT * FROM outer_cte) \
                   SELECT * FROM inner_cte JOIN t2 ON inner_cte.id = t2.id) x";
        assert_eq!(extract_sorted(sql), ["t1", "t2"]);
    }

    #[test]
    fn string_literals_never_leak_references() {
        assert_eq!(
            extract_sorted("SELECT * FROM users WHERE description LIKE '%schema.fake_table%'"),
            ["users"]
        );
    }

    #[test]
    fn comments_never_leak_references() {
        assert_eq!(
            extract_sorted("SELECT * FROM users -- joins against legacy.orders some day"),
            ["users"]
        );
    }

    #[test]
    fn subqueries_in_all_positions() {
        assert_eq!(
            extract_sorted("SELECT (SELECT max(x) FROM t1) FROM t2"),
            ["t1", "t2"]
        );
        assert_eq!(
            extract_sorted("SELECT * FROM t1 WHERE EXISTS (SELECT 1 FROM t2 WHERE t2.id = t1.id)"),
            ["t1", "t2"]
        );
        assert_eq!(
            extract_sorted("SELECT * FROM t1 WHERE id IN (SELECT id FROM t2)"),
            ["t1", "t2"]
        );
        assert_eq!(
            extract_sorted("SELECT * FROM (SELECT * FROM t1) sub"),
            ["t1"]
        );
        assert_eq!(
            extract_sorted("SELECT * FROM t1 GROUP BY col HAVING count(*) > (SELECT n FROM t2)"),
            ["t1", "t2"]
        );
    }

    #[test]
    fn set_operations_traverse_all_arms() {
        assert_eq!(
            extract_sorted("SELECT id FROM a UNION SELECT id FROM b INTERSECT SELECT id FROM c"),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn values_and_unnest_contribute_nothing() {
        assert_eq!(extract_sorted("VALUES (1, 'two'), (3, 'four')"), [] as [&str; 0]);
        assert_eq!(
            extract_sorted("SELECT * FROM UNNEST(split(tags, ',')) AS t(tag)"),
            [] as [&str; 0]
        );
    }

    #[test]
    fn duplicate_references_collapse() {
        assert_eq!(
            extract_sorted("SELECT * FROM t1 a JOIN t1 b ON a.id = b.id"),
            ["t1"]
        );
    }

    #[test]
    fn aliased_relations_resolve_to_the_underlying_table() {
        assert_eq!(extract_sorted("SELECT * FROM orders AS o"), ["orders"]);
    }
}
