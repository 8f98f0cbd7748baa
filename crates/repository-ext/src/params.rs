//! Parameters for raw SQL statements.
//!
//! Named parameters use `@name` placeholders, which are rewritten to the
//! backend's own syntax (`$1` on Postgres, `?` on MySQL and SQLite) before
//! the statement is sent. Positional parameters are passed through untouched.

use sea_orm::{DbBackend, Statement, Value};

use common::{AppError, AppResult};

/// Bind values for a raw SQL statement.
#[derive(Debug, Clone, Default)]
pub struct Params {
    named: Vec<(String, Value)>,
    positional: Vec<Value>,
}

impl Params {
    /// No parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Values for SQL already written in the backend's placeholder syntax
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            named: Vec::new(),
            positional: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Bind `value` to every `@name` in the statement.
    /// Binding a name twice replaces the earlier value.
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.named.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.named.push((name, value)),
        }
        self
    }

    /// Append a positional value
    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }

    /// Build the statement for `backend`.
    pub fn into_statement(self, backend: DbBackend, sql: &str) -> AppResult<Statement> {
        if !self.positional.is_empty() {
            if !self.named.is_empty() {
                return Err(AppError::internal(
                    "named and positional parameters cannot be mixed",
                ));
            }
            return Ok(Statement::from_sql_and_values(backend, sql, self.positional));
        }

        let (sql, values) = rewrite_named(sql, &self.named, backend)?;
        Ok(Statement::from_sql_and_values(backend, sql, values))
    }
}

/// Replace `@name` tokens outside quoted text and comments with backend
/// placeholders.
///
/// Values are emitted once per occurrence. `@@name` is left as written.
fn rewrite_named(
    sql: &str,
    named: &[(String, Value)],
    backend: DbBackend,
) -> AppResult<(String, Vec<Value>)> {
    let mut out = String::with_capacity(sql.len());
    let mut values = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(open) = quote {
            out.push(c);
            if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => {
                quote = Some(c);
                out.push(c);
            }
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                out.push(c);
                for (_, n) in chars.by_ref() {
                    out.push(n);
                    if n == '\n' {
                        break;
                    }
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                out.push_str("/*");
                let mut prev = None;
                for (_, n) in chars.by_ref() {
                    out.push(n);
                    if prev == Some('*') && n == '/' {
                        break;
                    }
                    prev = Some(n);
                }
            }
            '@' => {
                if matches!(chars.peek(), Some((_, '@'))) {
                    chars.next();
                    out.push_str("@@");
                    continue;
                }

                let start = i + 1;
                let mut end = start;
                while let Some(&(j, n)) = chars.peek() {
                    if n.is_ascii_alphanumeric() || n == '_' {
                        end = j + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }

                if end == start {
                    out.push('@');
                    continue;
                }

                let name = &sql[start..end];
                let value = named
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| AppError::missing_parameter(name))?;
                values.push(value);

                match backend {
                    DbBackend::Postgres => out.push_str(&format!("${}", values.len())),
                    _ => out.push('?'),
                }
            }
            _ => out.push(c),
        }
    }

    Ok((out, values))
}
