use crate::{error::Error, query::Expr, value::Value};

///
/// QueryExecutor
///
/// The query-execution collaborator: runs one expression and returns the
/// parsed response resource. Retries and transport concerns live behind
/// this trait, never in callers of it.
///

pub trait QueryExecutor {
    fn query(&self, expr: &Expr) -> Result<Value, Error>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn query(&self, expr: &Expr) -> Result<Value, Error> {
        (**self).query(expr)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    fn query(&self, expr: &Expr) -> Result<Value, Error> {
        (**self).query(expr)
    }
}
