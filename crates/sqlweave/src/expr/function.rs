use super::{Condition, Expr, Window};

/// What is inside the parentheses of a call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Args(Vec<Expr>),
    /// Dialect-specific JSON object constructor with `(key, value)` entries.
    JsonObject(Vec<(String, Expr)>),
}

/// Window attached to a function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Over {
    Window(Window),
    /// Reference to a window declared with `Statement::window`.
    Named(String),
}

/// A SQL function call.
///
/// ```ignore
/// let n = Function::new("COUNT").arg(p.col("id")).distinct().filter(p.col("score").gt(5));
/// // COUNT(DISTINCT "p"."id") FILTER (WHERE "p"."score" > $1)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    call: Call,
    distinct: bool,
    filter: Option<Box<Condition>>,
    over: Option<Over>,
    alias: Option<String>,
    cast: Option<String>,
    polymorphic: bool,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            call: Call::Args(Vec::new()),
            distinct: false,
            filter: None,
            over: None,
            alias: None,
            cast: None,
            polymorphic: false,
        }
    }

    /// Create a call with arguments.
    pub fn call<I, E>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        let mut f = Self::new(name);
        f.call = Call::Args(args.into_iter().map(Into::into).collect());
        f
    }

    /// A JSON object constructor. Rendering depends on the dialect.
    pub fn json_object<I, K, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<Expr>,
    {
        let mut f = Self::new("json_object");
        f.call = Call::JsonObject(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        f.polymorphic = true;
        f
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<Expr>) -> Self {
        match &mut self.call {
            Call::Args(args) => args.push(arg.into()),
            Call::JsonObject(_) => {}
        }
        self
    }

    /// Append a JSON object entry.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Expr>) -> Self {
        if let Call::JsonObject(entries) = &mut self.call {
            entries.push((key.into(), value.into()));
        }
        self
    }

    /// `NAME(DISTINCT ...)`
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// `FILTER (WHERE ...)` for aggregates.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = Some(Box::new(condition));
        self
    }

    /// `OVER (...)`
    pub fn over(mut self, window: Window) -> Self {
        self.over = Some(Over::Window(window));
        self
    }

    /// `OVER name`
    pub fn over_named(mut self, name: impl Into<String>) -> Self {
        self.over = Some(Over::Named(name.into()));
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Wrap the whole call in `CAST(... AS ty)`.
    pub fn cast(mut self, ty: impl Into<String>) -> Self {
        self.cast = Some(ty.into());
        self
    }

    /// Mark the arguments as untyped from the server's point of view.
    ///
    /// On dialects that cannot infer parameter types for such calls, every
    /// literal argument must be wrapped in [`Expr::cast`].
    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub(crate) fn call_body(&self) -> &Call {
        &self.call
    }

    pub(crate) fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub(crate) fn filter_condition(&self) -> Option<&Condition> {
        self.filter.as_deref()
    }

    pub(crate) fn over_clause(&self) -> Option<&Over> {
        self.over.as_ref()
    }

    pub(crate) fn cast_type(&self) -> Option<&str> {
        self.cast.as_deref()
    }

    pub(crate) fn is_polymorphic(&self) -> bool {
        self.polymorphic
    }

    /// Argument expressions in order (JSON object values for the builder form).
    pub fn args(&self) -> Box<dyn Iterator<Item = &Expr> + '_> {
        match &self.call {
            Call::Args(args) => Box::new(args.iter()),
            Call::JsonObject(entries) => Box::new(entries.iter().map(|(_, v)| v)),
        }
    }

    /// Ranking and offset window functions need an ORDER BY inside OVER on some dialects.
    pub(crate) fn is_ranking(&self) -> bool {
        const RANKING: [&str; 8] = [
            "ROW_NUMBER",
            "RANK",
            "DENSE_RANK",
            "NTILE",
            "LAG",
            "LEAD",
            "PERCENT_RANK",
            "CUME_DIST",
        ];
        RANKING.iter().any(|r| r.eq_ignore_ascii_case(&self.name))
    }

    pub(crate) fn output_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Number of literal leaves bound when compiled.
    pub fn literal_count(&self) -> usize {
        let args: usize = self.args().map(Expr::literal_count).sum();
        let filter = self.filter.as_ref().map_or(0, |c| c.literal_count());
        let window = match &self.over {
            Some(Over::Window(w)) => w.literal_count(),
            _ => 0,
        };
        args + filter + window
    }
}

super::impl_compare_methods!(Function);

/// Common function constructors.
pub mod func {
    use super::Function;
    use crate::expr::Expr;

    /// `COUNT(expr)`
    pub fn count(expr: impl Into<Expr>) -> Function {
        Function::call("COUNT", [expr.into()])
    }

    /// `COUNT(*)`
    pub fn count_star() -> Function {
        Function::call("COUNT", [Expr::star()])
    }

    /// `COUNT(DISTINCT expr)`
    pub fn count_distinct(expr: impl Into<Expr>) -> Function {
        count(expr).distinct()
    }

    pub fn sum(expr: impl Into<Expr>) -> Function {
        Function::call("SUM", [expr.into()])
    }

    pub fn avg(expr: impl Into<Expr>) -> Function {
        Function::call("AVG", [expr.into()])
    }

    pub fn min(expr: impl Into<Expr>) -> Function {
        Function::call("MIN", [expr.into()])
    }

    pub fn max(expr: impl Into<Expr>) -> Function {
        Function::call("MAX", [expr.into()])
    }

    pub fn lower(expr: impl Into<Expr>) -> Function {
        Function::call("LOWER", [expr.into()])
    }

    pub fn upper(expr: impl Into<Expr>) -> Function {
        Function::call("UPPER", [expr.into()])
    }

    /// `COALESCE(...)`. Polymorphic: literal arguments need a cast on Postgres.
    pub fn coalesce<I, E>(args: I) -> Function
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Function::call("COALESCE", args).polymorphic()
    }

    pub fn row_number() -> Function {
        Function::new("ROW_NUMBER")
    }

    pub fn rank() -> Function {
        Function::new("RANK")
    }

    pub fn dense_rank() -> Function {
        Function::new("DENSE_RANK")
    }

    /// `LAG(expr, offset)`
    pub fn lag(expr: impl Into<Expr>, offset: i64) -> Function {
        Function::call("LAG", [expr.into(), Expr::value(offset)])
    }

    /// `LEAD(expr, offset)`
    pub fn lead(expr: impl Into<Expr>, offset: i64) -> Function {
        Function::call("LEAD", [expr.into(), Expr::value(offset)])
    }

    /// JSON object constructor, e.g. `json_build_object('id', "u"."id")` on Postgres.
    pub fn json_object<I, K, E>(entries: I) -> Function
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<Expr>,
    {
        Function::json_object(entries)
    }
}
