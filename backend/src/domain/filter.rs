//! Filter resolution for customer lookups and deletions.
//!
//! Incoming parameters compete with each other; exactly one predicate is
//! chosen using a fixed first-match precedence:
//!
//! 1. exact `rut`
//! 2. exact `edad`
//! 3. inclusive age range, only when both `edadMin` and `edadMax` are present
//! 4. case-insensitive name prefix (lookups only)
//! 5. no predicate (lookups only)
//!
//! Resolution is pure: it turns raw optional strings into one member of a
//! closed set of predicate templates. Persistence adapters bind the carried
//! values as parameters and never splice them into SQL text.

use super::customer::Rut;

/// Raw filter parameters as received from a caller.
///
/// A parameter counts as present when it is supplied and non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    /// Exact identifier.
    pub rut: Option<String>,
    /// Exact age.
    pub age: Option<String>,
    /// Lower bound of the age range.
    pub min_age: Option<String>,
    /// Upper bound of the age range.
    pub max_age: Option<String>,
    /// Name prefix.
    pub name: Option<String>,
}

/// Which age parameter failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeParam {
    /// The exact age parameter.
    Exact,
    /// The lower range bound.
    Min,
    /// The upper range bound.
    Max,
}

/// Errors raised while resolving a filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The age parameter selected by precedence is not a whole number.
    #[error("age parameter is not a whole number: {value}")]
    InvalidAge {
        /// Offending parameter.
        param: AgeParam,
        /// Raw value as supplied.
        value: String,
    },
    /// A deletion was requested without any recognised criterion.
    #[error("no deletion criteria supplied")]
    MissingCriteria,
}

/// Inclusive age interval.
///
/// Bounds are kept as supplied; an inverted range simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: i32,
    max: i32,
}

impl AgeRange {
    /// Build a range covering `min..=max`.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Lower bound, inclusive.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound, inclusive.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Whether `age` falls inside the range.
    pub fn contains(&self, age: i32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Case-insensitive name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrefix(String);

impl NamePrefix {
    /// Wrap a prefix as supplied by the caller.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// The prefix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL `LIKE` pattern matching names that start with the prefix.
    ///
    /// `%`, `_` and `\` inside the prefix are escaped with a backslash so they
    /// match literally.
    ///
    /// # Examples
    /// ```
    /// use clientes::domain::NamePrefix;
    ///
    /// assert_eq!(NamePrefix::new("an").like_pattern(), "an%");
    /// assert_eq!(NamePrefix::new("50%_").like_pattern(), "50\\%\\_%");
    /// ```
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 1);
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Whether `name` starts with the prefix, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().starts_with(&self.0.to_lowercase())
    }
}

/// Predicate applied to customer lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerFilter {
    /// `rut = $1`
    Rut(Rut),
    /// `edad = $1`
    Age(i32),
    /// `edad BETWEEN $1 AND $2`
    AgeRange(AgeRange),
    /// `nombre ILIKE $1`
    NamePrefix(NamePrefix),
    /// No predicate.
    All,
}

/// Predicate applied to deletions. There is deliberately no name-based or
/// match-everything variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionCriteria {
    /// `rut = $1`
    Rut(Rut),
    /// `edad = $1`
    Age(i32),
    /// `edad BETWEEN $1 AND $2`
    AgeRange(AgeRange),
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

fn parse_age(raw: &str, param: AgeParam) -> Result<i32, FilterError> {
    raw.parse().map_err(|_| FilterError::InvalidAge {
        param,
        value: raw.to_owned(),
    })
}

/// Age-based rules shared by lookups and deletions.
enum AgeRule {
    Exact(i32),
    Range(AgeRange),
}

fn resolve_age_rule(params: &FilterParams) -> Result<Option<AgeRule>, FilterError> {
    if let Some(raw) = present(params.age.as_ref()) {
        return parse_age(raw, AgeParam::Exact).map(|age| Some(AgeRule::Exact(age)));
    }
    match (
        present(params.min_age.as_ref()),
        present(params.max_age.as_ref()),
    ) {
        (Some(min), Some(max)) => {
            let min = parse_age(min, AgeParam::Min)?;
            let max = parse_age(max, AgeParam::Max)?;
            Ok(Some(AgeRule::Range(AgeRange::new(min, max))))
        }
        _ => Ok(None),
    }
}

fn present_rut(value: Option<&String>) -> Option<Rut> {
    present(value).and_then(|raw| Rut::new(raw).ok())
}

/// Choose the lookup predicate for `params`.
///
/// # Examples
/// ```
/// use clientes::domain::{resolve_lookup, CustomerFilter, FilterParams, Rut};
///
/// let params = FilterParams {
///     rut: Some("1-9".into()),
///     name: Some("An".into()),
///     ..FilterParams::default()
/// };
/// let filter = resolve_lookup(&params).expect("valid params");
/// assert_eq!(filter, CustomerFilter::Rut(Rut::new("1-9").expect("rut")));
/// ```
pub fn resolve_lookup(params: &FilterParams) -> Result<CustomerFilter, FilterError> {
    if let Some(rut) = present_rut(params.rut.as_ref()) {
        return Ok(CustomerFilter::Rut(rut));
    }
    if let Some(rule) = resolve_age_rule(params)? {
        return Ok(match rule {
            AgeRule::Exact(age) => CustomerFilter::Age(age),
            AgeRule::Range(range) => CustomerFilter::AgeRange(range),
        });
    }
    // Trimming only decides presence; the prefix keeps its spaces.
    Ok(params
        .name
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map_or(CustomerFilter::All, |name| {
            CustomerFilter::NamePrefix(NamePrefix::new(name))
        }))
}

/// Choose the deletion predicate.
///
/// `path_rut` (the identifier taken from the request path) outranks every
/// query parameter. `params.name` is never considered.
pub fn resolve_deletion(
    path_rut: Option<&str>,
    params: &FilterParams,
) -> Result<DeletionCriteria, FilterError> {
    let path_rut = path_rut.and_then(|raw| Rut::new(raw).ok());
    if let Some(rut) = path_rut.or_else(|| present_rut(params.rut.as_ref())) {
        return Ok(DeletionCriteria::Rut(rut));
    }
    match resolve_age_rule(params)? {
        Some(AgeRule::Exact(age)) => Ok(DeletionCriteria::Age(age)),
        Some(AgeRule::Range(range)) => Ok(DeletionCriteria::AgeRange(range)),
        None => Err(FilterError::MissingCriteria),
    }
}
