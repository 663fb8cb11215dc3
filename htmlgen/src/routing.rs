//! A small URL dispatcher that mixes static path patterns with dynamic resolvers.
//!
//! A [`Router`] holds an ordered list of [`Route`]s and the first one that matches a path
//! wins. Routes are:
//!
//! - [`Route::path`]: a pattern such as `articles/<int:year>/<slug>/`, which captures
//!   keyword arguments and can be reversed by name;
//! - [`Route::dynamic`]: a callback that decides at runtime whether it handles a path
//!   (e.g. by looking it up in a database), returning the arguments for the view;
//! - [`Route::include`]: a nested router mounted under a prefix.
//!
//! Views are opaque values of type `V`, typically handler functions.
//!
//! ```
//! use htmlgen::routing::{Resolved, Route, Router};
//!
//! let router = Router::new()
//!     .route(Route::path("about/", "about").unwrap().name("about"))
//!     .route(Route::dynamic(
//!         |path| path.strip_suffix('/').map(|page| Resolved::new().kwarg("page", page)),
//!         "cms",
//!     ));
//!
//! let found = router.resolve("/welcome/").unwrap();
//! assert_eq!(*found.view, "cms");
//! assert_eq!(found.kwargs["page"], "welcome");
//! assert_eq!(router.reverse("about", &[]).unwrap(), "/about/");
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// The route reported for matches of a [`Route::dynamic`] entry.
pub const DYNAMIC_ROUTE: &str = "_DYNAMIC_PATH_ROUTE_";

/// `<name>` or `<converter:name>`.
static PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(?:(?P<converter>[^>:]+):)?(?P<name>[^>]+)>").unwrap());

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Keyword arguments captured from a path.
pub type Kwargs = BTreeMap<String, String>;

/// The arguments a dynamic resolver found for a path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    /// Positional arguments.
    pub args: Vec<String>,
    /// Keyword arguments.
    pub kwargs: Kwargs,
}
impl Resolved {
    /// No arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Add a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}

/// A successful resolution.
#[derive(Debug)]
pub struct ResolverMatch<'r, V> {
    /// The view of the matching route.
    pub view: &'r V,
    /// Positional arguments for the view.
    pub args: Vec<String>,
    /// Keyword arguments for the view, including those captured by include prefixes.
    pub kwargs: Kwargs,
    /// The pattern that matched, including include prefixes. Dynamic routes report
    /// [`DYNAMIC_ROUTE`].
    pub route: String,
    /// The name of the matching route, if it has one.
    pub url_name: Option<&'r str>,
}

/// Error returned when a path pattern cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The converter in `<converter:name>` is not one of `str`, `int`, `slug` or `path`.
    UnknownConverter {
        /// The converter.
        converter: String,
    },
    /// The parameter name is not an identifier.
    InvalidParameter {
        /// The parameter name.
        name: String,
    },
    /// The same parameter appears twice.
    DuplicateParameter {
        /// The parameter name.
        name: String,
    },
}
impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::UnknownConverter { converter } => {
                write!(f, "Unknown path converter `{converter}`")
            }
            PatternError::InvalidParameter { name } => {
                write!(f, "Path parameter `{name}` is not a valid identifier")
            }
            PatternError::DuplicateParameter { name } => {
                write!(f, "Path parameter `{name}` appears more than once")
            }
        }
    }
}
impl std::error::Error for PatternError {}

/// Error returned by [`Router::reverse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseError {
    /// No path route has this name.
    UnknownName {
        /// The name.
        name: String,
    },
    /// Routes with this name exist, but none takes exactly the given arguments, or a value
    /// is not accepted by its parameter's converter.
    NoMatch {
        /// The name.
        name: String,
        /// The names of the given arguments.
        arguments: Vec<String>,
    },
}
impl fmt::Display for ReverseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReverseError::UnknownName { name } => write!(f, "No route named `{name}`"),
            ReverseError::NoMatch { name, arguments } => write!(
                f,
                "Route `{name}` cannot be reversed with arguments [{}]",
                arguments.join(", ")
            ),
        }
    }
}
impl std::error::Error for ReverseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Converter {
    Str,
    Int,
    Slug,
    Path,
}
impl Converter {
    fn parse(converter: Option<&str>) -> Result<Self, PatternError> {
        match converter {
            None | Some("str") => Ok(Converter::Str),
            Some("int") => Ok(Converter::Int),
            Some("slug") => Ok(Converter::Slug),
            Some("path") => Ok(Converter::Path),
            Some(other) => Err(PatternError::UnknownConverter {
                converter: other.to_string(),
            }),
        }
    }

    fn regex(self) -> &'static str {
        match self {
            Converter::Str => "[^/]+",
            Converter::Int => "[0-9]+",
            Converter::Slug => "[-a-zA-Z0-9_]+",
            Converter::Path => ".+",
        }
    }

    fn accepts(self, value: &str) -> bool {
        !value.is_empty()
            && match self {
                Converter::Str => !value.contains('/'),
                Converter::Int => value.bytes().all(|b| b.is_ascii_digit()),
                Converter::Slug => value
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
                Converter::Path => true,
            }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Parameter { name: String, converter: Converter },
}

#[derive(Debug, Clone)]
struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
}
impl PathPattern {
    /// Parse a pattern. With `prefix`, the pattern only has to match the start of a path.
    fn parse(source: &str, prefix: bool) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut regex = String::from("^");
        let mut last = 0;
        for captures in PARAMETER.captures_iter(source) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let literal = &source[last..whole.start()];
            if !literal.is_empty() {
                regex.push_str(&regex::escape(literal));
                segments.push(Segment::Literal(literal.to_string()));
            }
            last = whole.end();

            let name = captures.name("name").map_or("", |m| m.as_str());
            if !IDENTIFIER.is_match(name) {
                return Err(PatternError::InvalidParameter {
                    name: name.to_string(),
                });
            }
            let is_duplicate = segments
                .iter()
                .any(|s| matches!(s, Segment::Parameter { name: n, .. } if n == name));
            if is_duplicate {
                return Err(PatternError::DuplicateParameter {
                    name: name.to_string(),
                });
            }
            let converter = Converter::parse(captures.name("converter").map(|m| m.as_str()))?;
            regex.push_str(&format!("(?P<{name}>{})", converter.regex()));
            segments.push(Segment::Parameter {
                name: name.to_string(),
                converter,
            });
        }
        let literal = &source[last..];
        if !literal.is_empty() {
            regex.push_str(&regex::escape(literal));
            segments.push(Segment::Literal(literal.to_string()));
        }
        if !prefix {
            regex.push('$');
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            // Literals are escaped and names are identifiers.
            regex: Regex::new(&regex).unwrap(),
        })
    }

    /// Match the pattern, returning the captured arguments and the length of the match.
    fn matches(&self, path: &str) -> Option<(Kwargs, usize)> {
        let captures = self.regex.captures(path)?;
        let kwargs = self
            .parameters()
            .filter_map(|(name, _)| {
                let value = captures.name(name)?;
                Some((name.to_string(), value.as_str().to_string()))
            })
            .collect();
        Some((kwargs, captures.get(0).map_or(0, |m| m.end())))
    }

    fn parameters(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Parameter { name, converter } => Some((name.as_str(), *converter)),
            Segment::Literal(_) => None,
        })
    }

    fn write_reversed(&self, kwargs: &BTreeMap<&str, &str>, out: &mut String) -> Option<()> {
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Parameter { name, converter } => {
                    let value = kwargs.get(name.as_str())?;
                    if !converter.accepts(value) {
                        return None;
                    }
                    out.push_str(value);
                }
            }
        }
        Some(())
    }
}

type Resolver = Box<dyn Fn(&str) -> Option<Resolved>>;

enum RouteKind<V> {
    Path(PathPattern, V),
    Dynamic(Resolver, V),
    Include(PathPattern, Router<V>),
}

/// One entry of a [`Router`].
pub struct Route<V> {
    kind: RouteKind<V>,
    name: Option<Cow<'static, str>>,
}
impl<V> Route<V> {
    /// A route matching a path pattern.
    ///
    /// Patterns are matched against the path without its leading `/`. A `<name>` segment
    /// captures a keyword argument; `<int:name>`, `<slug:name>`, `<path:name>` and
    /// `<str:name>` restrict what it matches (`str`, the default, matches anything but `/`).
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if a parameter is malformed.
    pub fn path(pattern: &str, view: V) -> Result<Self, PatternError> {
        Ok(Self {
            kind: RouteKind::Path(PathPattern::parse(pattern, false)?, view),
            name: None,
        })
    }

    /// A route that asks `resolver` whether it handles a path.
    ///
    /// The resolver receives the path without its leading `/`, and returns the arguments
    /// for the view if it matches. Matches report [`DYNAMIC_ROUTE`] as their route.
    pub fn dynamic<F>(resolver: F, view: V) -> Self
    where
        F: Fn(&str) -> Option<Resolved> + 'static,
    {
        Self {
            kind: RouteKind::Dynamic(Box::new(resolver), view),
            name: None,
        }
    }

    /// Mount `router` under `prefix`. The prefix may capture parameters like a path
    /// pattern; they are added to the keyword arguments of every match.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if a parameter is malformed.
    pub fn include(prefix: &str, router: Router<V>) -> Result<Self, PatternError> {
        Ok(Self {
            kind: RouteKind::Include(PathPattern::parse(prefix, true)?, router),
            name: None,
        })
    }

    /// Name the route, for [`Router::reverse`] and [`ResolverMatch::url_name`].
    ///
    /// Names of includes are not used.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }
}
impl<V> fmt::Debug for Route<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            RouteKind::Path(pattern, _) => pattern.source.as_str(),
            RouteKind::Dynamic(..) => DYNAMIC_ROUTE,
            RouteKind::Include(prefix, _) => prefix.source.as_str(),
        };
        f.debug_struct("Route")
            .field("pattern", &kind)
            .field("name", &self.name)
            .finish()
    }
}

/// An ordered list of routes. The first matching route wins.
#[derive(Debug)]
pub struct Router<V> {
    routes: Vec<Route<V>>,
}
impl<V> Default for Router<V> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}
impl<V> Router<V> {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route.
    #[must_use]
    pub fn route(mut self, route: Route<V>) -> Self {
        self.routes.push(route);
        self
    }

    /// Append a route in place.
    pub fn push(&mut self, route: Route<V>) {
        self.routes.push(route);
    }

    /// Find the view for `path`. A single leading `/` is ignored.
    pub fn resolve(&self, path: &str) -> Option<ResolverMatch<'_, V>> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let found = self.resolve_relative(path);
        crate::tracing_macros::trace!(path, found = found.is_some(), "resolved path");
        found
    }

    fn resolve_relative(&self, path: &str) -> Option<ResolverMatch<'_, V>> {
        self.routes.iter().find_map(|route| {
            let url_name = route.name.as_deref();
            match &route.kind {
                RouteKind::Path(pattern, view) => {
                    let (kwargs, _) = pattern.matches(path)?;
                    Some(ResolverMatch {
                        view,
                        args: Vec::new(),
                        kwargs,
                        route: pattern.source.clone(),
                        url_name,
                    })
                }
                RouteKind::Dynamic(resolver, view) => {
                    let Resolved { args, kwargs } = resolver(path)?;
                    Some(ResolverMatch {
                        view,
                        args,
                        kwargs,
                        route: DYNAMIC_ROUTE.to_string(),
                        url_name,
                    })
                }
                RouteKind::Include(prefix, router) => {
                    let (mut kwargs, end) = prefix.matches(path)?;
                    let mut found = router.resolve_relative(&path[end..])?;
                    kwargs.append(&mut found.kwargs);
                    found.kwargs = kwargs;
                    found.route = format!("{}{}", prefix.source, found.route);
                    Some(found)
                }
            }
        })
    }

    /// Build the path of the path route named `name`, filling its parameters (and those
    /// of enclosing includes) from `kwargs`.
    ///
    /// When several routes share a name, the first one whose parameters are exactly the
    /// given arguments is used.
    ///
    /// # Errors
    ///
    /// Returns [`ReverseError::UnknownName`] if no path route has the name, and
    /// [`ReverseError::NoMatch`] if none of them fits the arguments.
    pub fn reverse(&self, name: &str, kwargs: &[(&str, &str)]) -> Result<String, ReverseError> {
        let kwargs: BTreeMap<&str, &str> = kwargs.iter().copied().collect();
        let mut candidates = Vec::new();
        self.named_paths(name, &mut Vec::new(), &mut candidates);
        if candidates.is_empty() {
            return Err(ReverseError::UnknownName {
                name: name.to_string(),
            });
        }

        candidates
            .iter()
            .find_map(|chain| {
                let mut parameters: Vec<&str> = chain
                    .iter()
                    .flat_map(|pattern| pattern.parameters().map(|(name, _)| name))
                    .collect();
                parameters.sort_unstable();
                if !parameters.iter().copied().eq(kwargs.keys().copied()) {
                    return None;
                }
                let mut path = String::from("/");
                for pattern in chain {
                    pattern.write_reversed(&kwargs, &mut path)?;
                }
                Some(path)
            })
            .ok_or_else(|| ReverseError::NoMatch {
                name: name.to_string(),
                arguments: kwargs.keys().map(|k| k.to_string()).collect(),
            })
    }

    /// Collect the pattern chains (include prefixes, then the route) of path routes named
    /// `name`, in routing order.
    fn named_paths<'r>(
        &'r self,
        name: &str,
        prefixes: &mut Vec<&'r PathPattern>,
        out: &mut Vec<Vec<&'r PathPattern>>,
    ) {
        for route in &self.routes {
            match &route.kind {
                RouteKind::Path(pattern, _) if route.name.as_deref() == Some(name) => {
                    let mut chain = prefixes.clone();
                    chain.push(pattern);
                    out.push(chain);
                }
                RouteKind::Include(prefix, router) => {
                    prefixes.push(prefix);
                    router.named_paths(name, prefixes, out);
                    prefixes.pop();
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_patterns() {
        let pattern = PathPattern::parse("articles/<int:year>/<slug>/", false).unwrap();
        let (kwargs, _) = pattern.matches("articles/2024/hello-world/").unwrap();
        assert_eq!(kwargs["year"], "2024");
        assert_eq!(kwargs["slug"], "hello-world");
        assert!(pattern.matches("articles/x/hello/").is_none());
        assert!(pattern.matches("articles/2024/hello/extra").is_none());
    }

    #[test]
    fn literals_are_escaped() {
        let pattern = PathPattern::parse("a.b/(c)/", false).unwrap();
        assert!(pattern.matches("a.b/(c)/").is_some());
        assert!(pattern.matches("axb/(c)/").is_none());
    }

    #[test]
    fn pattern_errors() {
        assert_eq!(
            PathPattern::parse("<float:x>/", false).unwrap_err(),
            PatternError::UnknownConverter {
                converter: "float".to_string()
            }
        );
        assert_eq!(
            PathPattern::parse("<1x>/", false).unwrap_err(),
            PatternError::InvalidParameter {
                name: "1x".to_string()
            }
        );
        assert_eq!(
            PathPattern::parse("<x>/<int:x>/", false).unwrap_err(),
            PatternError::DuplicateParameter {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn converters_check_reversed_values() {
        assert!(Converter::Int.accepts("12"));
        assert!(!Converter::Int.accepts("1a"));
        assert!(!Converter::Str.accepts("a/b"));
        assert!(Converter::Path.accepts("a/b"));
        assert!(!Converter::Slug.accepts(""));
    }
}
