//! Route parameters captured while matching a path.

use std::ops::Index;
use std::slice;
use std::vec;

/// A single URL parameter, consisting of a key and a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// A list of parameters returned by a route match.
///
/// Parameters are ordered left to right as the wildcards appear in the
/// matched path, so it is safe to read values by index:
///
/// ```rust
/// # use radixmux::tree::Tree;
/// let tree = Tree::new();
/// tree.add("/blog/:category/:post", "post").unwrap();
///
/// let matched = tree.get("/blog/rust/routers", false).unwrap();
/// assert_eq!(matched.params.get("post"), Some("routers"));
/// assert_eq!(matched.params[0].key, "category");
/// assert_eq!(matched.params[0].value, "rust");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    vec: Vec<Param>,
}

impl Params {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Params {
            vec: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vec.push(Param {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Returns the value of the first `Param` whose key matches the given name.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        self.vec
            .iter()
            .find(|param| param.key == name)
            .map(|param| param.value.as_str())
    }

    /// Returns the number of captured parameters.
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Returns an iterator over the parameters in match order.
    pub fn iter(&self) -> slice::Iter<'_, Param> {
        self.vec.iter()
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, i: usize) -> &Param {
        &self.vec[i]
    }
}

impl IntoIterator for Params {
    type Item = Param;
    type IntoIter = vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_by_name_returns_first() {
        let mut params = Params::with_capacity(2);
        params.push("id", "1");
        params.push("id", "2");

        assert_eq!(params.get("id"), Some("1"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_params_keep_match_order() {
        let mut params = Params::default();
        params.push("a", "x");
        params.push("b", "y");

        let pairs: Vec<_> = params
            .iter()
            .map(|p| (p.key.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(pairs, [("a", "x"), ("b", "y")]);
        assert_eq!(params[1].value, "y");
    }
}
