//! Path normalization used for fixed-path redirects.

use std::borrow::Cow;

/// Returns the canonical URL path for `p`, eliminating `.` and `..`
/// elements.
///
/// The following rules are applied iteratively until no further processing
/// can be done:
///  1. Replace multiple slashes with a single slash.
///  2. Eliminate each `.` path name element (the current directory).
///  3. Eliminate each inner `..` path name element (the parent directory)
///     along with the non-`..` element that precedes it.
///  4. Eliminate `..` elements that begin a rooted path: that is, replace
///     `"/.."` by `"/"` at the beginning of a path.
///
/// A trailing slash is kept if the input had one, or if the final element
/// was `.`. An empty or relative input is rooted first.
///
/// No new buffer is allocated when `p` is already clean.
///
/// ```rust
/// use radixmux::path::clean;
///
/// assert_eq!(clean("/abc/./def/../ghi"), "/abc/ghi");
/// assert_eq!(clean("abc//"), "/abc/");
/// assert_eq!(clean(""), "/");
/// ```
pub fn clean(p: &str) -> Cow<'_, str> {
    if p.is_empty() {
        return Cow::Borrowed("/");
    }

    let n = p.len();
    let mut buf = LazyBuf::new(p.as_bytes());

    // reading from path; r is the index of the next byte to process
    let mut r = 1;

    // invariant: buffer starts with a slash
    if !p.starts_with('/') {
        r = 0;
        buf.force_slash_prefix();
    }

    let path = p.as_bytes();
    let mut trailing = n > 1 && path[n - 1] == b'/';

    while r < n {
        match path[r] {
            // empty path element, trailing slash is added after the end
            b'/' => r += 1,
            b'.' if r + 1 == n => {
                trailing = true;
                r += 1;
            }
            b'.' if path[r + 1] == b'/' => r += 2,
            b'.' if path[r + 1] == b'.' && (r + 2 == n || path[r + 2] == b'/') => {
                // .. element: remove to last /
                r += 3;

                if buf.w > 1 {
                    // can backtrack
                    buf.w -= 1;
                    while buf.w > 1 && buf.index(buf.w) != b'/' {
                        buf.w -= 1;
                    }
                }
            }
            _ => {
                // real path element.
                // add slash if needed
                if buf.w > 1 {
                    buf.append(b'/');
                }

                // copy element
                while r < n && path[r] != b'/' {
                    buf.append(path[r]);
                    r += 1;
                }
            }
        }
    }

    // re-append trailing slash
    if trailing && buf.w > 1 {
        buf.append(b'/');
    }

    buf.finish(p)
}

/// A write cursor over the input that only allocates once the output
/// diverges from it.
struct LazyBuf<'a> {
    s: &'a [u8],
    buf: Option<Vec<u8>>,
    w: usize,
}

impl<'a> LazyBuf<'a> {
    fn new(s: &'a [u8]) -> Self {
        LazyBuf { s, buf: None, w: 1 }
    }

    fn force_slash_prefix(&mut self) {
        let mut buf = Vec::with_capacity(self.s.len() + 1);
        buf.push(b'/');
        self.buf = Some(buf);
        self.w = 1;
    }

    fn index(&self, i: usize) -> u8 {
        match self.buf {
            Some(ref buf) => buf[i],
            None => self.s[i],
        }
    }

    fn append(&mut self, c: u8) {
        match self.buf {
            Some(ref mut buf) => {
                buf.truncate(self.w);
                buf.push(c);
            }
            None => {
                if self.w < self.s.len() && self.s[self.w] == c {
                    self.w += 1;
                    return;
                }

                let mut buf = Vec::with_capacity(self.s.len() + 1);
                buf.extend_from_slice(&self.s[..self.w]);
                buf.push(c);
                self.buf = Some(buf);
            }
        }

        self.w += 1;
    }

    fn finish(self, p: &'a str) -> Cow<'a, str> {
        match self.buf {
            None => Cow::Borrowed(&p[..self.w]),
            Some(mut buf) => {
                buf.truncate(self.w);
                match String::from_utf8(buf) {
                    Ok(s) => Cow::Owned(s),
                    Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // path, result
    fn clean_tests() -> Vec<(&'static str, &'static str)> {
        vec![
            // Already clean
            ("/", "/"),
            ("/abc", "/abc"),
            ("/a/b/c", "/a/b/c"),
            ("/abc/", "/abc/"),
            ("/a/b/c/", "/a/b/c/"),
            // missing root
            ("", "/"),
            ("a/", "/a/"),
            ("abc", "/abc"),
            ("abc/def", "/abc/def"),
            ("a/b/c", "/a/b/c"),
            // Remove doubled slash
            ("//", "/"),
            ("/abc//", "/abc/"),
            ("/abc/def//", "/abc/def/"),
            ("/a/b/c//", "/a/b/c/"),
            ("/abc//def//ghi", "/abc/def/ghi"),
            ("//abc", "/abc"),
            ("///abc", "/abc"),
            ("//abc//", "/abc/"),
            // Remove . elements
            (".", "/"),
            ("./", "/"),
            ("/abc/./def", "/abc/def"),
            ("/./abc/def", "/abc/def"),
            ("/abc/.", "/abc/"),
            // Remove .. elements
            ("..", "/"),
            ("../", "/"),
            ("../../", "/"),
            ("../..", "/"),
            ("../../abc", "/abc"),
            ("/abc/def/ghi/../jkl", "/abc/def/jkl"),
            ("/abc/def/../ghi/../jkl", "/abc/jkl"),
            ("/abc/def/..", "/abc"),
            ("/abc/def/../..", "/"),
            ("/abc/def/../../..", "/"),
            ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
            ("/a/b/..", "/a"),
            ("/a/b/../", "/a/"),
            // Combinations
            ("abc/./../def", "/def"),
            ("abc//./../def", "/def"),
            ("abc/../../././../def", "/def"),
        ]
    }

    #[test]
    fn test_path_clean() {
        for (path, expected) in clean_tests() {
            assert_eq!(clean(path), expected, "clean({:?})", path);
            assert_eq!(clean(expected), expected, "clean({:?})", expected);
        }
    }

    #[test]
    fn test_path_clean_borrows_clean_input() {
        for (_, expected) in clean_tests() {
            assert!(
                matches!(clean(expected), Cow::Borrowed(_)),
                "clean({:?}) allocated",
                expected
            );
        }
    }

    #[test]
    fn test_path_clean_long() {
        for i in 1..1234 {
            let ss = "a".repeat(i);
            let correct = format!("/{}", ss);

            assert_eq!(clean(&correct), correct);
            assert_eq!(clean(&ss), correct);
            assert_eq!(clean(&format!("//{}", ss)), correct);
            assert_eq!(clean(&format!("//{}/b/..", ss)), correct);
        }
    }

    #[test]
    fn test_path_clean_keeps_multibyte_segments() {
        assert_eq!(clean("/héllo//wörld/./"), "/héllo/wörld/");
        assert_eq!(clean("/日本/../語"), "/語");
    }
}
