use std::{borrow::Cow, iter::Peekable, str::CharIndices};

use rustc_hash::FxHashMap;
use unicase::UniCase;

/// Hands out type names that never collide within a Java package.
///
/// Each package gets its own [`NameScope`]. Two classes in different
/// packages can share a name; two classes in the same package can't,
/// even if their names only differ in case or word separators, because
/// they'd collide on case-insensitive file systems.
#[derive(Debug, Default)]
pub struct UniqueNames(FxHashMap<String, NameScope>);

impl UniqueNames {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scope for `package`, creating it if this is the first
    /// name in that package.
    pub fn scope(&mut self, package: &str) -> &mut NameScope {
        self.0.entry(package.to_owned()).or_default()
    }

    /// Shorthand for uniquifying `name` in the scope for `package`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clientele_core::codegen::UniqueNames;
    /// let mut names = UniqueNames::new();
    /// assert_eq!(names.uniquify("com.contoso.models", "Widget"), "Widget");
    /// assert_eq!(names.uniquify("com.contoso.models", "widget"), "widget2");
    /// assert_eq!(names.uniquify("com.contoso.implementation.models", "Widget"), "Widget");
    /// ```
    pub fn uniquify(&mut self, package: &str, name: &str) -> String {
        self.scope(package).uniquify(name).into_owned()
    }
}

/// A set of names that are distinct when compared word-by-word,
/// ignoring case.
#[derive(Debug, Default)]
pub struct NameScope {
    taken: FxHashMap<Vec<UniCase<String>>, usize>,
}

impl NameScope {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope where the given names are already taken.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clientele_core::codegen::NameScope;
    /// let mut scope = NameScope::with_reserved(["context"]);
    /// assert_eq!(scope.uniquify("context"), "context2");
    /// assert_eq!(scope.uniquify("Context"), "Context3");
    /// ```
    pub fn with_reserved<S: AsRef<str>>(reserved: impl IntoIterator<Item = S>) -> Self {
        let mut scope = Self::new();
        for name in reserved {
            scope.taken.entry(key(name.as_ref())).or_insert(1);
        }
        scope
    }

    /// Returns `true` if `name`, or a name that only differs from it in
    /// case or separators, is already taken.
    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains_key(&key(name))
    }

    /// Takes `name` in this scope. Returns `name` unchanged if it's free;
    /// otherwise, returns `name` with the smallest numeric suffix that
    /// makes it free.
    ///
    /// # Examples
    ///
    /// ```
    /// # use clientele_core::codegen::NameScope;
    /// let mut scope = NameScope::new();
    /// assert_eq!(scope.uniquify("HTTPResponse"), "HTTPResponse");
    /// assert_eq!(scope.uniquify("HTTP_Response"), "HTTP_Response2");
    /// assert_eq!(scope.uniquify("httpResponse"), "httpResponse3");
    /// ```
    pub fn uniquify<'b>(&mut self, name: &'b str) -> Cow<'b, str> {
        let base = key(name);
        let Some(&taken) = self.taken.get(&base) else {
            self.taken.insert(base, 1);
            return name.into();
        };
        let mut count = taken;
        loop {
            count += 1;
            let candidate = format!("{name}{count}");
            let candidate_key = key(&candidate);
            // A suffixed name might have been declared in its own right.
            if !self.taken.contains_key(&candidate_key) {
                self.taken.insert(base, count);
                self.taken.insert(candidate_key, 1);
                return candidate.into();
            }
        }
    }
}

fn key(name: &str) -> Vec<UniCase<String>> {
    WordSegments::new(name)
        .map(|word| UniCase::new(word.to_owned()))
        .collect()
}

/// Splits an identifier into words.
///
/// A new word starts:
///
/// * After any character that isn't a letter or digit, which is dropped.
/// * At an uppercase letter that follows a lowercase letter (`httpResponse`).
/// * At the last uppercase letter in a run, if a lowercase letter
///   follows it (`XMLHttp`).
/// * At the first letter after a word that only has digits so far
///   (`1099KStatus`, `250g`).
///
/// Digits after a letter stay in that letter's word, so `v2beta`
/// is one word.
///
/// # Examples
///
/// ```
/// # use itertools::Itertools;
/// # use clientele_core::codegen::WordSegments;
/// assert_eq!(WordSegments::new("XMLHttpRequest").collect_vec(), vec!["XML", "Http", "Request"]);
/// assert_eq!(WordSegments::new("api-version").collect_vec(), vec!["api", "version"]);
/// assert_eq!(WordSegments::new("1099KStatus").collect_vec(), vec!["1099", "K", "Status"]);
/// assert_eq!(WordSegments::new("v2beta").collect_vec(), vec!["v2beta"]);
/// ```
pub struct WordSegments<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: Option<usize>,
    /// The case of the last letter in the current word, or `None`
    /// if the current word hasn't seen a letter yet.
    case: Option<LetterCase>,
}

impl<'a> WordSegments<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            start: None,
            case: None,
        }
    }
}

impl<'a> Iterator for WordSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, c)) = self.chars.next() {
            let split = if c.is_uppercase() {
                let split = match self.case {
                    None | Some(LetterCase::Lower) => true,
                    Some(LetterCase::Upper) => self
                        .chars
                        .peek()
                        .is_some_and(|&(_, next)| next.is_lowercase()),
                };
                self.case = Some(LetterCase::Upper);
                split
            } else if c.is_lowercase() {
                let split = self.case.is_none();
                self.case = Some(LetterCase::Lower);
                split
            } else if c.is_alphanumeric() {
                false
            } else {
                self.case = None;
                if let Some(start) = self.start.take() {
                    return Some(&self.input[start..index]);
                }
                continue;
            };
            if split && let Some(start) = self.start.replace(index) {
                return Some(&self.input[start..index]);
            }
            if self.start.is_none() {
                self.start = Some(index);
            }
        }
        self.start.take().map(|start| &self.input[start..])
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LetterCase {
    Lower,
    Upper,
}
