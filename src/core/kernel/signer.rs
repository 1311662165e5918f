use sha1::{Digest, Sha1};

/// A single value accepted by the query signer.
///
/// The conferencing API mixes scalars, comma-joined lists, and nested
/// metadata in one flat query string. Modeling them as variants keeps the
/// encoding rules exhaustive: a new parameter shape cannot silently fall
/// through to the wrong wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// Elements are percent-encoded individually and joined with literal
    /// commas into a single term, e.g. `recordID=a,b,c`.
    List(Vec<String>),
    /// Only meaningful under the reserved `meta` key. Expands into one
    /// `meta_<subkey>=<value>` term per entry, one level deep, insertion
    /// order preserved.
    Meta(Vec<(String, String)>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<(String, String)>> for ParamValue {
    fn from(value: Vec<(String, String)>) -> Self {
        Self::Meta(value)
    }
}

/// Insertion-ordered parameter map.
///
/// Term order is significant: the server recomputes the checksum over the
/// exact byte sequence it receives, so iteration order must be
/// deterministic. Absent optional parameters are skipped at push time and
/// contribute no term at all, which is distinct from a present empty
/// string (`key=`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.entries.push((key.to_string(), value.into()));
    }

    /// Push an optional parameter; `None` is omitted entirely.
    pub fn push_opt<V: Into<ParamValue>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Signs an endpoint name plus a parameter map into a
/// checksum-authenticated query string.
///
/// The checksum is the hex-encoded SHA-1 digest of
/// `endpoint + joined_terms + shared_secret`, computed over the
/// already-percent-encoded term string. The server reconstructs the same
/// bytes on its side, so encoding before hashing must not be reordered.
pub struct ChecksumSigner {
    shared_secret: String,
}

impl ChecksumSigner {
    pub fn new(shared_secret: String) -> Self {
        Self { shared_secret }
    }

    fn encode_value(key: &str, value: &ParamValue, terms: &mut Vec<String>) {
        match value {
            ParamValue::Str(s) => terms.push(format!("{}={}", key, urlencoding::encode(s))),
            ParamValue::Bool(b) => terms.push(format!("{}={}", key, if *b { "true" } else { "false" })),
            ParamValue::Int(i) => terms.push(format!("{}={}", key, i)),
            ParamValue::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| urlencoding::encode(item).into_owned())
                    .collect::<Vec<_>>()
                    .join(",");
                terms.push(format!("{}={}", key, joined));
            }
            ParamValue::Meta(entries) => {
                for (subkey, value) in entries {
                    terms.push(format!("meta_{}={}", subkey, urlencoding::encode(value)));
                }
            }
        }
    }

    /// Build the signed query string for `endpoint`, including the leading
    /// `?` and the trailing `checksum` term.
    pub fn build_query_string(&self, endpoint: &str, params: &Params) -> String {
        let mut terms = Vec::with_capacity(params.len() + 1);
        for (key, value) in params.iter() {
            Self::encode_value(key, value, &mut terms);
        }

        let joined = terms.join("&");

        let mut hasher = Sha1::new();
        hasher.update(endpoint.as_bytes());
        hasher.update(joined.as_bytes());
        hasher.update(self.shared_secret.as_bytes());
        let checksum = hex::encode(hasher.finalize());

        terms.push(format!("checksum={}", checksum));
        format!("?{}", terms.join("&"))
    }
}
