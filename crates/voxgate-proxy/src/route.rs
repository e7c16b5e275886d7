use http::Method;

/// How an inbound prefix is matched against the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The path must equal the prefix (a trailing `/` is tolerated). The
    /// upstream path is fixed; query and suffix are not carried over.
    Exact,
    /// The raw path-and-query must start with the prefix. Everything after
    /// it is appended to the upstream prefix unchanged.
    Prefix,
}

/// One inbound-to-upstream mapping
#[derive(Debug, Clone)]
pub struct RouteRule {
    pub methods: Vec<Method>,
    pub inbound: &'static str,
    pub upstream: &'static str,
    pub kind: MatchKind,
}

impl RouteRule {
    fn accepts(&self, method: &Method) -> bool {
        // GET routes answer HEAD as well
        self.methods.contains(method) || (*method == Method::HEAD && self.methods.contains(&Method::GET))
    }

    /// Upstream path for `path_and_query`, if this rule matches it
    fn rewrite(&self, path_and_query: &str) -> Option<String> {
        match self.kind {
            MatchKind::Exact => {
                let path = path_and_query.split_once('?').map_or(path_and_query, |(path, _)| path);
                let trimmed = path.strip_suffix('/').unwrap_or(path);
                (trimmed == self.inbound).then(|| self.upstream.to_string())
            }
            MatchKind::Prefix => path_and_query
                .strip_prefix(self.inbound)
                .map(|suffix| format!("{}{suffix}", self.upstream)),
        }
    }
}

/// Fixed table of proxied routes, consulted in order
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub const fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// Routes exposed by the OpenVoice backend
    pub fn openvoice() -> Self {
        Self::new(vec![
            RouteRule {
                methods: vec![Method::POST],
                inbound: "/api/upload_audio",
                upstream: "/upload_audio/",
                kind: MatchKind::Exact,
            },
            RouteRule {
                methods: vec![Method::POST],
                inbound: "/api/change_voice",
                upstream: "/change_voice",
                kind: MatchKind::Prefix,
            },
            RouteRule {
                methods: vec![Method::GET],
                inbound: "/api/base_tts",
                upstream: "/base_tts",
                kind: MatchKind::Prefix,
            },
            RouteRule {
                methods: vec![Method::GET],
                inbound: "/api/synthesize_speech",
                upstream: "/synthesize_speech",
                kind: MatchKind::Prefix,
            },
        ])
    }

    /// Resolve the upstream path for an inbound method and path-and-query
    pub fn resolve(&self, method: &Method, path_and_query: &str) -> Option<String> {
        self.rules
            .iter()
            .filter(|rule| rule.accepts(method))
            .find_map(|rule| rule.rewrite(path_and_query))
    }
}

/// Where a single request is sent: the configured base plus a rewritten path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget<'a> {
    pub base_url: &'a str,
    pub path: String,
}

impl UpstreamTarget<'_> {
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }
}
