//! Static operation descriptors.
//!
//! One [`OperationDescriptor`] per Adzuna capability. REST routes, MCP tool schemas, the OpenAPI
//! document and the generic dispatch in [`crate::runtime`] are all driven from this table.

use crate::normalize::ResponseRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchJobs,
    TopCompanies,
    SalaryHistogram,
    Geodata,
    SalaryHistory,
    Categories,
    ApiVersion,
    HealthCheck,
}

impl Operation {
    pub const ALL: [Self; 8] = [
        Self::SearchJobs,
        Self::TopCompanies,
        Self::SalaryHistogram,
        Self::Geodata,
        Self::SalaryHistory,
        Self::Categories,
        Self::ApiVersion,
        Self::HealthCheck,
    ];

    #[must_use]
    pub fn descriptor(self) -> &'static OperationDescriptor {
        match self {
            Self::SearchJobs => &SEARCH_JOBS,
            Self::TopCompanies => &TOP_COMPANIES,
            Self::SalaryHistogram => &SALARY_HISTOGRAM,
            Self::Geodata => &GEODATA,
            Self::SalaryHistory => &SALARY_HISTORY,
            Self::Categories => &CATEGORIES,
            Self::ApiVersion => &API_VERSION,
            Self::HealthCheck => &HEALTH_CHECK,
        }
    }

    #[must_use]
    pub fn tool_name(self) -> &'static str {
        self.descriptor().tool_name
    }

    #[must_use]
    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tool_name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer { min: Option<i64>, max: Option<i64> },
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Str(&'static str),
    Int(i64),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Local name (REST query key and MCP argument name).
    pub name: &'static str,
    /// Upstream query key or path placeholder.
    pub upstream_name: &'static str,
    pub kind: ParamKind,
    pub location: ParamLocation,
    pub required: bool,
    pub default: Option<ParamDefault>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Literal(&'static str),
    /// Placeholder filled from the path parameter with this upstream name.
    Param(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct UpstreamCall {
    /// Segments appended to the upstream base URL.
    pub path: &'static [PathSegment],
    /// Extra query pairs sent on every call.
    pub fixed_query: &'static [(&'static str, &'static str)],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Jobs,
    System,
}

impl Tag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jobs => "jobs",
            Self::System => "system",
        }
    }
}

#[derive(Debug)]
pub struct OperationDescriptor {
    pub operation: Operation,
    pub tool_name: &'static str,
    pub route: &'static str,
    pub tag: Tag,
    pub summary: &'static str,
    pub description: &'static str,
    /// `None` for operations answered locally.
    pub upstream: Option<UpstreamCall>,
    pub params: &'static [ParamSpec],
    pub response: ResponseRule,
}

impl OperationDescriptor {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

pub const DEFAULT_COUNTRY: &str = "sg";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_RESULTS_PER_PAGE: i64 = 10;
pub const MAX_RESULTS_PER_PAGE: i64 = 50;

const fn query(name: &'static str, kind: ParamKind, description: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        upstream_name: name,
        kind,
        location: ParamLocation::Query,
        required: false,
        default: None,
        description,
    }
}

const fn text(name: &'static str, description: &'static str) -> ParamSpec {
    query(name, ParamKind::String, description)
}

const fn flag(name: &'static str, description: &'static str) -> ParamSpec {
    query(name, ParamKind::Boolean, description)
}

const fn at_least(name: &'static str, min: i64, description: &'static str) -> ParamSpec {
    query(
        name,
        ParamKind::Integer {
            min: Some(min),
            max: None,
        },
        description,
    )
}

const fn required(mut spec: ParamSpec) -> ParamSpec {
    spec.required = true;
    spec
}

const COUNTRY: ParamSpec = ParamSpec {
    name: "country",
    upstream_name: "country",
    kind: ParamKind::String,
    location: ParamLocation::Path,
    required: false,
    default: Some(ParamDefault::Str(DEFAULT_COUNTRY)),
    description: "Country code (e.g., 'sg' for Singapore, 'us' for USA, 'gb' for UK)",
};

const PAGE: ParamSpec = ParamSpec {
    name: "page",
    upstream_name: "page",
    kind: ParamKind::Integer {
        min: Some(1),
        max: None,
    },
    location: ParamLocation::Path,
    required: false,
    default: Some(ParamDefault::Int(DEFAULT_PAGE)),
    description: "Page number for pagination (starts at 1)",
};

const RESULTS_PER_PAGE: ParamSpec = ParamSpec {
    name: "results_per_page",
    upstream_name: "results_per_page",
    kind: ParamKind::Integer {
        min: Some(1),
        max: Some(MAX_RESULTS_PER_PAGE),
    },
    location: ParamLocation::Query,
    required: false,
    default: Some(ParamDefault::Int(DEFAULT_RESULTS_PER_PAGE)),
    description: "Number of results per page (1-50)",
};

const WHAT: ParamSpec = text(
    "what",
    "Keywords to search for (e.g., 'data scientist', 'software engineer')",
);
const WHERE: ParamSpec = text(
    "where",
    "Location to search in (e.g., 'Singapore', 'New York')",
);
const CATEGORY: ParamSpec = text(
    "category",
    "Category tag, as returned by get_categories (e.g., 'it-jobs')",
);

const LOCATION0: ParamSpec = text("location0", "Top level of the location hierarchy (e.g., 'UK')");
const LOCATION1: ParamSpec = text("location1", "Location hierarchy level 1 (e.g., 'London')");
const LOCATION2: ParamSpec = text("location2", "Location hierarchy level 2");
const LOCATION3: ParamSpec = text("location3", "Location hierarchy level 3");
const LOCATION4: ParamSpec = text("location4", "Location hierarchy level 4");
const LOCATION5: ParamSpec = text("location5", "Location hierarchy level 5");
const LOCATION6: ParamSpec = text("location6", "Location hierarchy level 6");
const LOCATION7: ParamSpec = text("location7", "Location hierarchy level 7");

const SEARCH_PARAMS: &[ParamSpec] = &[
    required(WHAT),
    WHERE,
    COUNTRY,
    PAGE,
    RESULTS_PER_PAGE,
    text(
        "sort_by",
        "Sort order: 'default', 'hybrid', 'date' (newest first), 'salary' (highest first), or 'relevance'",
    ),
    text("sort_dir", "Sort direction: 'up' or 'down'"),
    at_least(
        "distance",
        0,
        "Distance in kilometres from the centre of the 'where' location",
    ),
    text("what_and", "Keywords that must all appear"),
    text("what_phrase", "An exact phrase that must appear"),
    text("what_or", "Keywords of which at least one must appear"),
    text("what_exclude", "Keywords that must not appear"),
    text("title_only", "Keywords to find in the job title only"),
    LOCATION0,
    LOCATION1,
    LOCATION2,
    LOCATION3,
    LOCATION4,
    LOCATION5,
    LOCATION6,
    LOCATION7,
    at_least(
        "max_days_old",
        1,
        "Only return jobs posted within this many days",
    ),
    CATEGORY,
    text("company", "Canonical company name to restrict results to"),
    at_least("salary_min", 0, "Minimum salary filter"),
    at_least("salary_max", 0, "Maximum salary filter"),
    flag(
        "salary_include_unknown",
        "Include jobs with unknown salary when filtering by salary",
    ),
    flag("full_time", "Filter for full-time positions only"),
    flag("part_time", "Filter for part-time positions only"),
    flag("contract", "Filter for contract positions only"),
    flag("permanent", "Filter for permanent positions only"),
];

const TOP_COMPANIES_PARAMS: &[ParamSpec] = &[
    COUNTRY,
    text("what", "Keywords to restrict the leaderboard to"),
    LOCATION0,
    LOCATION1,
    LOCATION2,
    LOCATION3,
    LOCATION4,
    LOCATION5,
    LOCATION6,
    LOCATION7,
    CATEGORY,
];

const HISTOGRAM_PARAMS: &[ParamSpec] = &[
    required(text("what", "Keywords to search for (e.g., 'data scientist')")),
    COUNTRY,
    text("where", "Location to search in"),
    LOCATION0,
    LOCATION1,
    LOCATION2,
    LOCATION3,
    LOCATION4,
    LOCATION5,
    LOCATION6,
    LOCATION7,
    CATEGORY,
];

const GEODATA_PARAMS: &[ParamSpec] = &[
    COUNTRY,
    WHERE,
    LOCATION0,
    LOCATION1,
    LOCATION2,
    LOCATION3,
    LOCATION4,
    LOCATION5,
    LOCATION6,
    LOCATION7,
    CATEGORY,
];

const HISTORY_PARAMS: &[ParamSpec] = &[
    COUNTRY,
    LOCATION0,
    LOCATION1,
    LOCATION2,
    LOCATION3,
    LOCATION4,
    LOCATION5,
    LOCATION6,
    LOCATION7,
    CATEGORY,
    at_least("months", 1, "Number of months of history to return"),
];

const COUNTRY_ONLY: &[ParamSpec] = &[COUNTRY];

static SEARCH_JOBS: OperationDescriptor = OperationDescriptor {
    operation: Operation::SearchJobs,
    tool_name: "search_jobs",
    route: "/jobs/search",
    tag: Tag::Jobs,
    summary: "Search for jobs",
    description: "Search for job listings on Adzuna with various filters",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("search"),
            PathSegment::Param("page"),
        ],
        fixed_query: &[("content-type", "application/json")],
    }),
    params: SEARCH_PARAMS,
    response: ResponseRule::SearchResults,
};

static TOP_COMPANIES: OperationDescriptor = OperationDescriptor {
    operation: Operation::TopCompanies,
    tool_name: "get_top_companies",
    route: "/jobs/top-companies",
    tag: Tag::Jobs,
    summary: "Get top hiring companies",
    description: "Get the top companies currently hiring in a specific country",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("top_companies"),
        ],
        fixed_query: &[],
    }),
    params: TOP_COMPANIES_PARAMS,
    response: ResponseRule::Passthrough,
};

static SALARY_HISTOGRAM: OperationDescriptor = OperationDescriptor {
    operation: Operation::SalaryHistogram,
    tool_name: "get_salary_histogram",
    route: "/jobs/histogram",
    tag: Tag::Jobs,
    summary: "Get salary histogram",
    description: "Get salary distribution histogram for job search results",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("histogram"),
        ],
        fixed_query: &[],
    }),
    params: HISTOGRAM_PARAMS,
    response: ResponseRule::Passthrough,
};

static GEODATA: OperationDescriptor = OperationDescriptor {
    operation: Operation::Geodata,
    tool_name: "get_geodata",
    route: "/jobs/geodata",
    tag: Tag::Jobs,
    summary: "Get job counts by location",
    description: "Get the number of live jobs and average salary for the sub-locations of a location",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("geodata"),
        ],
        fixed_query: &[],
    }),
    params: GEODATA_PARAMS,
    response: ResponseRule::Passthrough,
};

static SALARY_HISTORY: OperationDescriptor = OperationDescriptor {
    operation: Operation::SalaryHistory,
    tool_name: "get_salary_history",
    route: "/jobs/history",
    tag: Tag::Jobs,
    summary: "Get salary history",
    description: "Get the average advertised salary per month for a location and category",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("history"),
        ],
        fixed_query: &[],
    }),
    params: HISTORY_PARAMS,
    response: ResponseRule::Passthrough,
};

static CATEGORIES: OperationDescriptor = OperationDescriptor {
    operation: Operation::Categories,
    tool_name: "get_categories",
    route: "/jobs/categories",
    tag: Tag::Jobs,
    summary: "List job categories",
    description: "List the job category tags available in a country",
    upstream: Some(UpstreamCall {
        path: &[
            PathSegment::Literal("jobs"),
            PathSegment::Param("country"),
            PathSegment::Literal("categories"),
        ],
        fixed_query: &[],
    }),
    params: COUNTRY_ONLY,
    response: ResponseRule::Passthrough,
};

static API_VERSION: OperationDescriptor = OperationDescriptor {
    operation: Operation::ApiVersion,
    tool_name: "get_api_version",
    route: "/jobs/version",
    tag: Tag::System,
    summary: "Get Adzuna API version",
    description: "Get the version of the upstream Adzuna API",
    upstream: Some(UpstreamCall {
        path: &[PathSegment::Literal("version")],
        fixed_query: &[],
    }),
    params: &[],
    response: ResponseRule::Passthrough,
};

static HEALTH_CHECK: OperationDescriptor = OperationDescriptor {
    operation: Operation::HealthCheck,
    tool_name: "health_check",
    route: "/health",
    tag: Tag::System,
    summary: "Health check",
    description: "Check if the API is running and configured",
    upstream: None,
    params: &[],
    response: ResponseRule::Passthrough,
};
